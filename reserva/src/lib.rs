#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # reserva
//!
//! A library for validating, persisting and bulk-reloading named
//! reservations.
//!
//! ## Core Types
//!
//! - [`Reservation`] and [`ReservationId`]: the stored record
//! - [`validate_name`]: the naming policy
//! - [`store::ReservationStore`] and [`store::TransactionalStore`]: storage
//!   capabilities, implemented by [`SqliteStore`] and [`MemoryStore`]
//! - [`ReservationPipeline`]: ordered, concurrent validate-and-save
//! - [`Reloader`]: one-shot clear-and-reload bootstrap
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use reserva::store::ReservationStore;
//! use reserva::{ready_channel, MemoryStore, Reloader};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let store = MemoryStore::new();
//! let (trigger, signal) = ready_channel();
//! let mut reloader = Reloader::new(["Akash", "Netra", "Mahee"]);
//!
//! trigger.fire();
//! let report = reloader.run_when_ready(signal, &store, true).await.unwrap();
//!
//! assert_eq!(report.saved, 3);
//! assert_eq!(store.find_by_name("Mahee").await.unwrap().len(), 1);
//! # });
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod ready;
pub mod reloader;
pub mod reservation;
pub mod sink;
pub mod store;
pub mod validation;

pub use config::{Config, ConfigBuilder};
pub use database::{DatabaseConfig, SqliteStore};
pub use error::{Error, Result};
pub use logging::{init_logger, install_logger, LogLevel, Logger};
pub use pipeline::{PipelineOptions, ReservationPipeline, ValidationMode};
pub use ready::{ready_channel, ReadySignal, ReadyTrigger};
pub use reloader::{ReloadReport, ReloadState, Reloader};
pub use reservation::{Reservation, ReservationId};
pub use sink::{LogSink, ReservationSink};
pub use store::memory::MemoryStore;
pub use validation::validate_name;
