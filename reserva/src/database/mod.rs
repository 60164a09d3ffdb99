//! SQLite storage for reservations.
//!
//! This module provides a SQLite-backed implementation of
//! [`crate::store::ReservationStore`] and
//! [`crate::store::TransactionalStore`], including connection management,
//! schema versioning and CRUD operations.
//!
//! # Examples
//!
//! ```no_run
//! use reserva::database::{DatabaseConfig, SqliteStore};
//! use reserva::store::ReservationStore;
//! use reserva::Reservation;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let store = SqliteStore::open(DatabaseConfig::new("/tmp/reserva.db")).unwrap();
//! store.create(Reservation::unsaved("Akash")).await.unwrap();
//!
//! for reservation in store.find_all().await.unwrap() {
//!     println!("{reservation}");
//! }
//! # });
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

pub use config::{default_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME};
pub use connection::SqliteStore;
pub use transaction::SqliteTransaction;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
