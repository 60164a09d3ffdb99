//! The reservation write pipeline.
//!
//! [`ReservationPipeline::save_all`] turns an ordered batch of names into a
//! lazy stream of persisted reservations. Creates are dispatched with
//! bounded concurrency but the stream yields them in input order. The
//! stream ends right after the first error it yields.
//!
//! Whether a name is validated before or after its create is selected with
//! [`ValidationMode`]. Records already persisted when the batch fails are
//! not removed by the pipeline; wrap the call in
//! [`crate::store::transactional`] when the batch must be all-or-nothing.

use std::fmt;

use futures::future;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::ReservationStore;
use crate::validation::validate_name;
use crate::Reservation;

/// Default number of creates the pipeline keeps in flight.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// When a name is checked against the naming policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Reject a name before its create is issued. Invalid names are never
    /// persisted.
    #[default]
    PreSave,
    /// Check the persisted record after its create resolves. An invalid
    /// record exists in the store until the surrounding transaction (if
    /// any) rolls back.
    PostSave,
}

impl ValidationMode {
    /// Parses a validation mode from a string.
    ///
    /// Recognizes: "pre-save", "post-save" (case-insensitive, `_` accepted
    /// in place of `-`).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use reserva::ValidationMode;
    ///
    /// assert_eq!(ValidationMode::parse("pre-save").unwrap(), ValidationMode::PreSave);
    /// assert_eq!(ValidationMode::parse("POST_SAVE").unwrap(), ValidationMode::PostSave);
    /// assert!(ValidationMode::parse("later").is_err());
    /// ```
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pre-save" => Ok(Self::PreSave),
            "post-save" => Ok(Self::PostSave),
            _ => Err(format!("invalid validation mode: {s}")),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreSave => write!(f, "pre-save"),
            Self::PostSave => write!(f, "post-save"),
        }
    }
}

/// Tuning for [`ReservationPipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// When names are validated.
    pub mode: ValidationMode,
    /// Maximum number of creates in flight. `1` makes the pipeline strictly
    /// sequential.
    pub concurrency: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            mode: ValidationMode::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl PipelineOptions {
    /// Sets the validation mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the concurrency; values below 1 are raised to 1.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Validates and persists batches of names.
///
/// # Examples
///
/// ```
/// use futures::TryStreamExt;
/// use reserva::store::memory::MemoryStore;
/// use reserva::ReservationPipeline;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = MemoryStore::new();
/// let pipeline = ReservationPipeline::default();
///
/// let saved: Vec<_> = pipeline
///     .save_all(&store, ["Alice", "Bob"])
///     .try_collect()
///     .await
///     .unwrap();
///
/// assert_eq!(saved[0].name(), "Alice");
/// assert_eq!(saved[1].name(), "Bob");
/// assert_ne!(saved[0].id(), saved[1].id());
/// # });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservationPipeline {
    options: PipelineOptions,
}

impl ReservationPipeline {
    /// Creates a pipeline with the given options.
    #[must_use]
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options: options.with_concurrency(options.concurrency),
        }
    }

    /// Returns the options this pipeline runs with.
    #[must_use]
    pub const fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Saves every name to `store`, yielding persisted records in input
    /// order.
    ///
    /// Nothing happens until the stream is polled. An empty batch issues no
    /// store calls. After the first `Err` the stream ends; creates that were
    /// already in flight may still have completed.
    pub fn save_all<'a, S, I>(&self, store: &'a S, names: I) -> BoxStream<'a, Result<Reservation>>
    where
        S: ReservationStore + ?Sized,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mode = self.options.mode;
        let drafts: Vec<Reservation> = names
            .into_iter()
            .map(|name| Reservation::unsaved(name))
            .collect();
        log::debug!(
            "saving {} reservation(s) ({mode}, concurrency {})",
            drafts.len(),
            self.options.concurrency
        );

        stream::iter(drafts)
            .map(move |draft| async move {
                if mode == ValidationMode::PreSave {
                    validate_name(draft.name())?;
                }
                let saved = store.create(draft).await?;
                if mode == ValidationMode::PostSave {
                    validate_name(saved.name())?;
                }
                log::debug!("saved {saved}");
                Ok::<_, Error>(saved)
            })
            .buffered(self.options.concurrency)
            .scan(false, |failed, item: Result<Reservation>| {
                if *failed {
                    return future::ready(None);
                }
                *failed = item.is_err();
                future::ready(Some(item))
            })
            .boxed()
    }

    /// Saves every name and collects the results.
    ///
    /// # Errors
    ///
    /// Returns the first validation or store error encountered.
    pub async fn save_all_collected<S, I>(&self, store: &S, names: I) -> Result<Vec<Reservation>>
    where
        S: ReservationStore + ?Sized,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.save_all(store, names).try_collect().await
    }
}
