//! Clear-and-reload bootstrap.
//!
//! A [`Reloader`] runs once: it deletes every reservation, saves its seed
//! names through a [`ReservationPipeline`], then re-reads the store and hands
//! each record to a [`ReservationSink`]. Phases run strictly in sequence and
//! the first error aborts the rest.
//!
//! [`Reloader::run_transactional`] wraps the clear and save phases in a
//! single transaction so a failed reload leaves the previous contents in
//! place and concurrent readers never see a half-cleared store.

use std::fmt;

use futures::{future, TryStreamExt};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::pipeline::ReservationPipeline;
use crate::ready::ReadySignal;
use crate::sink::{LogSink, ReservationSink};
use crate::store::{transactional, ReservationStore, TransactionalStore};

/// Where a reloader is in its single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadState {
    /// Not started.
    Idle,
    /// Deleting existing reservations.
    Clearing,
    /// Saving the seed names.
    Reloading,
    /// Reading back and reporting the final contents.
    Reporting,
    /// Finished successfully.
    Done,
    /// Aborted by an error.
    Failed,
}

impl ReloadState {
    /// Returns true for `Done` and `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for ReloadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Clearing => "clearing",
            Self::Reloading => "reloading",
            Self::Reporting => "reporting",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Counts from a successful reload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReloadReport {
    /// Records removed by the clear phase.
    pub cleared: usize,
    /// Records created by the save phase.
    pub saved: usize,
    /// Records delivered to the sink.
    pub reported: usize,
}

/// One-shot clear-and-reload driver.
///
/// # Examples
///
/// ```
/// use reserva::store::{memory::MemoryStore, ReservationStore};
/// use reserva::Reloader;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = MemoryStore::new();
/// let mut reloader = Reloader::new(["Akash", "Mahee"]);
///
/// let report = reloader.run_transactional(&store).await.unwrap();
/// assert_eq!(report.saved, 2);
/// assert_eq!(store.find_by_name("Mahee").await.unwrap().len(), 1);
/// # });
/// ```
#[derive(Debug)]
pub struct Reloader<K = LogSink> {
    names: Vec<String>,
    pipeline: ReservationPipeline,
    sink: K,
    state: ReloadState,
}

impl Reloader<LogSink> {
    /// Creates a reloader for the given seed names, reporting to the log.
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            pipeline: ReservationPipeline::default(),
            sink: LogSink,
            state: ReloadState::Idle,
        }
    }
}

impl<K: ReservationSink> Reloader<K> {
    /// Replaces the pipeline used for the save phase.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: ReservationPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Replaces the sink.
    #[must_use]
    pub fn with_sink<T: ReservationSink>(self, sink: T) -> Reloader<T> {
        Reloader {
            names: self.names,
            pipeline: self.pipeline,
            sink,
            state: self.state,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> ReloadState {
        self.state
    }

    /// Returns the seed names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the sink.
    #[must_use]
    pub const fn sink(&self) -> &K {
        &self.sink
    }

    /// Clears the store, saves the seed names and reports the result.
    ///
    /// Each phase is atomic on its own but the sequence is not; use
    /// [`Self::run_transactional`] when the store supports it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lifecycle`] if this reloader already ran, or the
    /// first validation or store error.
    pub async fn run<S>(&mut self, store: &S) -> Result<ReloadReport>
    where
        S: ReservationStore + ?Sized,
    {
        self.start()?;
        let outcome = match self.clear_and_reload(store).await {
            Ok((cleared, saved)) => self.report(store, cleared, saved).await,
            Err(err) => Err(err),
        };
        self.finish(outcome)
    }

    /// Like [`Self::run`], with the clear and save phases in one
    /// transaction.
    ///
    /// On failure the transaction rolls back and the store keeps its
    /// previous contents. Reporting re-reads the store after commit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lifecycle`] if this reloader already ran, or the
    /// first validation, store or commit error.
    pub async fn run_transactional<S>(&mut self, store: &S) -> Result<ReloadReport>
    where
        S: TransactionalStore + ?Sized,
    {
        self.start()?;
        let this = &mut *self;
        let phases = transactional(store, move |tx| async move {
            this.clear_and_reload(&tx).await
        })
        .await;

        let outcome = match phases {
            Ok((cleared, saved)) => self.report(store, cleared, saved).await,
            Err(err) => Err(err),
        };
        self.finish(outcome)
    }

    /// Waits for `signal`, then runs the reload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lifecycle`] if the trigger is dropped without
    /// firing, otherwise as [`Self::run`] and [`Self::run_transactional`].
    pub async fn run_when_ready<S>(
        &mut self,
        signal: ReadySignal,
        store: &S,
        use_transaction: bool,
    ) -> Result<ReloadReport>
    where
        S: TransactionalStore + ?Sized,
    {
        if let Err(err) = signal.wait().await {
            self.state = ReloadState::Failed;
            self.sink.failed(&err);
            return Err(err);
        }
        log::debug!("ready signal received");

        if use_transaction {
            self.run_transactional(store).await
        } else {
            self.run(store).await
        }
    }

    fn start(&mut self) -> Result<()> {
        if self.state != ReloadState::Idle {
            return Err(Error::Lifecycle {
                message: format!("reloader cannot run again (state: {})", self.state),
            });
        }
        log::info!("reloading {} reservation(s)", self.names.len());
        Ok(())
    }

    async fn clear_and_reload<S>(&mut self, store: &S) -> Result<(usize, usize)>
    where
        S: ReservationStore + ?Sized,
    {
        self.state = ReloadState::Clearing;
        let cleared = store.delete_all().await?;
        log::debug!("cleared {cleared} reservation(s)");

        self.state = ReloadState::Reloading;
        let saved = self
            .pipeline
            .save_all(store, self.names.iter().cloned())
            .try_fold(0_usize, |saved, _| future::ready(Ok(saved + 1)))
            .await?;

        Ok((cleared, saved))
    }

    async fn report<S>(&mut self, store: &S, cleared: usize, saved: usize) -> Result<ReloadReport>
    where
        S: ReservationStore + ?Sized,
    {
        self.state = ReloadState::Reporting;
        let records = store.find_all().await?;
        for reservation in &records {
            self.sink.record(reservation);
        }

        Ok(ReloadReport {
            cleared,
            saved,
            reported: records.len(),
        })
    }

    fn finish(&mut self, outcome: Result<ReloadReport>) -> Result<ReloadReport> {
        match outcome {
            Ok(report) => {
                self.state = ReloadState::Done;
                log::info!(
                    "reload complete: cleared {}, saved {}, reported {}",
                    report.cleared,
                    report.saved,
                    report.reported
                );
                Ok(report)
            }
            Err(err) => {
                log::debug!("reload aborted while {}", self.state);
                self.state = ReloadState::Failed;
                self.sink.failed(&err);
                Err(err)
            }
        }
    }
}
