//! Reload command implementation.
//!
//! This module implements the `reload` command, which clears the store and
//! saves the configured seed names, then prints the resulting contents.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, parse_validation, GlobalOptions};
use clap::Args;
use reserva::{
    Config, Error, LogSink, ReadySignal, Reloader, Reservation, ReservationPipeline,
    ReservationSink, ValidationMode,
};

/// Clear all reservations and reload the seed names.
#[derive(Args)]
pub struct ReloadCommand {
    /// Comma-separated names to reload instead of the configured ones
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub names: Option<Vec<String>>,

    /// Run the clear and save phases without a surrounding transaction
    #[arg(long)]
    pub no_transaction: bool,

    /// When to validate names relative to their save
    #[arg(long, value_name = "MODE", value_parser = parse_validation)]
    pub validation: Option<ValidationMode>,

    /// Maximum number of saves in flight
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,
}

/// Prints every reported record to stdout and logs failures.
struct PrintSink;

impl ReservationSink for PrintSink {
    fn record(&self, reservation: &Reservation) {
        println!("{reservation}");
    }

    fn failed(&self, error: &Error) {
        LogSink.failed(error);
    }
}

impl ReloadCommand {
    /// Execute the reload command.
    ///
    /// The reload starts once `ready` fires; a trigger dropped before
    /// firing fails the command.
    pub async fn execute(self, global: &GlobalOptions, ready: ReadySignal) -> Result<(), CliError> {
        if self.concurrency == Some(0) {
            return Err(CliError::InvalidArguments(
                "--concurrency must be at least 1".into(),
            ));
        }

        // 1. Load configuration with command-line overrides
        let overrides = Config {
            names: self.names,
            validation: self.validation,
            concurrency: self.concurrency,
            transactional: self.no_transaction.then_some(false),
            maximum_lock_wait_seconds: None,
        };
        let config = load_configuration(global, overrides)?;

        // 2. Open the store
        let store = open_store(global, &config)?;

        // 3. Run the reload
        let mut reloader = Reloader::new(config.seed_names())
            .with_pipeline(ReservationPipeline::new(config.pipeline_options()))
            .with_sink(PrintSink);
        let report = reloader
            .run_when_ready(ready, &store, config.is_transactional())
            .await?;

        if !global.quiet {
            eprintln!(
                "Reloaded {} reservation(s) (cleared {})",
                report.saved, report.cleared
            );
        }

        Ok(())
    }
}
