//! Save command implementation.
//!
//! This module implements the `save` command, which runs names through the
//! pipeline without clearing existing reservations. Each record is printed
//! as soon as it is saved; the first failure stops the batch.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, parse_validation, GlobalOptions};
use clap::Args;
use futures::StreamExt;
use reserva::{Config, ReservationPipeline, ValidationMode};

/// Validate and save names, keeping existing reservations.
#[derive(Args)]
pub struct SaveCommand {
    /// Names to save, in order
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    /// When to validate names relative to their save
    #[arg(long, value_name = "MODE", value_parser = parse_validation)]
    pub validation: Option<ValidationMode>,
}

impl SaveCommand {
    /// Execute the save command.
    pub async fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let overrides = Config {
            validation: self.validation,
            ..Config::default()
        };
        let config = load_configuration(global, overrides)?;
        let store = open_store(global, &config)?;

        let pipeline = ReservationPipeline::new(config.pipeline_options());
        let mut saved = pipeline.save_all(&store, self.names);
        let mut count = 0_usize;
        while let Some(item) = saved.next().await {
            let reservation = item?;
            println!("{reservation}");
            count += 1;
        }

        if !global.quiet {
            eprintln!("Saved {count} reservation(s)");
        }

        Ok(())
    }
}
