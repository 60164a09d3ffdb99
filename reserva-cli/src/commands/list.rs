//! List command implementation.
//!
//! This module implements the `list` command, which displays every
//! reservation as a table or as JSON.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, print_reservations, GlobalOptions, OutputFormat};
use clap::Args;
use reserva::store::ReservationStore;
use reserva::Config;

/// List all reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "RESERVA_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,
}

impl ListCommand {
    /// Execute the list command.
    pub async fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, Config::default())?;
        let store = open_store(global, &config)?;

        let reservations = store.find_all().await?;
        print_reservations(&reservations, self.format)
    }
}
