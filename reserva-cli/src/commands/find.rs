//! Find command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, print_reservations, GlobalOptions, OutputFormat};
use clap::Args;
use reserva::store::ReservationStore;
use reserva::Config;

/// Find reservations by exact name.
#[derive(Args)]
pub struct FindCommand {
    /// Name to look up (case-sensitive)
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl FindCommand {
    /// Execute the find command.
    pub async fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, Config::default())?;
        let store = open_store(global, &config)?;

        let found = store.find_by_name(&self.name).await?;
        log::debug!("found {} reservation(s) named {}", found.len(), self.name);
        print_reservations(&found, self.format)
    }
}
