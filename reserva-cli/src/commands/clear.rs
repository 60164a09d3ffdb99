//! Clear command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use reserva::store::ReservationStore;
use reserva::Config;

/// Delete every reservation.
#[derive(Args)]
pub struct ClearCommand {}

impl ClearCommand {
    /// Execute the clear command.
    pub async fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, Config::default())?;
        let store = open_store(global, &config)?;

        let removed = store.delete_all().await?;
        if !global.quiet {
            eprintln!("Cleared {removed} reservation(s)");
        }

        Ok(())
    }
}
