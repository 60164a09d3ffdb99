//! Main entry point for the reserva CLI.
//!
//! This is the command-line interface for the reserva reservation store.
//! It provides commands for managing reservations:
//! - `reload`: Clear the store and save the seed names
//! - `list`: List all reservations
//! - `find`: Find reservations by name
//! - `save`: Save names without clearing
//! - `clear`: Delete every reservation

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use error::CliError;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    reserva::install_logger(reserva::init_logger(cli.verbose, cli.quiet));
    let (trigger, ready) = reserva::ready_channel();

    let global = GlobalOptions {
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        config: cli.config,
    };

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::from)
        .and_then(|runtime| {
            trigger.fire();
            runtime.block_on(async {
                match cli.command {
                    cli::Command::Reload(cmd) => cmd.execute(&global, ready).await,
                    cli::Command::List(cmd) => cmd.execute(&global).await,
                    cli::Command::Find(cmd) => cmd.execute(&global).await,
                    cli::Command::Save(cmd) => cmd.execute(&global).await,
                    cli::Command::Clear(cmd) => cmd.execute(&global).await,
                    cli::Command::Completions(cmd) => cmd.execute(&global),
                }
            })
        });

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
