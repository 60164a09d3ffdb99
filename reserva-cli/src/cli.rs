//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    ClearCommand, CompletionsCommand, FindCommand, ListCommand, ReloadCommand, SaveCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for reloading and inspecting name reservations.
#[derive(Parser)]
#[command(name = "reserva")]
#[command(version, about = "Reload and inspect name reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "RESERVA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "RESERVA_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Read configuration from this file as well
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Clear all reservations and reload the seed names
    Reload(ReloadCommand),

    /// List all reservations
    List(ListCommand),

    /// Find reservations by name
    Find(FindCommand),

    /// Validate and save names without clearing
    Save(SaveCommand),

    /// Delete every reservation
    Clear(ClearCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
