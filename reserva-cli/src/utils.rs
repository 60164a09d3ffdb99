//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, store management, and output
//! formatting.

use crate::error::CliError;
use clap::ValueEnum;
use reserva::config::{ConfigLoader, ConfigMerger};
use reserva::database::{default_data_dir, DATABASE_FILE_NAME};
use reserva::{Config, ConfigBuilder, DatabaseConfig, Reservation, SqliteStore, ValidationMode};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Output format for commands that print reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
}

/// Parses a `--validation` value.
pub fn parse_validation(value: &str) -> Result<ValidationMode, String> {
    ValidationMode::parse(value)
}

/// Load layered configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Command-line overrides (highest priority)
/// 2. The file given with `--config`
/// 3. Environment variables
/// 4. Configuration files
/// 5. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions, overrides: Config) -> Result<Config, CliError> {
    let mut explicit = match &global.config {
        Some(path) => {
            ConfigLoader::load_file(path).map_err(|e| CliError::Config(e.to_string()))?
        }
        None => Config::default(),
    };
    ConfigMerger::merge_into(&mut explicit, &overrides);

    let mut builder = ConfigBuilder::new().with_config(explicit);
    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the database path from global options.
fn resolve_database_path(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    let data_dir = match global.data_dir {
        Some(ref dir) => dir.clone(),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string()))?,
    };
    Ok(data_dir.join(DATABASE_FILE_NAME))
}

/// Open the reservation store.
///
/// The busy timeout comes from `--busy-timeout` when given, otherwise from
/// `maximum_lock_wait_seconds` in the configuration.
pub fn open_store(global: &GlobalOptions, config: &Config) -> Result<SqliteStore, CliError> {
    let db_path = resolve_database_path(global)?;
    log::debug!("opening reservation store at {}", db_path.display());

    let seconds = global
        .busy_timeout
        .unwrap_or_else(|| config.lock_wait_seconds());
    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(Duration::from_secs(seconds));

    SqliteStore::open(db_config).map_err(CliError::from)
}

/// Write reservations to stdout in the requested format.
pub fn print_reservations(
    reservations: &[Reservation],
    format: OutputFormat,
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "ID\tNAME")?;
            for reservation in reservations {
                let id = reservation
                    .id()
                    .map_or_else(|| "-".to_string(), |id| id.to_string());
                writeln!(handle, "{id}\t{}", reservation.name())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, reservations)?;
            writeln!(handle)?;
        }
    }

    Ok(())
}
