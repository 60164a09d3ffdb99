//! Environment variable handling for configuration overrides.
//!
//! `RESERVA_*` variables override values from configuration files.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::pipeline::ValidationMode;
use std::env;

/// Comma-separated seed names.
pub const NAMES_ENV: &str = "RESERVA_NAMES";
/// `pre-save` or `post-save`.
pub const VALIDATION_ENV: &str = "RESERVA_VALIDATION";
/// Pipeline concurrency.
pub const CONCURRENCY_ENV: &str = "RESERVA_CONCURRENCY";
/// Whether reloads are transactional.
pub const TRANSACTIONAL_ENV: &str = "RESERVA_TRANSACTIONAL";
/// Maximum lock wait in seconds.
pub const LOCK_WAIT_ENV: &str = "RESERVA_MAXIMUM_LOCK_WAIT_SECONDS";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use reserva::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric concurrency, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(names) = env::var(NAMES_ENV) {
            config.names = Some(Self::parse_names(&names));
        }

        if let Ok(mode) = env::var(VALIDATION_ENV) {
            config.validation =
                Some(ValidationMode::parse(&mode).map_err(|message| Error::Validation {
                    field: VALIDATION_ENV.into(),
                    message,
                })?);
        }

        if let Ok(value) = env::var(CONCURRENCY_ENV) {
            config.concurrency = Some(value.trim().parse().map_err(|_| Error::Validation {
                field: CONCURRENCY_ENV.into(),
                message: "Must be a positive integer".into(),
            })?);
        }

        if let Ok(value) = env::var(TRANSACTIONAL_ENV) {
            config.transactional = Some(Self::parse_bool(TRANSACTIONAL_ENV, &value)?);
        }

        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: LOCK_WAIT_ENV.into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        Ok(())
    }

    /// Splits a comma-separated list, trimming entries and dropping empty
    /// ones.
    #[must_use]
    pub fn parse_names(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Parse a boolean environment variable value.
    ///
    /// Accepts: true/false, 1/0, yes/no, on/off (case-insensitive).
    fn parse_bool(var_name: &str, value: &str) -> Result<bool> {
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: var_name.into(),
                message: format!("Invalid boolean value: {value}"),
            }),
        }
    }
}
