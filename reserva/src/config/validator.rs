//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use reserva::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { concurrency: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// Seed names are not checked here; a bad seed name fails the reload
    /// that saves it, not every command that loads configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for out-of-range values.
    pub fn validate(config: &Config) -> Result<()> {
        if config.concurrency == Some(0) {
            return Err(Error::Validation {
                field: "concurrency".into(),
                message: "Concurrency must be at least 1".into(),
            });
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        Ok(())
    }
}
