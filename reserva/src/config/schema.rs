//! Configuration schema definitions.
//!
//! Every field is optional so that partial configs from several sources can
//! be layered; the accessor methods resolve unset fields to their defaults.

use serde::{Deserialize, Serialize};

use crate::pipeline::{PipelineOptions, ValidationMode, DEFAULT_CONCURRENCY};

/// Seed names reloaded when no configuration provides any.
pub const DEFAULT_NAMES: [&str; 8] = [
    "Akash", "Shikha", "Ayana", "Netra", "Megha", "Rajveer", "Mahee", "Surya",
];

/// Default maximum time to wait for the database lock.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use reserva::config::Config;
/// use reserva::ValidationMode;
///
/// let config: Config = serde_yaml::from_str(
///     "names: [Akash, Mahee]\nvalidation: post-save\nconcurrency: 2\n",
/// )
/// .unwrap();
///
/// assert_eq!(config.seed_names(), vec!["Akash", "Mahee"]);
/// assert_eq!(config.validation_mode(), ValidationMode::PostSave);
/// assert!(config.is_transactional());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Names saved by a reload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,

    /// When names are validated relative to their save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationMode>,

    /// Maximum number of creates in flight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Whether a reload runs inside one transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactional: Option<bool>,

    /// Maximum time to wait for database lock acquisition (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_lock_wait_seconds: Option<u64>,
}

impl Config {
    /// Returns the configured seed names, or [`DEFAULT_NAMES`].
    #[must_use]
    pub fn seed_names(&self) -> Vec<String> {
        self.names.clone().unwrap_or_else(|| {
            DEFAULT_NAMES.iter().map(ToString::to_string).collect()
        })
    }

    /// Returns the validation mode, defaulting to pre-save.
    #[must_use]
    pub fn validation_mode(&self) -> ValidationMode {
        self.validation.unwrap_or_default()
    }

    /// Returns the pipeline concurrency.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(DEFAULT_CONCURRENCY)
    }

    /// Returns whether reloads are transactional (default true).
    #[must_use]
    pub fn is_transactional(&self) -> bool {
        self.transactional.unwrap_or(true)
    }

    /// Returns the lock wait in seconds.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }

    /// Builds pipeline options from this configuration.
    #[must_use]
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions::default()
            .with_mode(self.validation_mode())
            .with_concurrency(self.concurrency())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.seed_names().len(), 8);
        assert_eq!(config.seed_names()[2], "Ayana");
        assert_eq!(config.validation_mode(), ValidationMode::PreSave);
        assert_eq!(config.concurrency(), DEFAULT_CONCURRENCY);
        assert!(config.is_transactional());
        assert_eq!(config.lock_wait_seconds(), DEFAULT_LOCK_WAIT_SECONDS);
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r"
names:
  - Netra
  - Surya
validation: pre-save
concurrency: 1
transactional: false
maximum_lock_wait_seconds: 30
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.seed_names(), vec!["Netra", "Surya"]);
        assert_eq!(config.concurrency(), 1);
        assert!(!config.is_transactional());
        assert_eq!(config.lock_wait_seconds(), 30);
        assert_eq!(config.pipeline_options().concurrency, 1);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("ports: 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_validation_mode_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("validation: eventually\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_names_are_kept() {
        let config: Config = serde_yaml::from_str("names: []\n").unwrap();
        assert!(config.seed_names().is_empty());
    }

    #[test]
    fn test_serialize_skips_unset() {
        let config = Config {
            concurrency: Some(3),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(yaml.trim(), "concurrency: 3");
    }
}
