//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use reserva::config::{Config, ConfigMerger};
///
/// let low = Config { concurrency: Some(2), ..Default::default() };
/// let high = Config { concurrency: Some(4), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.concurrency, Some(4));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Every field is replaced as a whole when the source sets it; seed name
    /// lists are not concatenated.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.names.is_some() {
            target.names.clone_from(&source.names);
        }

        if source.validation.is_some() {
            target.validation = source.validation;
        }

        if source.concurrency.is_some() {
            target.concurrency = source.concurrency;
        }

        if source.transactional.is_some() {
            target.transactional = source.transactional;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ValidationMode;
    use std::path::PathBuf;

    fn source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("/config/{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(ConfigMerger::merge(Vec::new()), Config::default());
    }

    #[test]
    fn test_names_replaced_not_accumulated() {
        let low = Config {
            names: Some(vec!["Akash".into(), "Netra".into()]),
            ..Default::default()
        };
        let high = Config {
            names: Some(vec!["Surya".into()]),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![source(1, low), source(2, high)]);
        assert_eq!(merged.seed_names(), vec!["Surya"]);
    }

    #[test]
    fn test_unset_fields_do_not_clobber() {
        let low = Config {
            validation: Some(ValidationMode::PostSave),
            transactional: Some(false),
            ..Default::default()
        };
        let high = Config {
            concurrency: Some(1),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![source(1, low), source(2, high)]);
        assert_eq!(merged.validation, Some(ValidationMode::PostSave));
        assert_eq!(merged.transactional, Some(false));
        assert_eq!(merged.concurrency, Some(1));
    }
}
