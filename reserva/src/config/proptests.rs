//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::Config;
use crate::pipeline::ValidationMode;
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = ValidationMode> {
    prop_oneof![Just(ValidationMode::PreSave), Just(ValidationMode::PostSave)]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(prop::collection::vec("[A-Z][a-z]{0,8}", 0..6)),
        prop::option::of(mode_strategy()),
        prop::option::of(1usize..64),
        prop::option::of(any::<bool>()),
        prop::option::of(1u64..600),
    )
        .prop_map(
            |(names, validation, concurrency, transactional, lock_wait)| Config {
                names,
                validation,
                concurrency,
                transactional,
                maximum_lock_wait_seconds: lock_wait,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Every field set in the higher-precedence config wins; unset fields
    // fall through to the lower one.
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(&merged.names, if high.names.is_some() { &high.names } else { &low.names });
        prop_assert_eq!(merged.validation, high.validation.or(low.validation));
        prop_assert_eq!(merged.concurrency, high.concurrency.or(low.concurrency));
        prop_assert_eq!(merged.transactional, high.transactional.or(low.transactional));
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
    }

    // Merging a config into itself changes nothing.
    #[test]
    fn config_merge_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Merging the empty config is the identity.
    #[test]
    fn config_merge_empty_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // YAML serialization preserves every field.
    #[test]
    fn config_yaml_roundtrip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
