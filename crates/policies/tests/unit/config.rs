//! Configuration Tests.
//!
//! Verifies defaults, JSON deserialization (including strategy aliases),
//! and every validation rule a policy instance depends on.

use pretty_assertions::assert_eq;

use replacement_core::common::ConfigError;
use replacement_core::config::{PolicyConfig, StrategyKind};
use replacement_core::LlcReplacement;

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

/// Stock geometry is the 2048x16 LLC the strategies were tuned for.
#[test]
fn default_geometry() {
    let config = PolicyConfig::default();
    assert_eq!(config.num_sets, 2048);
    assert_eq!(config.ways, 16);
    assert_eq!(config.strategy, StrategyKind::Egaa);
    assert_eq!(config.seed, 0xCAFE_BABE);
}

/// Default tuning constants match the documented values.
#[test]
fn default_tuning() {
    let config = PolicyConfig::default();
    assert_eq!(config.egaa.entropy_shift, 4);
    assert_eq!(config.egaa.age_step, 1);
    assert_eq!(config.chrono.sample_period, 1 << 20);
    assert_eq!(config.chrono.bootstrap, 0x4000);
    assert_eq!(config.chrono.pc_set_capacity, 64);
    assert_eq!(config.tmap.pc_hash_bits, 8);
    assert_eq!(config.tmap.seed_score, 8);
    assert_eq!(config.tmap.seed_threshold, 2);
    assert_eq!(config.tmap.reuse_decay_period, 64);
}

/// The default configuration passes its own validation.
#[test]
fn default_is_valid() {
    assert!(PolicyConfig::default().validate().is_ok());
}

// ══════════════════════════════════════════════════════════
// 2. JSON deserialization
// ══════════════════════════════════════════════════════════

/// A sparse JSON document fills every omitted field with its default.
#[test]
fn sparse_json_uses_defaults() {
    let config = PolicyConfig::from_json(r#"{ "strategy": "DAC" }"#).unwrap();
    assert_eq!(config.strategy, StrategyKind::Dac);
    assert_eq!(config.num_sets, 2048);
    assert_eq!(config.chrono.sample_period, 1 << 20);
}

/// Strategy names accept both the canonical spelling and common aliases.
#[test]
fn strategy_aliases() {
    for (text, expected) in [
        (r#"{ "strategy": "EGAA" }"#, StrategyKind::Egaa),
        (r#"{ "strategy": "CHRONOENTROPY" }"#, StrategyKind::ChronoEntropy),
        (r#"{ "strategy": "ChronoEntropy" }"#, StrategyKind::ChronoEntropy),
        (r#"{ "strategy": "DAC" }"#, StrategyKind::Dac),
        (r#"{ "strategy": "T-MAP" }"#, StrategyKind::Tmap),
        (r#"{ "strategy": "TMAP" }"#, StrategyKind::Tmap),
        (r#"{ "strategy": "CAAR" }"#, StrategyKind::Caar),
    ] {
        let config = PolicyConfig::from_json(text).unwrap();
        assert_eq!(config.strategy, expected, "alias {text:?}");
    }
}

/// Nested tuning blocks override field by field.
#[test]
fn nested_overrides() {
    let config = PolicyConfig::from_json(
        r#"{
            "num_sets": 128,
            "ways": 8,
            "strategy": "T-MAP",
            "tmap": { "seed_score": 4, "reuse_decay_period": 32 }
        }"#,
    )
    .unwrap();
    assert_eq!(config.num_sets, 128);
    assert_eq!(config.ways, 8);
    assert_eq!(config.tmap.seed_score, 4);
    assert_eq!(config.tmap.reuse_decay_period, 32);
    // Untouched sibling fields keep their defaults.
    assert_eq!(config.tmap.pc_hash_bits, 8);
}

/// Malformed JSON surfaces as a parse error, not a panic.
#[test]
fn malformed_json_is_rejected() {
    let err = PolicyConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

// ══════════════════════════════════════════════════════════
// 3. Validation
// ══════════════════════════════════════════════════════════

/// Zero sets or zero ways can never describe a cache.
#[test]
fn zero_geometry_is_rejected() {
    let err = PolicyConfig::from_json(r#"{ "num_sets": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroGeometry { sets: 0, ways: 16 }));

    let err = PolicyConfig::from_json(r#"{ "ways": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroGeometry { sets: 2048, ways: 0 }));
}

/// Sampling period is used as a mask and must be a power of two.
#[test]
fn sample_period_must_be_power_of_two() {
    let err = PolicyConfig::from_json(r#"{ "chrono": { "sample_period": 3 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::BadCadence {
            name: "chrono.sample_period",
            value: 3
        }
    ));

    let err = PolicyConfig::from_json(r#"{ "chrono": { "sample_period": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::BadCadence { .. }));
}

/// Reuse decay cadence has the same power-of-two requirement.
#[test]
fn reuse_decay_period_must_be_power_of_two() {
    let err = PolicyConfig::from_json(r#"{ "tmap": { "reuse_decay_period": 48 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::BadCadence {
            name: "tmap.reuse_decay_period",
            value: 48
        }
    ));
}

/// The sampled-PC bound must admit at least one entry.
#[test]
fn pc_set_capacity_must_be_nonzero() {
    let err = PolicyConfig::from_json(r#"{ "chrono": { "pc_set_capacity": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroPcSetCapacity));
}

/// PC hash widths outside 1..=24 bits are rejected.
#[test]
fn pc_hash_width_bounds() {
    let err = PolicyConfig::from_json(r#"{ "tmap": { "pc_hash_bits": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::PcHashWidth { bits: 0, .. }));

    let err = PolicyConfig::from_json(r#"{ "tmap": { "pc_hash_bits": 25 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::PcHashWidth { bits: 25, .. }));

    assert!(PolicyConfig::from_json(r#"{ "tmap": { "pc_hash_bits": 24 } }"#).is_ok());
}

/// Construction re-validates, so a hand-built bad config cannot slip through.
#[test]
fn construction_rejects_invalid_config() {
    let mut config = PolicyConfig::default();
    config.ways = 0;
    assert!(LlcReplacement::new(&config).is_err());
}
