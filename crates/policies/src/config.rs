//! Configuration for the replacement module.
//!
//! This module defines all structures and enums used to parameterize a policy
//! instance. It provides:
//! 1. **Defaults:** Baseline geometry and per-strategy tuning constants.
//! 2. **Structures:** Root config plus one tuning block per strategy family.
//! 3. **Selection:** The strategy enum the driver dispatches on.
//!
//! Configuration is supplied as JSON by the host harness, or use
//! `PolicyConfig::default()` for the stock LLC geometry. Everything is fixed
//! at construction time; nothing is reloadable mid-run.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the replacement module.
mod defaults {
    /// Number of sets in the simulated LLC (2048 per core, one core).
    pub const NUM_SETS: usize = 2048;

    /// LLC associativity.
    pub const WAYS: usize = 16;

    /// Seed for the deterministic sampling generator.
    pub const SEED: u64 = 0xCAFE_BABE;

    /// Right-shift applied to a line's entropy when computing its aging step.
    ///
    /// A smaller shift makes high-entropy neighbors age faster.
    pub const ENTROPY_SHIFT: u8 = 4;

    /// Base aging step added to every non-accessed line in a touched set.
    pub const AGE_STEP: u8 = 1;

    /// Accesses between PC samples (one sampled `(set, way)` per period).
    pub const SAMPLE_PERIOD: u64 = 1 << 20;

    /// Mid-range bootstrap value for a freshly filled combined counter.
    pub const BOOTSTRAP: u16 = 0x4000;

    /// Largest number of distinct PCs remembered per sampled line.
    ///
    /// The reseed rank clamps at 31, so any capacity of 32 or more leaves
    /// reseeding unaffected; the bound only caps memory growth.
    pub const PC_SET_CAPACITY: usize = 64;

    /// Width of the hashed-PC key into the reuse history table.
    pub const PC_HASH_BITS: u32 = 8;

    /// Score seeded into a new line whose PC has a history of short reuse.
    pub const SEED_SCORE: i8 = 8;

    /// Consecutive short hits required before seeding kicks in.
    pub const SEED_THRESHOLD: u8 = 2;

    /// Set accesses between reuse-quantizer decay sweeps.
    pub const REUSE_DECAY_PERIOD: u64 = 64;
}

/// Widest accepted PC hash (2^24 table entries).
const MAX_PC_HASH_BITS: u32 = 24;

/// Replacement strategy selection.
///
/// Each variant is a complete scoring + update rule; the driver dispatches
/// every host call to the selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrategyKind {
    /// Entropy-guided adaptive aging.
    ///
    /// Ages lines faster the more variable their observed addresses and PCs
    /// have been; evicts the highest effective age. Claims empty lines first.
    #[default]
    #[serde(alias = "Egaa")]
    Egaa,

    /// Packed recency-rank / decay-clock counter with sampled-PC reseeding.
    ///
    /// Evicts the lowest decay clock, breaking ties on recency rank.
    #[serde(alias = "ChronoEntropy", alias = "Chrono")]
    ChronoEntropy,

    /// Decayed adaptive counting.
    ///
    /// Evicts the least-used line; the background heartbeat halves every
    /// usage counter.
    #[serde(alias = "Dac")]
    Dac,

    /// Temporal marginality prediction with reuse quantization.
    ///
    /// Evicts the lowest marginality score; misses fast-age the whole set
    /// and new lines are seeded from per-PC reuse history.
    #[serde(alias = "T-MAP", alias = "Tmap")]
    Tmap,

    /// Conflict-aware aging replacement.
    ///
    /// Evicts the highest contention-weighted age. Claims empty lines first.
    #[serde(alias = "Caar")]
    Caar,
}

/// Root configuration for one policy instance.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use replacement_core::config::PolicyConfig;
///
/// let config = PolicyConfig::default();
/// assert_eq!(config.num_sets, 2048);
/// assert_eq!(config.ways, 16);
/// ```
///
/// Deserializing from JSON (typical harness usage):
///
/// ```
/// use replacement_core::config::{PolicyConfig, StrategyKind};
///
/// let config = PolicyConfig::from_json(r#"{
///     "num_sets": 64,
///     "ways": 4,
///     "strategy": "T-MAP",
///     "tmap": { "seed_score": 6 }
/// }"#).unwrap();
/// assert_eq!(config.strategy, StrategyKind::Tmap);
/// assert_eq!(config.tmap.seed_score, 6);
/// assert_eq!(config.seed, 0xCAFE_BABE);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Number of sets in the simulated cache.
    #[serde(default = "PolicyConfig::default_num_sets")]
    pub num_sets: usize,

    /// Associativity (ways per set).
    #[serde(default = "PolicyConfig::default_ways")]
    pub ways: usize,

    /// Active replacement strategy.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Seed for the deterministic sampling generator.
    #[serde(default = "PolicyConfig::default_seed")]
    pub seed: u64,

    /// Entropy-guided aging tuning.
    #[serde(default)]
    pub egaa: EgaaConfig,

    /// ChronoEntropy tuning.
    #[serde(default)]
    pub chrono: ChronoConfig,

    /// Temporal-marginality tuning.
    #[serde(default)]
    pub tmap: TmapConfig,
}

impl PolicyConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the relevant
    /// variant for any value [`validate`](Self::validate) rejects.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field the strategies rely on at runtime.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: nonzero geometry, power-of-two
    /// cadences, nonzero PC-set capacity, and a bounded PC hash width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_sets == 0 || self.ways == 0 {
            return Err(ConfigError::ZeroGeometry {
                sets: self.num_sets,
                ways: self.ways,
            });
        }
        if !self.chrono.sample_period.is_power_of_two() {
            return Err(ConfigError::BadCadence {
                name: "chrono.sample_period",
                value: self.chrono.sample_period,
            });
        }
        if self.chrono.pc_set_capacity == 0 {
            return Err(ConfigError::ZeroPcSetCapacity);
        }
        if !self.tmap.reuse_decay_period.is_power_of_two() {
            return Err(ConfigError::BadCadence {
                name: "tmap.reuse_decay_period",
                value: self.tmap.reuse_decay_period,
            });
        }
        if self.tmap.pc_hash_bits == 0 || self.tmap.pc_hash_bits > MAX_PC_HASH_BITS {
            return Err(ConfigError::PcHashWidth {
                bits: self.tmap.pc_hash_bits,
                max: MAX_PC_HASH_BITS,
            });
        }
        Ok(())
    }

    /// Returns the default set count.
    fn default_num_sets() -> usize {
        defaults::NUM_SETS
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Returns the default generator seed.
    fn default_seed() -> u64 {
        defaults::SEED
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            num_sets: defaults::NUM_SETS,
            ways: defaults::WAYS,
            strategy: StrategyKind::default(),
            seed: defaults::SEED,
            egaa: EgaaConfig::default(),
            chrono: ChronoConfig::default(),
            tmap: TmapConfig::default(),
        }
    }
}

/// Tuning for the entropy-guided aging strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EgaaConfig {
    /// Right-shift applied to entropy when computing a line's aging step.
    #[serde(default = "EgaaConfig::default_entropy_shift")]
    pub entropy_shift: u8,

    /// Base aging step for non-accessed lines in a touched set.
    #[serde(default = "EgaaConfig::default_age_step")]
    pub age_step: u8,
}

impl EgaaConfig {
    /// Returns the default entropy shift.
    fn default_entropy_shift() -> u8 {
        defaults::ENTROPY_SHIFT
    }

    /// Returns the default base aging step.
    fn default_age_step() -> u8 {
        defaults::AGE_STEP
    }
}

impl Default for EgaaConfig {
    fn default() -> Self {
        Self {
            entropy_shift: defaults::ENTROPY_SHIFT,
            age_step: defaults::AGE_STEP,
        }
    }
}

/// Tuning for the ChronoEntropy strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChronoConfig {
    /// Accesses between PC samples; used as a mask, must be a power of two.
    #[serde(default = "ChronoConfig::default_sample_period")]
    pub sample_period: u64,

    /// Combined-counter value installed on every fill.
    #[serde(default = "ChronoConfig::default_bootstrap")]
    pub bootstrap: u16,

    /// Capacity bound of each sampled-PC set.
    #[serde(default = "ChronoConfig::default_pc_set_capacity")]
    pub pc_set_capacity: usize,
}

impl ChronoConfig {
    /// Returns the default sampling period.
    fn default_sample_period() -> u64 {
        defaults::SAMPLE_PERIOD
    }

    /// Returns the default fill bootstrap value.
    fn default_bootstrap() -> u16 {
        defaults::BOOTSTRAP
    }

    /// Returns the default sampled-PC set capacity.
    fn default_pc_set_capacity() -> usize {
        defaults::PC_SET_CAPACITY
    }
}

impl Default for ChronoConfig {
    fn default() -> Self {
        Self {
            sample_period: defaults::SAMPLE_PERIOD,
            bootstrap: defaults::BOOTSTRAP,
            pc_set_capacity: defaults::PC_SET_CAPACITY,
        }
    }
}

/// Tuning for the temporal-marginality strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TmapConfig {
    /// Width of the hashed-PC key; the history table holds `2^bits` entries.
    #[serde(default = "TmapConfig::default_pc_hash_bits")]
    pub pc_hash_bits: u32,

    /// Score seeded into new lines whose PC shows short-reuse history.
    #[serde(default = "TmapConfig::default_seed_score")]
    pub seed_score: i8,

    /// Consecutive short hits required before seeding applies.
    #[serde(default = "TmapConfig::default_seed_threshold")]
    pub seed_threshold: u8,

    /// Set accesses between reuse-quantizer decay sweeps; power of two.
    #[serde(default = "TmapConfig::default_reuse_decay_period")]
    pub reuse_decay_period: u64,
}

impl TmapConfig {
    /// Returns the default PC hash width.
    fn default_pc_hash_bits() -> u32 {
        defaults::PC_HASH_BITS
    }

    /// Returns the default seeded score.
    fn default_seed_score() -> i8 {
        defaults::SEED_SCORE
    }

    /// Returns the default seeding threshold.
    fn default_seed_threshold() -> u8 {
        defaults::SEED_THRESHOLD
    }

    /// Returns the default reuse decay period.
    fn default_reuse_decay_period() -> u64 {
        defaults::REUSE_DECAY_PERIOD
    }
}

impl Default for TmapConfig {
    fn default() -> Self {
        Self {
            pc_hash_bits: defaults::PC_HASH_BITS,
            seed_score: defaults::SEED_SCORE,
            seed_threshold: defaults::SEED_THRESHOLD,
            reuse_decay_period: defaults::REUSE_DECAY_PERIOD,
        }
    }
}
