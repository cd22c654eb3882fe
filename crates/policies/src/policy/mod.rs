//! Replacement strategies and the driver that hosts them.
//!
//! Implements five interchangeable scoring/aging rules for victim selection
//! in a set-associative LLC.
//!
//! # Strategies
//!
//! - `Egaa`: Entropy-guided adaptive aging.
//! - `ChronoEntropy`: Packed recency/decay-clock counters with reseeding.
//! - `Dac`: Decayed adaptive counting.
//! - `Tmap`: Temporal marginality with reuse quantization.
//! - `Caar`: Conflict-aware aging.

/// Conflict-aware aging replacement strategy.
pub mod caar;

/// ChronoEntropy replacement strategy.
pub mod chrono_entropy;

/// Decayed adaptive counting replacement strategy.
pub mod dac;

/// Entropy-guided adaptive aging replacement strategy.
pub mod egaa;

/// Temporal-marginality replacement strategy.
pub mod tmap;

pub use caar::CaarStrategy;
pub use chrono_entropy::ChronoStrategy;
pub use dac::DacStrategy;
pub use egaa::EgaaStrategy;
pub use tmap::TmapStrategy;

use std::fmt;

use crate::common::{AccessUpdate, ConfigError, LineState, VictimQuery, Xorshift64};
use crate::config::{PolicyConfig, StrategyKind};
use crate::stats::PolicyReport;

/// Trait for replacement strategies.
///
/// A strategy owns the per-line metadata for the whole cache and implements
/// one complete scoring + update rule. All metadata is allocated and zeroed
/// at construction; a slot's record is reborn on every fill and never
/// outlives its line's occupancy.
pub trait ReplacementStrategy: Send + Sync {
    /// Short lowercase strategy name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Selects a victim way for a miss in `query.set`.
    ///
    /// `lines` holds one entry per way, in way order. Selection is read-only
    /// and deterministic: ties resolve to the lowest way encountered in a
    /// left-to-right scan. Strategies with an empty-line fast path return the
    /// lowest invalid way before scoring anything.
    fn select_victim(&self, query: &VictimQuery, lines: &[LineState]) -> usize;

    /// Records one completed access (hit or fill) for `update.way`.
    ///
    /// Depending on the strategy this also ages or rewards sibling slots in
    /// the same set.
    fn record_access(&mut self, update: &AccessUpdate);

    /// Applies background decay on the host's heartbeat.
    ///
    /// Strategies without background decay keep the default no-op.
    fn tick(&mut self) {}

    /// Summarizes the metadata store into aggregate metrics.
    ///
    /// Must not mutate any metadata; callable at any time, including before
    /// the first access.
    fn report(&self) -> PolicyReport;
}

/// One replacement-policy instance bound to a fixed geometry and strategy.
///
/// The host calls in on four paths: victim selection on a miss, an access
/// update once per completed access, a heartbeat tick for background decay,
/// and read-only reporting. Construction allocates and zeroes every metadata
/// record, so a freshly built instance is fully initialized.
///
/// `record_access` must be called exactly once per completed access, and on
/// the miss path the `way` it carries must come from a preceding
/// `select_victim` for the same set; the module does not detect protocol
/// misuse beyond its range checks.
pub struct LlcReplacement {
    num_sets: usize,
    ways: usize,
    strategy: Box<dyn ReplacementStrategy>,
}

impl LlcReplacement {
    /// Builds a policy instance from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns any [`ConfigError`] the configuration fails validation with.
    pub fn new(config: &PolicyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let sets = config.num_sets;
        let ways = config.ways;

        let strategy: Box<dyn ReplacementStrategy> = match config.strategy {
            StrategyKind::Egaa => Box::new(EgaaStrategy::new(sets, ways, config.egaa)),
            StrategyKind::ChronoEntropy => Box::new(ChronoStrategy::new(
                sets,
                ways,
                config.chrono,
                Xorshift64::new(config.seed),
            )),
            StrategyKind::Dac => Box::new(DacStrategy::new(sets, ways)),
            StrategyKind::Tmap => Box::new(TmapStrategy::new(sets, ways, config.tmap)),
            StrategyKind::Caar => Box::new(CaarStrategy::new(sets, ways)),
        };

        tracing::info!(
            sets,
            ways,
            strategy = strategy.name(),
            "replacement state initialized"
        );

        Ok(Self {
            num_sets: sets,
            ways,
            strategy,
        })
    }

    /// Number of sets this instance was built for.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity this instance was built for.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Selects the way to evict for a miss described by `query`.
    ///
    /// The returned way is always in `[0, ways)`. Read-only: repeated calls
    /// against unchanged state return the same way.
    ///
    /// # Panics
    ///
    /// Panics if `query.set` is out of range or `lines` does not hold exactly
    /// one entry per way. These are host contract violations, fatal by
    /// design.
    pub fn select_victim(&self, query: &VictimQuery, lines: &[LineState]) -> usize {
        assert!(
            query.set < self.num_sets,
            "set index {} out of range for {} sets",
            query.set,
            self.num_sets
        );
        assert!(
            lines.len() == self.ways,
            "expected {} line states, got {}",
            self.ways,
            lines.len()
        );
        let way = self.strategy.select_victim(query, lines);
        debug_assert!(way < self.ways);
        way
    }

    /// Records one completed access.
    ///
    /// Must be called exactly once per access, after the host has resolved
    /// the hit or refilled the slot.
    ///
    /// # Panics
    ///
    /// Panics if `update.set` or `update.way` is out of range.
    pub fn record_access(&mut self, update: &AccessUpdate) {
        assert!(
            update.set < self.num_sets,
            "set index {} out of range for {} sets",
            update.set,
            self.num_sets
        );
        assert!(
            update.way < self.ways,
            "way index {} out of range for {} ways",
            update.way,
            self.ways
        );
        self.strategy.record_access(update);
    }

    /// Applies background decay; a no-op for strategies without any.
    pub fn tick(&mut self) {
        self.strategy.tick();
    }

    /// Produces aggregate metrics for the whole metadata store.
    pub fn report(&self) -> PolicyReport {
        self.strategy.report()
    }

    /// Emits the current aggregates at debug level for periodic diagnostics.
    pub fn log_heartbeat(&self) {
        let report = self.strategy.report();
        tracing::debug!(summary = %report, "replacement heartbeat");
    }
}

impl fmt::Debug for LlcReplacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlcReplacement")
            .field("num_sets", &self.num_sets)
            .field("ways", &self.ways)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
