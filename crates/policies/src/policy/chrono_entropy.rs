//! ChronoEntropy Replacement Strategy.
//!
//! Each line carries a single 16-bit combined counter packing a 5-bit recency
//! rank above an 11-bit decay clock. Hits increment the counter, fills reset
//! it to a mid-range bootstrap, and the victim is the line with the lowest
//! decay clock (ties broken on recency rank). When a counter saturates it is
//! reseeded: the rank is taken from how many distinct PCs have been observed
//! touching that slot by a sparse global sampler, and the clock is redrawn
//! from the deterministic generator.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `record_access()`: O(1)
//!   - `select_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(S × W) plus the bounded sampled-PC sets
//! - **Best Case:** Mixed workloads where saturation marks hot lines worth
//!   re-ranking
//! - **Worst Case:** Tiny traces (the sampler never fires, so every reseed
//!   rank is zero)

use super::ReplacementStrategy;
use crate::common::{AccessUpdate, LineState, VictimQuery, Xorshift64};
use crate::config::ChronoConfig;
use crate::stats::{mean, Metric, PolicyReport};

/// Bit position of the recency rank inside the combined counter.
const RANK_SHIFT: u16 = 11;
/// Mask of the decay-clock field (lower 11 bits).
const CLOCK_MASK: u16 = 0x7FF;
/// Mask of the recency-rank field after shifting (5 bits).
const RANK_MASK: u16 = 0x1F;

/// The two fields packed into one combined counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombinedCounter {
    /// Recency rank, 5 bits.
    pub recency_rank: u8,
    /// Decay clock, 11 bits.
    pub decay_clock: u16,
}

impl CombinedCounter {
    /// Unpacks a raw 16-bit counter.
    pub const fn unpack(raw: u16) -> Self {
        Self {
            recency_rank: ((raw >> RANK_SHIFT) & RANK_MASK) as u8,
            decay_clock: raw & CLOCK_MASK,
        }
    }
}

/// Bounded set of distinct PCs observed touching one sampled line.
///
/// The reseed rank clamps at 31, so the capacity bound only limits memory:
/// once full, further PCs are dropped.
#[derive(Clone, Debug, Default)]
struct PcSampleSet {
    pcs: Vec<u64>,
}

impl PcSampleSet {
    fn insert(&mut self, pc: u64, capacity: usize) {
        if self.pcs.len() < capacity && !self.pcs.contains(&pc) {
            self.pcs.push(pc);
        }
    }

    fn len(&self) -> usize {
        self.pcs.len()
    }
}

/// ChronoEntropy strategy state.
#[derive(Clone, Debug)]
pub struct ChronoStrategy {
    /// Raw combined counters, indexed `set * ways + way`.
    meta: Vec<u16>,
    /// Sampled-PC sets, one per line, same indexing.
    pc_sets: Vec<PcSampleSet>,
    /// Number of sets in the cache.
    num_sets: usize,
    /// Number of ways in the cache.
    ways: usize,
    /// Global access counter driving the sparse sampler.
    accesses: u64,
    /// Tuning constants fixed at construction.
    config: ChronoConfig,
    /// Deterministic generator for sampling and reseeding.
    rng: Xorshift64,
}

impl ChronoStrategy {
    /// Creates a new ChronoEntropy instance with zeroed metadata.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    /// * `config` - Tuning constants (sampling period, bootstrap, PC bound).
    /// * `rng` - Seeded generator; determinism of the whole run follows from
    ///   the seed.
    pub fn new(sets: usize, ways: usize, config: ChronoConfig, rng: Xorshift64) -> Self {
        Self {
            meta: vec![0; sets * ways],
            pc_sets: vec![PcSampleSet::default(); sets * ways],
            num_sets: sets,
            ways,
            accesses: 0,
            config,
            rng,
        }
    }

    /// Returns one line's unpacked counter, for diagnostics and tests.
    pub fn counter(&self, set: usize, way: usize) -> CombinedCounter {
        CombinedCounter::unpack(self.meta[set * self.ways + way])
    }

    /// Total accesses recorded so far.
    pub const fn accesses(&self) -> u64 {
        self.accesses
    }
}

impl ReplacementStrategy for ChronoStrategy {
    fn name(&self) -> &'static str {
        "chrono_entropy"
    }

    /// Picks the way with the lowest decay clock, then lowest recency rank.
    fn select_victim(&self, query: &VictimQuery, lines: &[LineState]) -> usize {
        let base = query.set * self.ways;
        let mut victim = 0;
        let mut min_clock = CLOCK_MASK;
        let mut min_rank = RANK_MASK as u8;

        for way in 0..lines.len() {
            let counter = CombinedCounter::unpack(self.meta[base + way]);
            if counter.decay_clock < min_clock
                || (counter.decay_clock == min_clock && counter.recency_rank < min_rank)
            {
                min_clock = counter.decay_clock;
                min_rank = counter.recency_rank;
                victim = way;
            }
        }
        victim
    }

    /// Advances the counter for the touched line and reseeds on saturation.
    ///
    /// Once per sampling period, a pseudo-random `(set, way)` records the
    /// current PC into its sampled-PC set; those set sizes later become
    /// reseed ranks.
    fn record_access(&mut self, update: &AccessUpdate) {
        self.accesses += 1;
        if self.accesses & (self.config.sample_period - 1) == 0 {
            let set = self.rng.below(self.num_sets as u64) as usize;
            let way = self.rng.below(self.ways as u64) as usize;
            self.pc_sets[set * self.ways + way].insert(update.pc, self.config.pc_set_capacity);
            tracing::trace!(set, way, pc = update.pc, "sampled PC");
        }

        let idx = update.set * self.ways + update.way;
        let mut counter = if update.hit {
            self.meta[idx].saturating_add(1)
        } else {
            self.config.bootstrap
        };

        if counter == u16::MAX {
            let rank = self.pc_sets[idx].len().min(31) as u16;
            counter = (rank << RANK_SHIFT) | (self.rng.next_u64() as u16 & CLOCK_MASK);
            tracing::debug!(
                set = update.set,
                way = update.way,
                rank,
                "combined counter saturated, reseeding"
            );
        }
        self.meta[idx] = counter;
    }

    fn report(&self) -> PolicyReport {
        PolicyReport {
            strategy: self.name(),
            metrics: vec![
                Metric {
                    name: "accesses",
                    value: self.accesses as f64,
                },
                Metric {
                    name: "avg_decay_clock",
                    value: mean(
                        self.meta
                            .iter()
                            .map(|&raw| f64::from(CombinedCounter::unpack(raw).decay_clock)),
                    ),
                },
                Metric {
                    name: "avg_recency_rank",
                    value: mean(
                        self.meta
                            .iter()
                            .map(|&raw| f64::from(CombinedCounter::unpack(raw).recency_rank)),
                    ),
                },
            ],
        }
    }
}
