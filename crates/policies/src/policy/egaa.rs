//! Entropy-Guided Adaptive Aging (EGAA) Replacement Strategy.
//!
//! Each line carries an aging counter and an entropy accumulator. The
//! accumulator tracks how variable the addresses and PCs touching the line
//! have been: on every access the Hamming distance between the previous and
//! current address (and, at half weight, PC) is added, then the total is
//! halved so stale variability fades after a phase change. Lines with high
//! entropy age faster than their neighbors, and the victim is the line with
//! the highest entropy-scaled age.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `record_access()`: O(W) where W is the number of ways (associativity)
//!   - `select_victim()`: O(W)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Best Case:** Phase-structured workloads where erratic lines should
//!   drain out quickly
//! - **Worst Case:** Uniformly random accesses (entropy saturates everywhere
//!   and the score degenerates to plain aging)

use super::ReplacementStrategy;
use crate::common::{AccessUpdate, LineState, VictimQuery};
use crate::config::EgaaConfig;
use crate::stats::{mean, Metric, PolicyReport};

/// Per-line EGAA metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct EgaaLine {
    /// Aging counter; 0 = just touched, saturates at 255.
    pub age: u8,
    /// Entropy accumulator; saturates at 255, halved on every access.
    pub entropy: u8,
    /// Last physical address observed by this line.
    pub last_addr: u64,
    /// Last PC observed by this line.
    pub last_pc: u64,
}

/// EGAA strategy state.
#[derive(Clone, Debug)]
pub struct EgaaStrategy {
    /// Per-line records, indexed `set * ways + way`.
    lines: Vec<EgaaLine>,
    /// Number of ways in the cache.
    ways: usize,
    /// Tuning constants fixed at construction.
    config: EgaaConfig,
}

impl EgaaStrategy {
    /// Creates a new EGAA instance with zeroed metadata.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    /// * `config` - Tuning constants (entropy shift, base aging step).
    pub fn new(sets: usize, ways: usize, config: EgaaConfig) -> Self {
        Self {
            lines: vec![EgaaLine::default(); sets * ways],
            ways,
            config,
        }
    }

    /// Returns a copy of one line's metadata, for diagnostics and tests.
    pub fn line(&self, set: usize, way: usize) -> EgaaLine {
        self.lines[set * self.ways + way]
    }

    /// Entropy-scaled age used as the eviction score.
    fn effective_age(line: &EgaaLine) -> u32 {
        u32::from(line.age) * (256 + u32::from(line.entropy)) / 256
    }
}

impl ReplacementStrategy for EgaaStrategy {
    fn name(&self) -> &'static str {
        "egaa"
    }

    /// Picks the way with the highest effective age.
    ///
    /// Empty lines win immediately: the lowest invalid way is returned before
    /// any score is compared.
    fn select_victim(&self, query: &VictimQuery, lines: &[LineState]) -> usize {
        let base = query.set * self.ways;
        let mut victim = 0;
        let mut max_score = 0;

        for (way, state) in lines.iter().enumerate() {
            if !state.valid {
                return way;
            }
            let score = Self::effective_age(&self.lines[base + way]);
            if score > max_score {
                max_score = score;
                victim = way;
            }
        }
        victim
    }

    /// Ages every sibling, then refreshes the accessed line.
    ///
    /// Sibling aging is entropy-weighted: a line's step is the base step plus
    /// its entropy shifted down by the configured amount. The accessed line
    /// restarts at age 0 and folds the observed address/PC deltas into its
    /// entropy (saturating add, then halve).
    fn record_access(&mut self, update: &AccessUpdate) {
        let base = update.set * self.ways;

        for way in 0..self.ways {
            if way == update.way {
                continue;
            }
            let line = &mut self.lines[base + way];
            let step = self
                .config
                .age_step
                .saturating_add(line.entropy >> self.config.entropy_shift);
            line.age = line.age.saturating_add(step);
        }

        let line = &mut self.lines[base + update.way];
        line.age = 0;

        let delta_addr = (line.last_addr ^ update.paddr).count_ones();
        let delta_pc = (line.last_pc ^ update.pc).count_ones();
        let delta = delta_addr + (delta_pc >> 1);

        line.entropy = (((u32::from(line.entropy) + delta).min(255)) >> 1) as u8;
        line.last_addr = update.paddr;
        line.last_pc = update.pc;
    }

    fn report(&self) -> PolicyReport {
        PolicyReport {
            strategy: self.name(),
            metrics: vec![
                Metric {
                    name: "avg_age",
                    value: mean(self.lines.iter().map(|line| f64::from(line.age))),
                },
                Metric {
                    name: "avg_entropy",
                    value: mean(self.lines.iter().map(|line| f64::from(line.entropy))),
                },
            ],
        }
    }
}
