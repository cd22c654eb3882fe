//! Conflict-Aware Aging Replacement Strategy (CAAR).
//!
//! A recency scheme with a contention twist. Hits behave like a stack
//! promotion: the touched line drops to age 0 and every sibling that was at
//! least as recently used ages by one. Each slot also carries a conflict
//! counter meant to record how often it has been the eviction target, and the
//! victim score weights age by `1 + conflicts / (conflicts + 1)` so contested
//! slots drain faster. Empty lines are claimed before any scoring.
//!
//! Scores are compared by exact integer cross-multiplication:
//! `age * (2c + 1) / (c + 1)` ranks the same as the fractional form without
//! touching floating point.

use super::ReplacementStrategy;
use crate::common::{AccessUpdate, LineState, VictimQuery};
use crate::stats::{mean, Metric, PolicyReport};

/// Per-line CAAR metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaarLine {
    /// Recency age; 0 = most recently used, saturates at 255.
    pub age: u8,
    /// Times this slot has been chosen as a conflict-eviction target.
    pub conflicts: u8,
}

/// CAAR strategy state.
#[derive(Clone, Debug)]
pub struct CaarStrategy {
    /// Per-line records, indexed `set * ways + way`.
    lines: Vec<CaarLine>,
    /// Number of ways in the cache.
    ways: usize,
}

impl CaarStrategy {
    /// Creates a new CAAR instance with zeroed metadata.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            lines: vec![CaarLine::default(); sets * ways],
            ways,
        }
    }

    /// Returns a copy of one line's metadata, for diagnostics and tests.
    pub fn line(&self, set: usize, way: usize) -> CaarLine {
        self.lines[set * self.ways + way]
    }

    /// Whether `a` outscores `b` under the contention-weighted age.
    ///
    /// `age * (1 + c/(c+1))` equals `age * (2c+1) / (c+1)`; cross-multiplying
    /// keeps the comparison exact. The products stay far below `u32::MAX` for
    /// 8-bit fields.
    fn outscores(a: CaarLine, b: CaarLine) -> bool {
        let lhs = u32::from(a.age) * (2 * u32::from(a.conflicts) + 1) * (u32::from(b.conflicts) + 1);
        let rhs = u32::from(b.age) * (2 * u32::from(b.conflicts) + 1) * (u32::from(a.conflicts) + 1);
        lhs > rhs
    }
}

impl ReplacementStrategy for CaarStrategy {
    fn name(&self) -> &'static str {
        "caar"
    }

    /// Picks the way with the highest contention-weighted age.
    ///
    /// Empty lines win immediately: the lowest invalid way is returned before
    /// any score is compared.
    fn select_victim(&self, query: &VictimQuery, lines: &[LineState]) -> usize {
        let base = query.set * self.ways;
        let mut victim = 0;

        for (way, state) in lines.iter().enumerate() {
            if !state.valid {
                return way;
            }
            if Self::outscores(self.lines[base + way], self.lines[base + victim]) {
                victim = way;
            }
        }
        victim
    }

    fn record_access(&mut self, update: &AccessUpdate) {
        let base = update.set * self.ways;

        if update.hit {
            // Stack shift: everything at least as recent as the touched way
            // ages by one, then the touched way becomes most recent.
            let old_age = self.lines[base + update.way].age;
            for way in 0..self.ways {
                if way == update.way {
                    continue;
                }
                let line = &mut self.lines[base + way];
                if line.age <= old_age {
                    line.age = line.age.saturating_add(1);
                }
            }
            self.lines[base + update.way].age = 0;
        } else {
            // The way passed on a miss is the victim being overwritten.
            // TODO: the conflict bump below is erased by the rebirth reset,
            // so the score's conflict term never engages; decide whether
            // fills should carry the tally forward.
            let line = &mut self.lines[base + update.way];
            line.conflicts = line.conflicts.saturating_add(1);

            line.age = 0;
            line.conflicts = 0;
        }
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
                    name: "avg_conflicts",
                    value: mean(self.lines.iter().map(|line| f64::from(line.conflicts))),
                },
            ],
        }
    }
}
