//! Temporal Marginality Replacement Strategy (T-MAP).
//!
//! Each line carries a signed temporal-marginality score and a 2-bit reuse
//! quantizer. Hits reward the line, with the reward growing geometrically as
//! the quantizer rises; any miss in a set fast-ages every resident line by
//! one. New lines are seeded from a small per-PC history table: a PC whose
//! lines keep re-hitting quickly earns its next fill a positive starting
//! score instead of zero. The victim is always the lowest-scored line.
//!
//! Write-back fills are excluded from the PC history (they are not demand
//! fills), but they still trigger the set-wide fast aging and slot seeding.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `record_access()`: O(W) on misses and decay sweeps, O(1) on plain hits
//!   - `select_victim()`: O(W)
//! - **Space Complexity:** O(S × W) plus the fixed `2^hash_bits` PC table
//! - **Best Case:** Pointer-chasing with stable per-PC reuse distances
//! - **Worst Case:** Streaming writes (history resets keep every seed at 0)

use super::ReplacementStrategy;
use crate::common::{AccessKind, AccessUpdate, LineState, VictimQuery};
use crate::config::TmapConfig;
use crate::stats::{mean, Metric, PolicyReport};

/// Floor of the temporal-marginality score.
const SCORE_FLOOR: i8 = -32;
/// Ceiling of the temporal-marginality score.
const SCORE_CEIL: i8 = 31;
/// Ceiling of the reuse quantizer.
const REUSE_CEIL: u8 = 3;
/// Ceiling of a PC's consecutive-short-hit count.
const SHORT_HIT_CEIL: u8 = 3;

/// Per-line T-MAP metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct TmapLine {
    /// Temporal-marginality score, bounded to −32..=31.
    pub score: i8,
    /// Reuse quantizer, bounded to 0..=3.
    pub reuse: u8,
}

/// T-MAP strategy state.
#[derive(Clone, Debug)]
pub struct TmapStrategy {
    /// Per-line records, indexed `set * ways + way`.
    lines: Vec<TmapLine>,
    /// Per-set access counters driving the slow reuse decay.
    set_accesses: Vec<u64>,
    /// Consecutive-short-hit counts keyed by hashed PC.
    pc_history: Vec<u8>,
    /// Number of ways in the cache.
    ways: usize,
    /// Mask extracting the hashed-PC key.
    pc_hash_mask: u64,
    /// Tuning constants fixed at construction.
    config: TmapConfig,
}

impl TmapStrategy {
    /// Creates a new T-MAP instance with zeroed metadata and history.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    /// * `config` - Tuning constants (hash width, seeding, decay cadence).
    pub fn new(sets: usize, ways: usize, config: TmapConfig) -> Self {
        let table_len = 1_usize << config.pc_hash_bits;
        Self {
            lines: vec![TmapLine::default(); sets * ways],
            set_accesses: vec![0; sets],
            pc_history: vec![0; table_len],
            ways,
            pc_hash_mask: (table_len as u64) - 1,
            config,
        }
    }

    /// Returns a copy of one line's metadata, for diagnostics and tests.
    pub fn line(&self, set: usize, way: usize) -> TmapLine {
        self.lines[set * self.ways + way]
    }

    /// Hashes a PC down to its history-table key.
    const fn pc_key(&self, pc: u64) -> usize {
        (pc & self.pc_hash_mask) as usize
    }
}

impl ReplacementStrategy for TmapStrategy {
    fn name(&self) -> &'static str {
        "tmap"
    }

    /// Picks the way with the lowest temporal-marginality score.
    fn select_victim(&self, query: &VictimQuery, lines: &[LineState]) -> usize {
        let base = query.set * self.ways;
        let mut victim = 0;
        let mut min_score = i8::MAX;

        for way in 0..lines.len() {
            let score = self.lines[base + way].score;
            if score < min_score {
                min_score = score;
                victim = way;
            }
        }
        victim
    }

    fn record_access(&mut self, update: &AccessUpdate) {
        let base = update.set * self.ways;
        self.set_accesses[update.set] += 1;

        if update.hit {
            let line = &mut self.lines[base + update.way];
            let reward: i8 = if line.reuse > 1 {
                2 << (line.reuse - 2)
            } else {
                1
            };
            line.score = line.score.saturating_add(reward).min(SCORE_CEIL);
            if line.reuse < REUSE_CEIL {
                line.reuse += 1;
            }
        } else {
            // Any miss in the set fast-ages every resident line, the refilled
            // slot included; its seed below overwrites the decrement.
            for way in 0..self.ways {
                let line = &mut self.lines[base + way];
                if line.score > SCORE_FLOOR {
                    line.score -= 1;
                }
            }

            let short_hits = self.pc_history[self.pc_key(update.pc)];
            let line = &mut self.lines[base + update.way];
            line.score = if short_hits >= self.config.seed_threshold {
                self.config.seed_score
            } else {
                0
            };
            line.reuse = 0;
        }

        if self.set_accesses[update.set] & (self.config.reuse_decay_period - 1) == 0 {
            for way in 0..self.ways {
                let line = &mut self.lines[base + way];
                line.reuse = line.reuse.saturating_sub(1);
            }
        }

        // Write-back fills carry no reuse signal for the filling PC.
        if !update.hit && update.kind == AccessKind::Writeback {
            return;
        }
        let key = self.pc_key(update.pc);
        if update.hit {
            let score = self.lines[base + update.way].score;
            if score > 0 && self.pc_history[key] < SHORT_HIT_CEIL {
                self.pc_history[key] += 1;
            }
        } else {
            self.pc_history[key] = 0;
        }
    }

    fn report(&self) -> PolicyReport {
        PolicyReport {
            strategy: self.name(),
            metrics: vec![
                Metric {
                    name: "avg_score",
                    value: mean(self.lines.iter().map(|line| f64::from(line.score))),
                },
                Metric {
                    name: "avg_reuse",
                    value: mean(self.lines.iter().map(|line| f64::from(line.reuse))),
                },
            ],
        }
    }
}
