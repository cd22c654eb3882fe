//! Replacement policies for a trace-driven set-associative LLC simulator.
//!
//! This crate implements the replacement side of a simulated last-level cache.
//! The host simulator owns the tag/data array and the access trace; this crate
//! owns the auxiliary per-line metadata used to pick victims and age lines. It
//! provides:
//! 1. **Strategies:** Five interchangeable scoring/aging rules (EGAA,
//!    ChronoEntropy, DAC, T-MAP, CAAR) behind one trait.
//! 2. **Driver:** A strategy-agnostic unit handling victim selection, access
//!    updates, background decay, and contract checks.
//! 3. **Configuration:** Hierarchical, JSON-deserializable settings with
//!    validated geometry and per-strategy tuning constants.
//! 4. **Reporting:** Read-only aggregate metrics for end-of-run and heartbeat
//!    diagnostics.
//!
//! The host drives one access at a time: `select_victim` on a miss,
//! `record_access` once per completed access, `tick` on its own heartbeat,
//! and `report` at the end of the run. All calls are synchronous and the
//! module holds no notion of time beyond the counters it is handed.

/// Common types shared across the crate (access kinds, boundary records, RNG).
pub mod common;
/// Policy configuration (defaults, strategy selection, validation).
pub mod config;
/// The strategy trait, the five variants, and the driver.
pub mod policy;
/// Aggregate metric reporting.
pub mod stats;

/// Boundary types exchanged with the host on every call.
pub use crate::common::{AccessKind, AccessUpdate, LineState, VictimQuery};
/// Deterministic generator used wherever a strategy needs randomness.
pub use crate::common::Xorshift64;
/// Construction-time validation failures.
pub use crate::common::ConfigError;
/// Root configuration type; use `PolicyConfig::default()` or deserialize from JSON.
pub use crate::config::{PolicyConfig, StrategyKind};
/// One policy instance bound to a fixed geometry and strategy.
pub use crate::policy::{LlcReplacement, ReplacementStrategy};
/// Aggregate metrics produced by [`LlcReplacement::report`].
pub use crate::stats::PolicyReport;
