//! Common types shared across the replacement module.
//!
//! This module provides the building blocks the rest of the crate is written
//! against:
//! 1. **Boundary Records:** The per-access structures the host passes across
//!    the policy boundary (line states, victim queries, access updates).
//! 2. **Access Kinds:** Classification of memory accesses as seen by the LLC.
//! 3. **Error Handling:** Construction-time configuration errors.
//! 4. **Randomness:** A small deterministic generator for strategies that
//!    sample.

/// Boundary record and access-kind definitions.
pub mod data;

/// Configuration error types.
pub mod error;

/// Deterministic pseudo-random generation.
pub mod rng;

pub use data::{AccessKind, AccessUpdate, LineState, VictimQuery};
pub use error::ConfigError;
pub use rng::Xorshift64;
