//! Configuration error definitions.
//!
//! Construction is the only fallible surface of this crate. Once a policy
//! instance exists, the remaining failure modes are host contract violations
//! (out-of-range coordinates, wrong slice lengths) and those are fatal
//! assertions by design — there is no sensible recovery for a bad cache
//! coordinate mid-simulation.

use thiserror::Error;

/// Reasons a [`PolicyConfig`](crate::config::PolicyConfig) is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Set count and associativity must both be nonzero.
    #[error("cache geometry must be nonzero, got {sets} sets x {ways} ways")]
    ZeroGeometry {
        /// Configured number of sets.
        sets: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// Cadence values are used as bitmasks and must be powers of two.
    #[error("{name} must be a nonzero power of two, got {value}")]
    BadCadence {
        /// Which cadence field was rejected.
        name: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// The sampled-PC sets must be allowed to hold at least one entry.
    #[error("sampled-PC set capacity must be nonzero")]
    ZeroPcSetCapacity,

    /// The PC history table is sized as `2^bits` entries.
    #[error("PC hash width must be between 1 and {max} bits, got {bits}")]
    PcHashWidth {
        /// The rejected width.
        bits: u32,
        /// Largest accepted width.
        max: u32,
    },

    /// The configuration text was not valid JSON for [`PolicyConfig`].
    ///
    /// [`PolicyConfig`]: crate::config::PolicyConfig
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
