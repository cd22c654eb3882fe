//! Decayed Adaptive Counting Tests.
//!
//! Verifies the usage-counter lifecycle, least-used victim selection, and
//! the heartbeat decay sweep.

use proptest::prelude::*;

use replacement_core::policy::{DacStrategy, ReplacementStrategy};

use crate::common::{fill, hit, query, valid_set};

// ══════════════════════════════════════════════════════════
// 1. Counter lifecycle
// ══════════════════════════════════════════════════════════

/// Three hits, a refill, and one decay step: 0 -> 3 -> 1 -> 0.
#[test]
fn counter_lifecycle() {
    let mut policy = DacStrategy::new(1, 4);
    assert_eq!(policy.usage(0, 0), 0);

    for _ in 0..3 {
        policy.record_access(&hit(0, 0, 0x400, 0x40));
    }
    assert_eq!(policy.usage(0, 0), 3);

    policy.record_access(&fill(0, 0, 0x500, 0x80));
    assert_eq!(policy.usage(0, 0), 1);

    policy.tick();
    assert_eq!(policy.usage(0, 0), 0);
}

/// A refill restarts the count at one no matter how popular the old line was.
#[test]
fn refill_restarts_at_one() {
    let mut policy = DacStrategy::new(1, 2);
    for _ in 0..100 {
        policy.record_access(&hit(0, 1, 0x400, 0x40));
    }
    policy.record_access(&fill(0, 1, 0x900, 0x80));
    assert_eq!(policy.usage(0, 1), 1);
}

// ══════════════════════════════════════════════════════════
// 2. Victim selection
// ══════════════════════════════════════════════════════════

/// The least-used way loses; ties keep the lowest way.
#[test]
fn selects_least_used() {
    let mut policy = DacStrategy::new(1, 4);

    for way in 0..4 {
        policy.record_access(&fill(0, way, 0x400, 0x40));
    }
    policy.record_access(&hit(0, 0, 0x400, 0x40));
    for _ in 0..4 {
        policy.record_access(&hit(0, 3, 0x400, 0x40));
    }

    // Usage: [2, 1, 1, 5]; ways 1 and 2 tie, way 1 is scanned first.
    assert_eq!(policy.select_victim(&query(0), &valid_set(4)), 1);
}

/// Decay re-opens the gap between old and recent popularity.
#[test]
fn decay_forgets_old_popularity() {
    let mut policy = DacStrategy::new(1, 2);

    for _ in 0..8 {
        policy.record_access(&hit(0, 0, 0x400, 0x40));
    }
    policy.record_access(&hit(0, 1, 0x500, 0x80));
    // Usage [8, 1]: way 1 is the victim.
    assert_eq!(policy.select_victim(&query(0), &valid_set(2)), 1);

    for _ in 0..4 {
        policy.tick();
    }
    // Usage [0, 0] now; the tie collapses to way 0.
    assert_eq!(policy.select_victim(&query(0), &valid_set(2)), 0);
}

// ══════════════════════════════════════════════════════════
// 3. Decay sweep
// ══════════════════════════════════════════════════════════

proptest! {
    /// One tick exactly halves every counter in the store.
    #[test]
    fn tick_halves_every_counter(
        ops in proptest::collection::vec(
            (0_usize..4, 0_usize..4, any::<bool>()),
            0..128,
        ),
    ) {
        let mut policy = DacStrategy::new(4, 4);
        for (set, way, was_hit) in ops {
            if was_hit {
                policy.record_access(&hit(set, way, 0x400, 0x40));
            } else {
                policy.record_access(&fill(set, way, 0x400, 0x40));
            }
        }

        let before: Vec<u32> = (0..4)
            .flat_map(|set| (0..4).map(move |way| (set, way)))
            .map(|(set, way)| policy.usage(set, way))
            .collect();

        policy.tick();

        for (i, (set, way)) in (0..4)
            .flat_map(|set| (0..4).map(move |way| (set, way)))
            .enumerate()
        {
            prop_assert_eq!(policy.usage(set, way), before[i] >> 1);
        }
    }
}
