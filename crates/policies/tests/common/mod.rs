//! Shared builders for boundary records used across the test suite.

use replacement_core::{AccessKind, AccessUpdate, LineState, VictimQuery};

/// A fully populated set: every way valid with a distinct line address.
pub fn valid_set(ways: usize) -> Vec<LineState> {
    (0..ways)
        .map(|way| LineState {
            valid: true,
            address: 0x8000_0000 + (way as u64) * 0x40,
        })
        .collect()
}

/// A victim query for `set` with neutral access context.
pub fn query(set: usize) -> VictimQuery {
    VictimQuery {
        core: 0,
        set,
        pc: 0,
        paddr: 0,
        kind: AccessKind::Load,
    }
}

/// A completed demand access with full control of the interesting fields.
pub fn access(set: usize, way: usize, pc: u64, paddr: u64, hit: bool) -> AccessUpdate {
    AccessUpdate {
        core: 0,
        set,
        way,
        paddr,
        pc,
        victim_addr: 0,
        kind: AccessKind::Load,
        hit,
    }
}

/// A hit on `(set, way)`.
pub fn hit(set: usize, way: usize, pc: u64, paddr: u64) -> AccessUpdate {
    access(set, way, pc, paddr, true)
}

/// A miss-path fill of `(set, way)`.
pub fn fill(set: usize, way: usize, pc: u64, paddr: u64) -> AccessUpdate {
    access(set, way, pc, paddr, false)
}

/// A fill with an explicit access kind (write-back paths and the like).
pub fn fill_kind(set: usize, way: usize, pc: u64, kind: AccessKind) -> AccessUpdate {
    AccessUpdate {
        core: 0,
        set,
        way,
        paddr: 0,
        pc,
        victim_addr: 0,
        kind,
        hit: false,
    }
}
