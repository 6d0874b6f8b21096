//! Engine invariants - consistency checks that detect bookkeeping bugs.
//!
//! The incremental structures must always agree with a from-scratch
//! recomputation over the grid. These checks should NEVER trigger in a
//! correct engine; if they do, the mutator's choreography is broken.

use std::collections::BTreeMap;
use std::fmt;

use crate::engine::{Aggregate, CivId, World};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Recompute every civilisation's aggregate directly from the grid.
fn recompute_aggregates(world: &World) -> BTreeMap<CivId, Aggregate> {
    let grid = world.grid();
    let mut recomputed: BTreeMap<CivId, Aggregate> = BTreeMap::new();

    for (at, cell) in grid.iter() {
        let Some(owner) = cell.owner else { continue };

        let agg = recomputed.entry(owner).or_default();
        agg.total_value += i64::from(cell.value);
        agg.field_count += 1;

        let (adjacent, count) = at.adjacent(grid.size());
        for neighbour in &adjacent[..usize::from(count)] {
            if grid.owner(*neighbour) != Some(owner) {
                agg.border_edges += 1;
            }
        }
    }

    recomputed
}

/// Check all engine invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
/// This is a full O(n²) recomputation, intended for tests and stress runs,
/// not the query hot path.
#[must_use]
pub fn check_invariants(world: &World) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let recomputed = recompute_aggregates(world);

    // Ledger must match the recomputation exactly, in both directions.
    for (&civ, expected) in &recomputed {
        match world.ledger().get(civ) {
            None => violations.push(InvariantViolation {
                message: format!("civilisation {civ} owns fields but has no ledger entry"),
            }),
            Some(actual) if actual != expected => violations.push(InvariantViolation {
                message: format!(
                    "civilisation {civ}: ledger {actual:?} != recomputed {expected:?}"
                ),
            }),
            Some(_) => {}
        }
    }

    for (civ, agg) in world.ledger().iter() {
        if agg.field_count == 0 {
            violations.push(InvariantViolation {
                message: format!("civilisation {civ} has a zero-field ledger entry"),
            });
        }
        if !recomputed.contains_key(&civ) {
            violations.push(InvariantViolation {
                message: format!("ledger entry for {civ}, which owns no fields"),
            });
        }
    }

    // Every live civilisation must sit in exactly the group matching its
    // border count; the member-count equation rules out stray entries.
    for (civ, agg) in world.ledger().iter() {
        if world.groups().count_of(agg.border_edges, agg.total_value) == 0 {
            violations.push(InvariantViolation {
                message: format!(
                    "civilisation {civ} missing from group {} (value {})",
                    agg.border_edges, agg.total_value
                ),
            });
        }
    }

    let members = world.groups().member_count();
    let live = world.ledger().len() as u64;
    if members != live {
        violations.push(InvariantViolation {
            message: format!("group index holds {members} entries for {live} civilisations"),
        });
    }

    violations
}

/// Assert all engine invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with a detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(world: &World) {
    let violations = check_invariants(world);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Engine invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_world: &World) {}
