//! Territory engine for Lugal.
//!
//! Implements incremental territory tracking:
//! - Grid of valued cells with mutable owners
//! - Ledger of per-civilisation aggregates (value, fields, border edges)
//! - Border groups: an order-statistics index over the ledger
//! - World: the ownership mutator and the best-score query
//! - Invariant checks and brute-force references for cross-checking

mod grid;
mod groups;
mod invariants;
mod ledger;
mod reference;
mod world;

pub use grid::{Cell, Coord, Grid};
pub use groups::{BorderGroups, ValueBag};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use ledger::{Aggregate, CivId, Ledger};
pub use reference::{best_score_from_grid, best_score_scan};
pub use world::World;
