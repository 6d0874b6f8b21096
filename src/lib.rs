// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Lugal: a deterministic territory-scoring engine for grid contests.
//!
//! The core is incremental: single-cell ownership changes update
//! per-civilisation aggregates in amortised-logarithmic time, and an
//! order-statistics index grouped by border count answers
//! `max(a*value + b*border + c*value*border)` queries in time proportional
//! to the number of distinct border counts, not the number of
//! civilisations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     CLI / Contest I/O / Stress      │
//! ├─────────────────────────────────────┤
//! │   World (mutator + query)           │
//! ├─────────────────────────────────────┤
//! │   Grid · Ledger · BorderGroups      │
//! └─────────────────────────────────────┘
//! ```

pub mod contest;
pub mod engine;
pub mod error;
pub mod stress;
pub mod testgen;

pub use error::{EngineError, EngineResult};

// Re-export key engine types at crate root for convenience
pub use engine::{Aggregate, BorderGroups, Cell, CivId, Coord, Grid, Ledger, World};
