//! Brute-force reference scorers used for cross-checking.
//!
//! Neither of these belongs on a hot path: the ledger scan is what the
//! group index exists to avoid, and the grid recomputation exists precisely
//! because it shares no incremental state with the engine, making it an
//! independent oracle for differential tests.

use std::collections::BTreeMap;

use crate::engine::{CivId, Grid, Ledger};

/// The raw objective for one civilisation.
const fn score(value: i64, border: i64, a: i64, b: i64, c: i64) -> i64 {
    a * value + b * border + c * value * border
}

/// Best score by a linear scan over the incremental aggregates.
///
/// O(#civilisations) per call. Returns `None` when the ledger is empty.
#[must_use]
pub fn best_score_scan(ledger: &Ledger, a: i64, b: i64, c: i64) -> Option<i64> {
    ledger
        .iter()
        .map(|(_, agg)| score(agg.total_value, i64::from(agg.border_edges), a, b, c))
        .max()
}

/// Best score recomputed from the grid alone.
///
/// O(n²) per call, ignoring all incremental state. Border incidences
/// against unowned cells count, matching the engine's bookkeeping.
/// Returns `None` when no cell is owned.
#[must_use]
pub fn best_score_from_grid(grid: &Grid, a: i64, b: i64, c: i64) -> Option<i64> {
    let mut totals: BTreeMap<CivId, (i64, i64)> = BTreeMap::new();

    for (at, cell) in grid.iter() {
        let Some(owner) = cell.owner else { continue };

        let entry = totals.entry(owner).or_insert((0, 0));
        entry.0 += i64::from(cell.value);

        let (adjacent, count) = at.adjacent(grid.size());
        for neighbour in &adjacent[..usize::from(count)] {
            if grid.owner(*neighbour) != Some(owner) {
                entry.1 += 1;
            }
        }
    }

    totals
        .values()
        .map(|&(value, border)| score(value, border, a, b, c))
        .max()
}
