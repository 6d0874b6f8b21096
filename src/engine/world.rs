//! World state: the grid plus all incremental aggregate structures.
//!
//! All mutation flows through [`World::apply_owner_change`], which keeps the
//! ledger and the border-group index consistent around every single-cell
//! ownership change. Queries never mutate.

use std::collections::BTreeSet;

use crate::engine::{BorderGroups, CivId, Coord, Grid, Ledger};
use crate::error::{EngineError, EngineResult};

/// Complete engine state for one contest case.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    /// Raw cell state.
    grid: Grid,
    /// Per-civilisation aggregates.
    ledger: Ledger,
    /// Order-statistics index over the ledger.
    groups: BorderGroups,
}

impl World {
    /// Build a world from value and initial-owner grids.
    ///
    /// Ownership is replayed cell by cell in row-major order through the
    /// same delta bookkeeping the mutator uses, starting from an entirely
    /// unowned grid; the group index is built once from the final
    /// aggregates.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShapeMismatch`] if the grids are not the same
    /// non-empty square shape.
    pub fn new(values: &[Vec<i32>], owners: &[Vec<CivId>]) -> EngineResult<Self> {
        let mut world = Self::unowned(values)?;
        let n = world.grid.size();

        if owners.len() != usize::from(n)
            || owners.iter().any(|row| row.len() != usize::from(n))
        {
            return Err(EngineError::ShapeMismatch);
        }

        for x in 0..n {
            for y in 0..n {
                let owner = owners[usize::from(x)][usize::from(y)];
                world.reassign(Coord::new(x, y), Some(owner));
            }
        }

        let Self { ledger, groups, .. } = &mut world;
        for (_, agg) in ledger.iter() {
            groups.insert(agg.border_edges, agg.total_value);
        }

        Ok(world)
    }

    /// Build a world with every cell unowned.
    ///
    /// Best-score queries are undefined until at least one cell has been
    /// assigned through [`World::apply_owner_change`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShapeMismatch`] if `values` is not a
    /// non-empty square.
    pub fn unowned(values: &[Vec<i32>]) -> EngineResult<Self> {
        Ok(Self {
            grid: Grid::new(values)?,
            ledger: Ledger::new(),
            groups: BorderGroups::new(),
        })
    }

    /// Raw cell state.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Per-civilisation aggregates.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The border-group index.
    #[must_use]
    pub const fn groups(&self) -> &BorderGroups {
        &self.groups
    }

    /// Number of live civilisations.
    #[must_use]
    pub fn civ_count(&self) -> usize {
        self.ledger.len()
    }

    /// Apply the edge, value, and field deltas of re-owning one cell.
    ///
    /// Touches the grid and ledger only; group-index maintenance is the
    /// caller's responsibility. For each of the up to four incident edges,
    /// the old pairing is un-counted and the new pairing counted, for both
    /// endpoint owners; unowned endpoints drop out inside the ledger.
    fn reassign(&mut self, at: Coord, new_owner: Option<CivId>) {
        let old_owner = self.grid.owner(at);
        let (adjacent, count) = at.adjacent(self.grid.size());

        for neighbour in &adjacent[..usize::from(count)] {
            let neighbour_owner = self.grid.owner(*neighbour);

            if old_owner != neighbour_owner {
                self.ledger.adjust_borders(old_owner, -1);
                self.ledger.adjust_borders(neighbour_owner, -1);
            }
            if new_owner != neighbour_owner {
                self.ledger.adjust_borders(new_owner, 1);
                self.ledger.adjust_borders(neighbour_owner, 1);
            }
        }

        let value = i64::from(self.grid.value(at));
        self.ledger.adjust_value_and_fields(old_owner, -value, -1);
        self.ledger.adjust_value_and_fields(new_owner, value, 1);

        self.grid.set_owner(at, new_owner);
    }

    /// Transfer ownership of one cell to `new_owner`.
    ///
    /// Every civilisation whose aggregate can move — the cell's current
    /// owner, the new owner, and the owners of all adjacent cells — leaves
    /// the group index while still carrying its pre-change tuple, and
    /// re-enters with its fresh tuple afterwards. Civilisations whose field
    /// count reaches zero are erased instead of re-entering.
    ///
    /// Re-assigning a cell to its current owner is a state-preserving
    /// no-op.
    pub fn apply_owner_change(&mut self, at: Coord, new_owner: CivId) {
        debug_assert!(self.grid.in_bounds(at), "coordinate out of bounds");

        // A civilisation seen for the first time starts with a zeroed
        // aggregate indexed under border count 0, so it takes part in the
        // removal pass below like any established one.
        if !self.ledger.contains(new_owner) {
            self.ledger.ensure(new_owner);
            self.groups.insert(0, 0);
        }

        let mut impacted: BTreeSet<CivId> = BTreeSet::new();
        impacted.extend(self.grid.owner(at));
        impacted.insert(new_owner);
        let (adjacent, count) = at.adjacent(self.grid.size());
        for neighbour in &adjacent[..usize::from(count)] {
            impacted.extend(self.grid.owner(*neighbour));
        }

        // Stale (border, value) tuples must leave the index before any
        // aggregate moves.
        for &civ in &impacted {
            if let Some(agg) = self.ledger.get(civ) {
                self.groups.remove(agg.border_edges, agg.total_value);
            }
        }

        self.reassign(at, Some(new_owner));

        for &civ in &impacted {
            if self.ledger.has_no_fields(civ) {
                self.ledger.erase(civ);
            } else if let Some(agg) = self.ledger.get(civ) {
                self.groups.insert(agg.border_edges, agg.total_value);
            }
        }
    }

    /// Best score of `a*value + b*border + c*value*border` over all live
    /// civilisations.
    ///
    /// For a fixed border count the expression is monotone in value, so only
    /// one extreme member per group can win: the maximum when
    /// `a + c*border >= 0`, the minimum otherwise. One pass over the
    /// occupied groups therefore suffices.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyWorld`] if no civilisation exists;
    /// callers must apply at least one ownership assignment first.
    pub fn best_score(&self, a: i64, b: i64, c: i64) -> EngineResult<i64> {
        let mut best: Option<i64> = None;

        for (border, bag) in self.groups.iter() {
            let border = i64::from(border);
            let coef = a + c * border;

            let Some(value) = (if coef >= 0 { bag.max() } else { bag.min() }) else {
                continue;
            };

            let score = coef * value + b * border;
            best = Some(best.map_or(score, |current| current.max(score)));
        }

        best.ok_or(EngineError::EmptyWorld)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Aggregate;

    fn two_by_two() -> World {
        World::new(
            &[vec![1, 2], vec![3, 4]],
            &[vec![10, 10], vec![20, 20]],
        )
        .unwrap()
    }

    fn agg(world: &World, civ: CivId) -> Aggregate {
        *world.ledger().get(civ).expect("civilisation should be live")
    }

    #[test]
    fn test_initial_aggregates() {
        let world = two_by_two();

        assert_eq!(
            agg(&world, 10),
            Aggregate { total_value: 3, field_count: 2, border_edges: 2 }
        );
        assert_eq!(
            agg(&world, 20),
            Aggregate { total_value: 7, field_count: 2, border_edges: 2 }
        );

        // Both civilisations share one group.
        assert_eq!(world.groups().group_count(), 1);
        assert_eq!(world.groups().count_of(2, 3), 1);
        assert_eq!(world.groups().count_of(2, 7), 1);
    }

    #[test]
    fn test_initial_query_prefers_value() {
        let world = two_by_two();
        assert_eq!(world.best_score(1, 0, 0), Ok(7));
    }

    #[test]
    fn test_negative_coefficient_takes_group_minimum() {
        let world = two_by_two();
        // coef = -1 for every group, so the smallest total value wins.
        assert_eq!(world.best_score(-1, 0, 0), Ok(-3));
    }

    #[test]
    fn test_owner_change_updates_all_impacted() {
        let mut world = two_by_two();
        world.apply_owner_change(Coord::new(0, 0), 20);

        assert_eq!(
            agg(&world, 10),
            Aggregate { total_value: 2, field_count: 1, border_edges: 2 }
        );
        assert_eq!(
            agg(&world, 20),
            Aggregate { total_value: 8, field_count: 3, border_edges: 2 }
        );

        assert_eq!(world.best_score(1, 0, 0), Ok(8));
        assert_eq!(world.best_score(0, 1, 0), Ok(2));
    }

    #[test]
    fn test_civilisation_vanishes_at_zero_fields() {
        let mut world = two_by_two();
        world.apply_owner_change(Coord::new(0, 0), 20);
        world.apply_owner_change(Coord::new(0, 1), 20);

        assert!(world.ledger().get(10).is_none());
        assert_eq!(world.civ_count(), 1);
        assert_eq!(
            agg(&world, 20),
            Aggregate { total_value: 10, field_count: 4, border_edges: 0 }
        );

        // Sole owner of everything: group key 0, score is the grand total.
        assert_eq!(world.groups().count_of(0, 10), 1);
        assert_eq!(world.best_score(1, 0, 0), Ok(10));
    }

    #[test]
    fn test_civilisation_reappears_zeroed() {
        let mut world = two_by_two();
        world.apply_owner_change(Coord::new(0, 0), 20);
        world.apply_owner_change(Coord::new(0, 1), 20);
        world.apply_owner_change(Coord::new(0, 0), 10);

        assert_eq!(
            agg(&world, 10),
            Aggregate { total_value: 1, field_count: 1, border_edges: 2 }
        );
        assert_eq!(
            agg(&world, 20),
            Aggregate { total_value: 9, field_count: 3, border_edges: 2 }
        );
    }

    #[test]
    fn test_brand_new_owner_is_lazily_created() {
        let mut world = two_by_two();
        world.apply_owner_change(Coord::new(1, 1), 30);

        assert_eq!(
            agg(&world, 30),
            Aggregate { total_value: 4, field_count: 1, border_edges: 2 }
        );
        assert_eq!(world.civ_count(), 3);
    }

    #[test]
    fn test_reassignment_to_current_owner_is_noop() {
        let mut world = two_by_two();
        let before = world.clone();

        world.apply_owner_change(Coord::new(1, 0), 20);

        assert_eq!(world, before);
    }

    #[test]
    fn test_single_cell_grid_stays_in_group_zero() {
        let mut world = World::new(&[vec![5]], &[vec![7]]).unwrap();
        assert_eq!(
            agg(&world, 7),
            Aggregate { total_value: 5, field_count: 1, border_edges: 0 }
        );

        world.apply_owner_change(Coord::new(0, 0), 9);
        assert!(world.ledger().get(7).is_none());
        assert_eq!(agg(&world, 9).border_edges, 0);
        assert_eq!(world.groups().count_of(0, 5), 1);

        // coef = 3 + 5*0, score = 3*5 + 4*0.
        assert_eq!(world.best_score(3, 4, 5), Ok(15));
    }

    #[test]
    fn test_query_on_unowned_world_is_an_error() {
        let mut world = World::unowned(&[vec![5]]).unwrap();
        assert_eq!(world.best_score(1, 1, 1), Err(EngineError::EmptyWorld));

        world.apply_owner_change(Coord::new(0, 0), 1);
        assert_eq!(world.best_score(1, 1, 1), Ok(5));
    }

    #[test]
    fn test_shape_mismatch() {
        assert_eq!(
            World::new(&[vec![1, 2], vec![3, 4]], &[vec![1, 1]]),
            Err(EngineError::ShapeMismatch)
        );
        assert_eq!(
            World::new(&[vec![1, 2]], &[vec![1, 1]]),
            Err(EngineError::ShapeMismatch)
        );
    }

    #[test]
    fn test_large_coefficients_stay_in_range() {
        // |b| at the contest maximum against a border count of 2.
        let world = two_by_two();
        assert_eq!(
            world.best_score(0, 1_000_000_000_000, 0),
            Ok(2_000_000_000_000)
        );
        assert_eq!(
            world.best_score(10_000_000_000, -1_000_000_000_000, 10_000),
            Ok(10_000_000_000 * 7 + 10_000 * 7 * 2 - 2_000_000_000_000)
        );
    }
}
