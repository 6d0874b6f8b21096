//! Parallel differential stress testing.
//!
//! Each case is generated from its own seed, solved incrementally, and
//! after every applied event the engine's answer is compared against the
//! from-scratch grid recomputation. Cases run across rayon workers with a
//! fold/reduce local-accumulator pattern; nothing is shared in the hot
//! path. A failing seed reproduces the whole case deterministically.

use rayon::prelude::*;
use serde::Serialize;

use crate::engine::{World, best_score_from_grid, check_invariants};
use crate::testgen::{GenConfig, generate_case};

/// Parameters for one stress run.
#[derive(Debug, Clone, Copy)]
pub struct StressConfig {
    /// Number of cases to run.
    pub cases: u64,
    /// Seed of the first case; case i uses `base_seed + i`.
    pub base_seed: u64,
    /// Also run the full invariant checks after every event.
    pub deep: bool,
    /// Generation parameters shared by all cases.
    pub gen_config: GenConfig,
}

/// One disagreement between the engine and the reference.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Mismatch {
    /// Seed of the offending case.
    pub seed: u64,
    /// 0-based index of the offending query.
    pub query: usize,
    /// Reference answer.
    pub expected: i64,
    /// Engine answer.
    pub actual: i64,
}

/// Aggregated result of a stress run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StressOutcome {
    /// Cases completed.
    pub cases_run: u64,
    /// Queries compared against the reference.
    pub queries_checked: u64,
    /// Answer disagreements found.
    pub mismatches: Vec<Mismatch>,
    /// Invariant or setup failures found.
    pub failures: Vec<String>,
}

impl StressOutcome {
    /// Fold another outcome into this one.
    pub fn merge(&mut self, other: StressOutcome) {
        self.cases_run += other.cases_run;
        self.queries_checked += other.queries_checked;
        self.mismatches.extend(other.mismatches);
        self.failures.extend(other.failures);
    }

    /// Check whether the run found no problems.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty() && self.failures.is_empty()
    }
}

/// Run one generated case, accumulating problems into `outcome`.
fn run_case(seed: u64, gen_config: &GenConfig, deep: bool, outcome: &mut StressOutcome) {
    let case = match generate_case(seed, gen_config) {
        Ok(case) => case,
        Err(e) => {
            outcome.failures.push(format!("seed {seed}: {e}"));
            return;
        }
    };

    let Ok(mut world) = World::new(&case.values, &case.owners) else {
        outcome
            .failures
            .push(format!("seed {seed}: generated case failed to build"));
        return;
    };

    for (i, query) in case.queries.iter().enumerate() {
        world.apply_owner_change(query.at, query.new_owner);
        outcome.queries_checked += 1;

        let actual = world.best_score(query.a, query.b, query.c);
        let expected = best_score_from_grid(world.grid(), query.a, query.b, query.c);

        match (actual, expected) {
            (Ok(actual), Some(expected)) if actual == expected => {}
            (Ok(actual), Some(expected)) => {
                outcome.mismatches.push(Mismatch { seed, query: i, expected, actual });
            }
            (actual, expected) => {
                outcome.failures.push(format!(
                    "seed {seed} query {i}: engine {actual:?}, reference {expected:?}"
                ));
            }
        }

        if deep {
            for violation in check_invariants(&world) {
                outcome.failures.push(format!("seed {seed} query {i}: {violation}"));
            }
        }
    }

    outcome.cases_run += 1;
}

/// Run a full stress campaign across the rayon thread pool.
#[must_use]
pub fn run_stress(config: &StressConfig) -> StressOutcome {
    (0..config.cases)
        .into_par_iter()
        .fold(StressOutcome::default, |mut local, i| {
            let seed = config.base_seed.wrapping_add(i);
            run_case(seed, &config.gen_config, config.deep, &mut local);
            local
        })
        .reduce(StressOutcome::default, |mut a, b| {
            a.merge(b);
            a
        })
}
