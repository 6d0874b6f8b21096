//! Deterministic test-case generation.

// Generation uses intentional casts for coordinate/RNG operations
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use std::collections::HashSet;

use crate::contest::{MAX_ABS_A, MAX_ABS_B, MAX_ABS_C, MAX_ABS_VALUE, MAX_OWNER_ID, MAX_SIZE};
use crate::contest::{Query, TestCase};
use crate::engine::{CivId, Coord};

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random u32 in [0, max).
    fn next_u32(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u32
    }

    /// Generate random i64 in [low, high].
    fn next_i64(&mut self, low: i64, high: i64) -> i64 {
        debug_assert!(low <= high);
        let span = high.wrapping_sub(low) as u64 + 1;
        low.wrapping_add((self.next_u64() % span) as i64)
    }
}

/// Categorical distribution over civilisation slots.
#[derive(Debug, Clone)]
struct Weights {
    weights: Vec<u64>,
    total: u64,
}

impl Weights {
    /// Every slot equally likely.
    fn uniform(slots: u32) -> Self {
        let weights = vec![1u64; slots as usize];
        let total = weights.iter().sum();
        Self { weights, total }
    }

    /// Slot i has weight i+1, giving a few dominant civilisations.
    fn skewed(slots: u32) -> Self {
        let weights: Vec<u64> = (1..=u64::from(slots)).collect();
        let total = weights.iter().sum();
        Self { weights, total }
    }

    fn sample(&self, rng: &mut Rng) -> u32 {
        let mut x = rng.next_u64() % self.total;
        for (slot, &weight) in self.weights.iter().enumerate() {
            if x < weight {
                return slot as u32;
            }
            x -= weight;
        }
        // Unreachable: x starts below the weight total.
        0
    }
}

/// Parameters for one generated case.
#[derive(Debug, Clone, Copy)]
pub struct GenConfig {
    /// Grid side length.
    pub size: u16,
    /// Number of queries to generate.
    pub queries: u32,
    /// Number of civilisation slots owners are drawn from.
    pub civs: u32,
    /// Cell values are uniform in `[-value_range, value_range]`.
    pub value_range: i32,
    /// Coefficient `a` is uniform in `[-a_range, a_range]`.
    pub a_range: i64,
    /// Coefficient `b` is uniform in `[-b_range, b_range]`.
    pub b_range: i64,
    /// Coefficient `c` is uniform in `[-c_range, c_range]`.
    pub c_range: i64,
    /// Draw owners from a linearly skewed distribution instead of uniform.
    pub skewed: bool,
    /// Remap slot indices to unique random ids in `[0, 10^9]`.
    pub scramble_ids: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            size: 16,
            queries: 64,
            civs: 8,
            value_range: MAX_ABS_VALUE,
            a_range: MAX_ABS_A,
            b_range: MAX_ABS_B,
            c_range: MAX_ABS_C,
            skewed: false,
            scramble_ids: true,
        }
    }
}

/// Error type for test-case generation.
#[derive(Debug, Clone)]
pub struct GenError {
    /// Description of the error.
    pub reason: String,
}

impl std::fmt::Display for GenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Test generation error: {}", self.reason)
    }
}

impl std::error::Error for GenError {}

/// Generate one test case from a seed.
///
/// Generation is fully deterministic in `(seed, config)`. Every generated
/// query changes the cell's owner (draws landing on the current owner are
/// rejected), matching the contest's input guarantee.
///
/// # Errors
///
/// Returns an error if the config is out of contest range, or if fewer
/// than 2 civilisation slots are requested with a nonzero query count
/// (re-assignment needs an alternative owner to pick).
pub fn generate_case(seed: u64, config: &GenConfig) -> Result<TestCase, GenError> {
    if config.size == 0 || config.size > MAX_SIZE {
        return Err(GenError {
            reason: format!("grid size must be in 1..={MAX_SIZE}, got {}", config.size),
        });
    }
    if config.civs == 0 {
        return Err(GenError {
            reason: "need at least 1 civilisation slot".to_string(),
        });
    }
    if config.queries > 0 && config.civs < 2 {
        return Err(GenError {
            reason: "need at least 2 civilisation slots to generate queries".to_string(),
        });
    }
    if config.value_range < 0 || config.a_range < 0 || config.b_range < 0 || config.c_range < 0 {
        return Err(GenError {
            reason: "ranges must be non-negative".to_string(),
        });
    }

    let mut rng = Rng::new(seed);
    let dist = if config.skewed {
        Weights::skewed(config.civs)
    } else {
        Weights::uniform(config.civs)
    };

    let n = usize::from(config.size);
    let values: Vec<Vec<i32>> = (0..n)
        .map(|_| {
            (0..n)
                .map(|_| rng.next_i64(i64::from(-config.value_range), i64::from(config.value_range)) as i32)
                .collect()
        })
        .collect();

    let owners: Vec<Vec<CivId>> = (0..n)
        .map(|_| (0..n).map(|_| dist.sample(&mut rng)).collect())
        .collect();

    // Track current ownership so no query re-assigns a cell to its owner.
    let mut current = owners.clone();
    let mut queries = Vec::with_capacity(config.queries as usize);
    for _ in 0..config.queries {
        let (x, y, slot) = loop {
            let x = rng.next_u32(u32::from(config.size)) as u16;
            let y = rng.next_u32(u32::from(config.size)) as u16;
            let slot = dist.sample(&mut rng);
            if current[usize::from(x)][usize::from(y)] != slot {
                break (x, y, slot);
            }
        };
        current[usize::from(x)][usize::from(y)] = slot;

        queries.push(Query {
            at: Coord::new(x, y),
            new_owner: slot,
            a: rng.next_i64(-config.a_range, config.a_range),
            b: rng.next_i64(-config.b_range, config.b_range),
            c: rng.next_i64(-config.c_range, config.c_range),
        });
    }

    let mut case = TestCase {
        size: config.size,
        values,
        owners,
        queries,
    };

    if config.scramble_ids {
        scramble_ids(&mut rng, &mut case, config.civs);
    }

    Ok(case)
}

/// Remap slot indices to unique random ids so owners are unpredictable.
fn scramble_ids(rng: &mut Rng, case: &mut TestCase, slots: u32) {
    let mut used = HashSet::with_capacity(slots as usize);
    let mut ids = Vec::with_capacity(slots as usize);

    for _ in 0..slots {
        loop {
            let id = rng.next_u32(MAX_OWNER_ID + 1);
            if used.insert(id) {
                ids.push(id);
                break;
            }
        }
    }

    for owner in case.owners.iter_mut().flatten() {
        *owner = ids[*owner as usize];
    }
    for query in &mut case.queries {
        query.new_owner = ids[query.new_owner as usize];
    }
}
