//! Gen command implementation.

use super::{CliError, seed_from_time};
use lugal::contest::{self, TestCase};
use lugal::testgen::{GenConfig, generate_case};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Execute the gen command.
///
/// Writes `count` generated cases as one contest input. Case i is seeded
/// with `seed + i`, so any single case can be regenerated on its own.
///
/// # Errors
///
/// Returns an error for out-of-range generation parameters or I/O failure.
pub(crate) fn execute(
    seed: Option<u64>,
    count: u64,
    config: GenConfig,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(seed_from_time);

    let mut cases: Vec<TestCase> = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
    for i in 0..count {
        cases.push(generate_case(base_seed.wrapping_add(i), &config)?);
    }

    match output {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| CliError::new(format!("Failed to create {}: {e}", path.display())))?;
            contest::render_input(&mut BufWriter::new(file), &cases)?;
        }
        None => contest::render_input(&mut io::stdout().lock(), &cases)?,
    }

    // Keep stdout clean for the generated input itself.
    eprintln!("Generated {count} case(s) from base seed {base_seed}");

    Ok(())
}
