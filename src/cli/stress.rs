//! Stress command implementation.

use super::{CliError, OutputFormat, seed_from_time};
use indicatif::{ProgressBar, ProgressStyle};
use lugal::testgen::GenConfig;
use lugal::stress::{StressConfig, StressOutcome, run_stress};
use serde::Serialize;
use std::time::Instant;

/// How many mismatches/failures to spell out in text mode.
const MAX_LISTED: usize = 10;

/// JSON payload for `--format json`.
#[derive(Debug, Serialize)]
struct JsonStressReport {
    base_seed: u64,
    duration_secs: f64,
    outcome: StressOutcome,
}

/// Execute the stress command.
///
/// # Errors
///
/// Returns an error if any case disagrees with the brute-force reference
/// or fails an invariant check.
pub(crate) fn execute(
    cases: u64,
    seed: Option<u64>,
    gen_config: GenConfig,
    deep: bool,
    threads: Option<usize>,
    progress: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(seed_from_time);
    let config = StressConfig { cases, base_seed, deep, gen_config };

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(cases);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cases ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let outcome = run_stress(&config);

    // Update progress bar after completion (no atomic overhead in hot path)
    if let Some(pb) = pb {
        pb.set_position(outcome.cases_run);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    match format {
        OutputFormat::Text => print_text_report(&outcome, base_seed, duration.as_secs_f64()),
        OutputFormat::Json => {
            let report = JsonStressReport {
                base_seed,
                duration_secs: duration.as_secs_f64(),
                outcome: outcome.clone(),
            };
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    if outcome.passed() {
        Ok(())
    } else {
        Err(CliError::new(format!(
            "{} mismatch(es), {} failure(s)",
            outcome.mismatches.len(),
            outcome.failures.len()
        )))
    }
}

fn print_text_report(outcome: &StressOutcome, base_seed: u64, secs: f64) {
    #[allow(clippy::cast_precision_loss)]
    let per_sec = if secs > 0.0 {
        outcome.cases_run as f64 / secs
    } else {
        0.0
    };

    println!();
    println!("Stress run from base seed {base_seed}");
    println!(
        "  {} case(s), {} queries checked in {secs:.2}s ({per_sec:.0} cases/sec)",
        outcome.cases_run, outcome.queries_checked
    );

    if outcome.passed() {
        println!("  All answers match the brute-force reference.");
        return;
    }

    for mismatch in outcome.mismatches.iter().take(MAX_LISTED) {
        println!(
            "  MISMATCH seed {} query {}: expected {}, got {}",
            mismatch.seed, mismatch.query, mismatch.expected, mismatch.actual
        );
    }
    for failure in outcome.failures.iter().take(MAX_LISTED) {
        println!("  FAILURE {failure}");
    }

    let listed = outcome.mismatches.len().min(MAX_LISTED) + outcome.failures.len().min(MAX_LISTED);
    let total = outcome.mismatches.len() + outcome.failures.len();
    if total > listed {
        println!("  ... and {} more", total - listed);
    }
}
