//! Check command implementation.

use super::CliError;
use lugal::contest;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Execute the check command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or
/// violates a contest limit.
pub(crate) fn execute(input: PathBuf) -> Result<(), CliError> {
    let file = File::open(&input)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", input.display())))?;

    println!("Checking: {}", input.display());
    println!();

    let cases = match contest::parse_input(BufReader::new(file)) {
        Ok(cases) => {
            print_check("format", true);
            cases
        }
        Err(e) => {
            print_check("format", false);
            return Err(CliError::new(e.to_string()));
        }
    };

    let mut violations = 0usize;
    for (i, case) in cases.iter().enumerate() {
        let problems = contest::check_limits(case);
        print_check(&format!("case {} limits", i + 1), problems.is_empty());
        for problem in &problems {
            println!("      - {problem}");
        }
        violations += problems.len();
    }

    println!();
    if violations > 0 {
        return Err(CliError::new(format!("{violations} limit violation(s)")));
    }

    let total_queries: usize = cases.iter().map(|case| case.queries.len()).sum();
    println!("Input OK: {} case(s), {total_queries} total queries", cases.len());

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
