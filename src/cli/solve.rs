//! Solve command implementation.

use super::{CliError, OutputFormat};
use lugal::contest::{self, TestCase};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// JSON payload for `--format json`.
#[derive(Debug, Serialize)]
struct JsonAnswers<'a> {
    cases: &'a [Vec<i64>],
}

/// Execute the solve command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or on I/O
/// failure while writing answers.
pub(crate) fn execute(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let cases = read_cases(input.as_ref())?;

    let mut solved = Vec::with_capacity(cases.len());
    for case in &cases {
        solved.push(contest::solve_case(case)?);
    }

    match output {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| CliError::new(format!("Failed to create {}: {e}", path.display())))?;
            write_output(&mut BufWriter::new(file), &solved, format)?;
        }
        None => write_output(&mut io::stdout().lock(), &solved, format)?,
    }

    Ok(())
}

fn read_cases(input: Option<&PathBuf>) -> Result<Vec<TestCase>, CliError> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
            Ok(contest::parse_input(BufReader::new(file))?)
        }
        None => Ok(contest::parse_input(io::stdin().lock())?),
    }
}

fn write_output<W: Write>(
    w: &mut W,
    solved: &[Vec<i64>],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            for answers in solved {
                contest::write_answers(w, answers)?;
            }
        }
        OutputFormat::Json => {
            let payload = JsonAnswers { cases: solved };
            let json = serde_json::to_string_pretty(&payload)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            writeln!(w, "{json}")?;
        }
    }
    Ok(())
}
