//! CLI command implementations for Lugal.

pub(crate) mod check;
pub(crate) mod generate;
pub(crate) mod solve;
pub(crate) mod stress;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `solve` and `stress` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<lugal::contest::ParseError> for CliError {
    fn from(e: lugal::contest::ParseError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<lugal::testgen::GenError> for CliError {
    fn from(e: lugal::testgen::GenError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<lugal::EngineError> for CliError {
    fn from(e: lugal::EngineError) -> Self {
        Self::new(e.to_string())
    }
}

/// Default seed when none is given: derived from the wall clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seed_from_time() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
