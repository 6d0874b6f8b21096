//! Error types for the territory engine.

use std::fmt;

/// Errors surfaced by the territory engine.
///
/// The engine operates on pre-validated input, so this list is short: the
/// conditions below are precondition violations the engine refuses to paper
/// over with a silently wrong answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A best-score query was issued while no civilisation owns any field.
    EmptyWorld,
    /// The value and owner grids are not the same non-empty square shape.
    ShapeMismatch,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::EmptyWorld => {
                write!(f, "best-score query on a world with no civilisations")
            }
            EngineError::ShapeMismatch => {
                write!(f, "value and owner grids must be the same non-empty square shape")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
