//! Errors raised by the grid engine.

use aoc_solver::{ParseError, SolveError};
use thiserror::Error;

use super::model::Pos;

/// Failure while building a grid or searching it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The input contained no rows
    #[error("grid has no rows")]
    EmptyGrid,
    /// A row's length differs from the first row's
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell holds a symbol the puzzle does not define
    #[error("unexpected symbol {symbol:?} at {pos}")]
    UnexpectedSymbol { symbol: char, pos: Pos },
    /// A required marker (start, end...) is absent
    #[error("no {0:?} cell in grid")]
    MissingSymbol(char),
    /// The search space was exhausted without reaching a terminal state
    #[error("no solution: {0}")]
    NoSolution(String),
    /// A caller-supplied parameter cannot be used with this grid
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<GridError> for ParseError {
    fn from(e: GridError) -> Self {
        ParseError::InvalidFormat(e.to_string())
    }
}

impl From<GridError> for SolveError {
    fn from(e: GridError) -> Self {
        SolveError::SolveFailed(Box::new(e))
    }
}
