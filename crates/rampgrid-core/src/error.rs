use thiserror::Error;

use crate::geom::Coord;

/// Errors raised while building a [`Grid`](crate::Grid).
///
/// Every variant is fatal at construction time; a grid that exists is valid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("invalid grid dimension {rows}x{cols}: rows and cols must be positive")]
    InvalidDimension { rows: i32, cols: i32 },

    #[error("invalid probability {name} = {value}: must lie in [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("{name} {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        name: &'static str,
        coord: Coord,
        rows: i32,
        cols: i32,
    },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell {ch:?} at row {row}, col {col}")]
    UnknownCell { ch: char, row: usize, col: usize },

    #[error("expected {expected} cells, got {found}")]
    CellCount { expected: usize, found: usize },
}

/// A coordinate string that is not of the form `row,col`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid coordinate {input:?}: expected ROW,COL")]
pub struct ParseCoordError {
    input: String,
}

impl ParseCoordError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }
}

pub type GridResult<T> = Result<T, GridError>;
