//! Error types for maze generation and path search.

use crate::grid::Coord;
use thiserror::Error;

/// Generation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("Invalid maze dimensions {rows}x{cols}: both must be at least 3")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// Search input errors. An unreachable goal is not one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Coordinate {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds { coord: Coord, rows: usize, cols: usize },

    #[error("Coordinate {0} is a wall")]
    Blocked(Coord),
}

/// Errors from parsing a grid out of `#`/`.` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseGridError {
    #[error("Grid text has no rows")]
    Empty,

    #[error("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown cell character {ch:?} at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },
}
