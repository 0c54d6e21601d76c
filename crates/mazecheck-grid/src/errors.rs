use miette::Diagnostic;
use thiserror::Error;

use crate::grid::Cell;

#[derive(Debug, Error, Diagnostic)]
pub enum GridError {
    #[error("Grid has zero dimensions ({width}x{height})")]
    #[diagnostic(code(mazecheck::grid::empty))]
    Empty { width: usize, height: usize },

    #[error("Row {row} has {found} cells, expected {expected}")]
    #[diagnostic(code(mazecheck::grid::ragged))]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Grid declares height {declared} but has {found} rows")]
    #[diagnostic(code(mazecheck::grid::height))]
    HeightMismatch { declared: usize, found: usize },

    #[error("Invalid cell value {value} at ({row}, {col}); expected 0 (open) or 1 (obstacle)")]
    #[diagnostic(code(mazecheck::grid::cell_value))]
    InvalidCellValue { row: usize, col: usize, value: u8 },

    #[error("{role} cell {cell} is outside the {width}x{height} grid")]
    #[diagnostic(code(mazecheck::grid::out_of_bounds))]
    OutOfBounds {
        role: &'static str,
        cell: Cell,
        width: usize,
        height: usize,
    },

    #[error("{role} cell {cell} is an obstacle")]
    #[diagnostic(
        code(mazecheck::grid::blocked),
        help("start, end and checkpoint cells must be open")
    )]
    Blocked { role: &'static str, cell: Cell },

    #[error("Unknown grid symbol '{symbol}' at ({row}, {col})")]
    #[diagnostic(
        code(mazecheck::grid::symbol),
        help("use '#' for obstacles, '.' for open cells, 'S', 'E' and 'K' for start, end and checkpoints")
    )]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("Missing {role} marker in grid rows")]
    #[diagnostic(code(mazecheck::grid::missing_marker))]
    MissingMarker { role: &'static str },

    #[error("Duplicate {role} marker at ({row}, {col})")]
    #[diagnostic(code(mazecheck::grid::duplicate_marker))]
    DuplicateMarker {
        role: &'static str,
        row: usize,
        col: usize,
    },

    #[error("Malformed grid JSON: {0}")]
    #[diagnostic(code(mazecheck::grid::json))]
    Json(#[from] serde_json::Error),
}
