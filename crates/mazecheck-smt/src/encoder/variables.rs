//! Variable naming conventions for the time-indexed position encoding.
//!
//! - `x_t`: column of the mover at step t
//! - `y_t`: row of the mover at step t

use mazecheck_grid::Cell;

use crate::encoder::coord;
use crate::sorts::SmtSort;
use crate::terms::SmtTerm;

pub(crate) fn x_var(step: usize) -> String {
    format!("x_{step}")
}

pub(crate) fn y_var(step: usize) -> String {
    format!("y_{step}")
}

/// The position pair for one time step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepVars {
    pub step: usize,
    pub x: String,
    pub y: String,
}

impl StepVars {
    pub fn new(step: usize) -> Self {
        Self {
            step,
            x: x_var(step),
            y: y_var(step),
        }
    }

    pub fn x_term(&self) -> SmtTerm {
        SmtTerm::var(self.x.as_str())
    }

    pub fn y_term(&self) -> SmtTerm {
        SmtTerm::var(self.y.as_str())
    }

    /// `x_t = col ∧ y_t = row`
    pub fn at(&self, cell: Cell) -> SmtTerm {
        SmtTerm::and(vec![
            self.x_term().eq(SmtTerm::int(coord(cell.col))),
            self.y_term().eq(SmtTerm::int(coord(cell.row))),
        ])
    }

    /// `x_t ≠ col ∨ y_t ≠ row`
    pub fn not_at(&self, cell: Cell) -> SmtTerm {
        SmtTerm::or(vec![
            self.x_term().ne(SmtTerm::int(coord(cell.col))),
            self.y_term().ne(SmtTerm::int(coord(cell.row))),
        ])
    }

    pub fn declarations(&self) -> [(&str, SmtSort); 2] {
        [(self.x.as_str(), SmtSort::Int), (self.y.as_str(), SmtSort::Int)]
    }
}
