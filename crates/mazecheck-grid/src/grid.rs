use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GridError;

/// A grid coordinate. Serialized as a `[row, col]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two cells differ by exactly one cardinal step.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Immutable obstacle grid with a start, an end and checkpoint cells.
///
/// Every constructor validates the grid, so a `Grid` value always has
/// non-zero dimensions and open, in-bounds start, end and checkpoint cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major obstacle flags, `width * height` entries.
    blocked: Vec<bool>,
    start: Cell,
    end: Cell,
    checkpoints: Vec<Cell>,
}

impl Grid {
    /// Build a grid from row-major obstacle flags.
    ///
    /// Duplicate checkpoints are collapsed, keeping the first occurrence.
    pub fn new(
        rows: Vec<Vec<bool>>,
        start: Cell,
        end: Cell,
        checkpoints: Vec<Cell>,
    ) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, c)| c.len() != width) {
            return Err(GridError::RaggedRow {
                row,
                expected: width,
                found: cells.len(),
            });
        }
        let blocked: Vec<bool> = rows.into_iter().flatten().collect();

        let mut unique = Vec::with_capacity(checkpoints.len());
        for cp in checkpoints {
            if !unique.contains(&cp) {
                unique.push(cp);
            }
        }

        let grid = Grid {
            width,
            height,
            blocked,
            start,
            end,
            checkpoints: unique,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// A grid with no obstacles.
    pub fn open(
        width: usize,
        height: usize,
        start: Cell,
        end: Cell,
        checkpoints: Vec<Cell>,
    ) -> Result<Self, GridError> {
        Self::new(vec![vec![false; width]; height], start, end, checkpoints)
    }

    fn validate(&self) -> Result<(), GridError> {
        let mut roles = vec![("start", self.start), ("end", self.end)];
        roles.extend(self.checkpoints.iter().map(|&cp| ("checkpoint", cp)));
        for (role, cell) in roles {
            if !self.in_bounds(cell) {
                return Err(GridError::OutOfBounds {
                    role,
                    cell,
                    width: self.width,
                    height: self.height,
                });
            }
            if self.is_obstacle(cell.row, cell.col) {
                return Err(GridError::Blocked { role, cell });
            }
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn end(&self) -> Cell {
        self.end
    }

    pub fn checkpoints(&self) -> &[Cell] {
        &self.checkpoints
    }

    pub fn has_checkpoints(&self) -> bool {
        !self.checkpoints.is_empty()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Out-of-bounds coordinates count as obstacles.
    pub fn is_obstacle(&self, row: usize, col: usize) -> bool {
        if row >= self.height || col >= self.width {
            return true;
        }
        self.blocked[row * self.width + col]
    }

    /// All obstacle cells in row-major order.
    pub fn obstacles(&self) -> Vec<Cell> {
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(idx, _)| Cell::new(idx / self.width, idx % self.width))
            .collect()
    }

    pub fn obstacle_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Lower bound on the number of moves from start to end.
    pub fn manhattan_lower_bound(&self) -> usize {
        self.start.manhattan(self.end)
    }

    /// Default horizon ceiling: one step per cell.
    pub fn default_max_horizon(&self) -> usize {
        self.width * self.height
    }

    /// Open cardinal neighbours of `cell`.
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let candidates = [
            cell.row.checked_sub(1).map(|r| Cell::new(r, cell.col)),
            Some(Cell::new(cell.row + 1, cell.col)),
            cell.col.checked_sub(1).map(|c| Cell::new(cell.row, c)),
            Some(Cell::new(cell.row, cell.col + 1)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |c| !self.is_obstacle(c.row, c.col))
    }

    /// Obstacle flags as rows of 0/1, the layout used by the JSON format.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.blocked
            .chunks(self.width)
            .map(|row| row.iter().map(|&b| u8::from(b)).collect())
            .collect()
    }
}
