//! Shared types used across CLI commands and tests.

use serde::Serialize;

use mazecheck_grid::{Cell, Grid};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// What `validate` reports about a grid.
#[derive(Debug, Serialize)]
pub(crate) struct GridSummary {
    pub(crate) valid: bool,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) obstacles: usize,
    pub(crate) start: Cell,
    pub(crate) end: Cell,
    pub(crate) checkpoints: Vec<Cell>,
    pub(crate) lower_bound: usize,
    pub(crate) default_max_horizon: usize,
}

impl GridSummary {
    pub(crate) fn of(grid: &Grid) -> Self {
        Self {
            valid: true,
            width: grid.width(),
            height: grid.height(),
            obstacles: grid.obstacle_count(),
            start: grid.start(),
            end: grid.end(),
            checkpoints: grid.checkpoints().to_vec(),
            lower_bound: grid.manhattan_lower_bound(),
            default_max_horizon: grid.default_max_horizon(),
        }
    }
}
