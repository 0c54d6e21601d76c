//! QF_LIA encoding of a grid walk.
//!
//! [`GridEncoder`] builds the constraint families of one layer of the
//! unrolled transition system. Nothing here touches a solver; the
//! [`ledger`] decides which constraints are permanent and asserts them.

pub mod ledger;
pub mod variables;

use mazecheck_grid::{Cell, Grid};

use crate::terms::SmtTerm;
pub use ledger::StepLedger;
pub use variables::StepVars;

/// Grid coordinates are small; saturate rather than fail on absurd sizes.
pub(crate) fn coord(v: usize) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

/// The four cardinal unit moves as `(dx, dy)`.
const MOVES: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub struct GridEncoder<'g> {
    grid: &'g Grid,
    /// Computed once per solve and shared by every layer.
    obstacles: Vec<Cell>,
}

impl<'g> GridEncoder<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            obstacles: grid.obstacles(),
        }
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// `x_0 = startCol ∧ y_0 = startRow`
    pub fn initial_state(&self, step0: &StepVars) -> SmtTerm {
        step0.at(self.grid.start())
    }

    /// `0 ≤ x_t < W ∧ 0 ≤ y_t < H`
    pub fn domain(&self, v: &StepVars) -> SmtTerm {
        SmtTerm::and(vec![
            v.x_term().ge(SmtTerm::int(0)),
            v.x_term().lt(SmtTerm::int(coord(self.grid.width()))),
            v.y_term().ge(SmtTerm::int(0)),
            v.y_term().lt(SmtTerm::int(coord(self.grid.height()))),
        ])
    }

    /// One aggregated clause keeping `(x_t, y_t)` off every obstacle, or
    /// `None` for an obstacle-free grid.
    pub fn obstacle_exclusion(&self, v: &StepVars) -> Option<SmtTerm> {
        if self.obstacles.is_empty() {
            return None;
        }
        Some(SmtTerm::and(
            self.obstacles.iter().map(|&cell| v.not_at(cell)).collect(),
        ))
    }

    /// Exactly one cardinal unit move between consecutive steps.
    pub fn transition(&self, prev: &StepVars, cur: &StepVars) -> SmtTerm {
        let dx = cur.x_term().sub(prev.x_term());
        let dy = cur.y_term().sub(prev.y_term());
        SmtTerm::or(
            MOVES
                .iter()
                .map(|&(mx, my)| {
                    SmtTerm::and(vec![
                        dx.clone().eq(SmtTerm::int(mx)),
                        dy.clone().eq(SmtTerm::int(my)),
                    ])
                })
                .collect(),
        )
    }

    /// `(x_t, y_t) ≠ (x_{t-2}, y_{t-2})`: no immediate back-and-forth.
    pub fn no_reversal(&self, two_back: &StepVars, cur: &StepVars) -> SmtTerm {
        SmtTerm::or(vec![
            cur.x_term().ne(two_back.x_term()),
            cur.y_term().ne(two_back.y_term()),
        ])
    }

    /// `|x_t − endCol| + |y_t − endRow| ≤ k − t`. Only meaningful while
    /// testing horizon `k`, so it must stay inside that horizon's frame.
    pub fn reachability(&self, v: &StepVars, horizon: usize) -> SmtTerm {
        let end = self.grid.end();
        let remaining = coord(horizon.saturating_sub(v.step));
        v.x_term()
            .abs_diff(SmtTerm::int(coord(end.col)))
            .add(v.y_term().abs_diff(SmtTerm::int(coord(end.row))))
            .le(SmtTerm::int(remaining))
    }

    /// `x_k = endCol ∧ y_k = endRow`
    pub fn goal(&self, last: &StepVars) -> SmtTerm {
        last.at(self.grid.end())
    }

    /// `∨_{t ≤ k} (x_t, y_t) = checkpoint` over the given steps.
    pub fn checkpoint_visited(&self, checkpoint: Cell, steps: &[StepVars]) -> SmtTerm {
        SmtTerm::or(steps.iter().map(|v| v.at(checkpoint)).collect())
    }
}
