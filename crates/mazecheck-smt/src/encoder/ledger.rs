//! Step-variable ledger: owns the permanent part of the formula.
//!
//! Steps are allocated in ascending order and never rebuilt. Allocating step
//! t declares `x_t`/`y_t` and asserts, once and outside any scope, every
//! structural constraint of that layer: the initial state (t = 0), domain,
//! obstacle exclusion, the transition from t−1 (t ≥ 1) and, when symmetry
//! breaking is on, the no-reversal constraint against t−2 (t ≥ 2).

use tracing::debug;

use crate::encoder::{GridEncoder, StepVars};
use crate::solver::SmtSolver;
use crate::terms::SmtTerm;
use crate::trace::TraceLog;

#[derive(Debug, Default)]
pub struct StepLedger {
    steps: Vec<StepVars>,
    permanent_assertions: usize,
    symmetry_breaking: bool,
}

impl StepLedger {
    pub fn new(symmetry_breaking: bool) -> Self {
        Self {
            steps: Vec::new(),
            permanent_assertions: 0,
            symmetry_breaking,
        }
    }

    /// Number of steps allocated so far (steps `0..built()`).
    pub fn built(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[StepVars] {
        &self.steps
    }

    /// Permanent constraints asserted so far.
    pub fn permanent_assertions(&self) -> usize {
        self.permanent_assertions
    }

    /// Return the variables of step `t`, allocating every missing step up to
    /// and including `t` first.
    pub fn variable_at<S: SmtSolver>(
        &mut self,
        step: usize,
        solver: &mut S,
        encoder: &GridEncoder<'_>,
        trace: &TraceLog,
    ) -> Result<&StepVars, S::Error> {
        while self.steps.len() <= step {
            self.allocate_next(solver, encoder, trace)?;
        }
        Ok(&self.steps[step])
    }

    fn allocate_next<S: SmtSolver>(
        &mut self,
        solver: &mut S,
        encoder: &GridEncoder<'_>,
        trace: &TraceLog,
    ) -> Result<(), S::Error> {
        let t = self.steps.len();
        let cur = StepVars::new(t);
        for (name, sort) in cur.declarations() {
            solver.declare_var(name, sort)?;
        }

        let grid = encoder.grid();
        if t == 0 {
            let start = grid.start();
            trace.comment("Initial state at step 0");
            trace.push(format!("(x_0 = {}) ∧ (y_0 = {})", start.col, start.row));
            self.assert_permanent(solver, &encoder.initial_state(&cur))?;
        }

        trace.comment(format!("Domain constraints for step {t}"));
        trace.push(format!(
            "(0 ≤ x_{t} < {}) ∧ (0 ≤ y_{t} < {})",
            grid.width(),
            grid.height()
        ));
        self.assert_permanent(solver, &encoder.domain(&cur))?;

        if let Some(clause) = encoder.obstacle_exclusion(&cur) {
            trace.comment(format!(
                "Obstacle constraints for step {t} ({} obstacles)",
                encoder.obstacle_count()
            ));
            self.assert_permanent(solver, &clause)?;
        }

        if let Some(prev) = t.checked_sub(1).map(|p| &self.steps[p]) {
            trace.comment(format!(
                "Transition {}→{t}: (dx,dy) ∈ {{(±1,0), (0,±1)}}",
                t - 1
            ));
            let transition = encoder.transition(prev, &cur);
            self.assert_permanent(solver, &transition)?;
        }

        if self.symmetry_breaking && t >= 2 {
            let two_back = &self.steps[t - 2];
            trace.comment(format!(
                "No U-turn: (x_{t}, y_{t}) ≠ (x_{}, y_{})",
                t - 2,
                t - 2
            ));
            let no_reversal = encoder.no_reversal(two_back, &cur);
            self.assert_permanent(solver, &no_reversal)?;
        }

        debug!(step = t, permanent = self.permanent_assertions, "ledger: step allocated");
        self.steps.push(cur);
        Ok(())
    }

    fn assert_permanent<S: SmtSolver>(
        &mut self,
        solver: &mut S,
        term: &SmtTerm,
    ) -> Result<(), S::Error> {
        solver.assert(term)?;
        self.permanent_assertions += 1;
        Ok(())
    }
}
