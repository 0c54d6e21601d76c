//! Incremental horizon search.
//!
//! For every horizon k from the Manhattan lower bound upward, the driver
//! extends the permanent formula to step k through the [`StepLedger`], then
//! pushes a frame holding the horizon-specific constraints (reachability
//! pruning, goal, checkpoint visits), checks it and pops it again. Structural
//! constraints are therefore asserted once per step, and a failed horizon
//! leaves nothing behind for the next one.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use mazecheck_grid::{Cell, Grid};
use tracing::{debug, info, warn};

use crate::encoder::{GridEncoder, StepLedger, StepVars};
use crate::solver::{Model, SatResult, SmtSolver};
use crate::sorts::SmtSort;
use crate::trace::TraceLog;

fn deadline_exceeded(deadline: Option<Instant>) -> bool {
    match deadline {
        Some(deadline) => Instant::now() >= deadline,
        None => false,
    }
}

/// Cooperative cancellation flag, checked between horizons.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// When to assert the no-immediate-reversal constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymmetryBreaking {
    /// Only for grids without checkpoints, where no shortest walk reverses.
    #[default]
    Auto,
    Always,
    Never,
}

impl SymmetryBreaking {
    pub fn enabled_for(self, grid: &Grid) -> bool {
        match self {
            SymmetryBreaking::Auto => !grid.has_checkpoints(),
            SymmetryBreaking::Always => true,
            SymmetryBreaking::Never => false,
        }
    }
}

/// Parameters of one horizon search.
#[derive(Debug, Clone)]
pub struct HorizonOptions {
    /// Largest horizon tested (inclusive).
    pub max_horizon: usize,
    /// Assert the no-immediate-reversal constraint, as resolved by
    /// [`SymmetryBreaking::enabled_for`].
    pub symmetry_breaking: bool,
    /// Assert the distance-to-goal envelope inside each horizon frame.
    pub reachability_pruning: bool,
    /// Give up between horizons once this instant has passed.
    pub deadline: Option<Instant>,
}

impl HorizonOptions {
    /// Defaults for `grid`: horizons up to width × height, automatic
    /// symmetry breaking, pruning on, no deadline.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            max_horizon: grid.default_max_horizon(),
            symmetry_breaking: SymmetryBreaking::default().enabled_for(grid),
            reachability_pruning: true,
            deadline: None,
        }
    }
}

/// Why a search stopped without a verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum IndeterminateReason {
    /// The solver answered unknown (includes per-check timeouts).
    SolverUnknown(String),
    /// The solver answered SAT but did not supply every step value.
    MissingModel,
    /// The overall deadline passed between horizons.
    Timeout,
    /// The caller cancelled between horizons.
    Cancelled,
}

impl IndeterminateReason {
    /// Stable machine-readable tag.
    pub fn kind(&self) -> &'static str {
        match self {
            IndeterminateReason::SolverUnknown(_) => "solver-unknown",
            IndeterminateReason::MissingModel => "missing-model",
            IndeterminateReason::Timeout => "timeout",
            IndeterminateReason::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for IndeterminateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndeterminateReason::SolverUnknown(detail) => write!(f, "solver-unknown: {detail}"),
            other => f.write_str(other.kind()),
        }
    }
}

/// Terminal state of the horizon search.
#[derive(Debug, Clone, PartialEq)]
pub enum HorizonOutcome {
    /// A path of `horizon` moves; `path.len() == horizon + 1`.
    Found { horizon: usize, path: Vec<Cell> },
    /// Every horizon up to `max_horizon` is unsatisfiable.
    Exhausted { max_horizon: usize },
    /// The search stopped at `horizon` without deciding it.
    Indeterminate {
        horizon: usize,
        reason: IndeterminateReason,
    },
}

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchProfile {
    pub horizons_checked: usize,
    pub steps_built: usize,
    pub scoped_assertions: usize,
    pub solve_elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct HorizonSearch {
    pub outcome: HorizonOutcome,
    /// Permanent constraints asserted over the whole search.
    pub formula_size: usize,
    pub profile: SearchProfile,
}

/// Run the incremental search on a fresh solver session.
///
/// The trace is frozen when this returns, whatever the outcome. If `max_horizon`
/// is below the Manhattan lower bound the solver is not touched at all.
pub fn run_horizon_search<S: SmtSolver>(
    solver: &mut S,
    grid: &Grid,
    options: &HorizonOptions,
    trace: &TraceLog,
    cancel: &CancellationToken,
) -> Result<HorizonSearch, S::Error> {
    let out = search(solver, grid, options, trace, cancel);
    trace.freeze();
    out
}

fn search<S: SmtSolver>(
    solver: &mut S,
    grid: &Grid,
    options: &HorizonOptions,
    trace: &TraceLog,
    cancel: &CancellationToken,
) -> Result<HorizonSearch, S::Error> {
    let min_horizon = grid.manhattan_lower_bound();
    let mut profile = SearchProfile::default();

    if min_horizon > options.max_horizon {
        info!(
            min_horizon,
            max_horizon = options.max_horizon,
            "BMC: lower bound exceeds max horizon"
        );
        trace.comment(format!(
            "Lower bound {min_horizon} exceeds max horizon {}; nothing to check",
            options.max_horizon
        ));
        return Ok(HorizonSearch {
            outcome: HorizonOutcome::Exhausted {
                max_horizon: options.max_horizon,
            },
            formula_size: 0,
            profile,
        });
    }

    let encoder = GridEncoder::new(grid);
    let mut ledger = StepLedger::new(options.symmetry_breaking);

    for horizon in min_horizon..=options.max_horizon {
        let stop = if cancel.is_cancelled() {
            Some(IndeterminateReason::Cancelled)
        } else if deadline_exceeded(options.deadline) {
            Some(IndeterminateReason::Timeout)
        } else {
            None
        };
        if let Some(reason) = stop {
            warn!(horizon, %reason, "BMC: stopping before horizon");
            trace.comment(format!("Stopped before horizon {horizon}: {reason}"));
            profile.steps_built = ledger.built();
            return Ok(HorizonSearch {
                outcome: HorizonOutcome::Indeterminate { horizon, reason },
                formula_size: ledger.permanent_assertions(),
                profile,
            });
        }

        ledger.variable_at(horizon, solver, &encoder, trace)?;
        info!(horizon, "BMC: checking horizon");

        solver.push()?;
        let (result, model) =
            check_horizon(solver, &encoder, &ledger, horizon, options, trace, &mut profile)?;
        let decoded = match (&result, &model) {
            (SatResult::Sat, Some(model)) => decode_path(model, &ledger.steps()[..=horizon]),
            _ => None,
        };
        solver.pop()?;
        profile.horizons_checked += 1;

        let outcome = match result {
            SatResult::Sat => match decoded {
                Some(path) => {
                    info!(horizon, "BMC: path found");
                    trace.comment(format!("Path found at horizon {horizon}"));
                    HorizonOutcome::Found { horizon, path }
                }
                None => {
                    warn!(horizon, "BMC: solver returned SAT without a full model");
                    trace.comment(format!("Horizon {horizon}: sat without a usable model"));
                    HorizonOutcome::Indeterminate {
                        horizon,
                        reason: IndeterminateReason::MissingModel,
                    }
                }
            },
            SatResult::Unsat => {
                debug!(horizon, "BMC: unsat at this horizon");
                trace.comment(format!("Horizon {horizon}: unsat"));
                continue;
            }
            SatResult::Unknown(detail) => {
                warn!(horizon, %detail, "BMC: unknown result");
                trace.comment(format!("Horizon {horizon}: unknown ({detail})"));
                HorizonOutcome::Indeterminate {
                    horizon,
                    reason: IndeterminateReason::SolverUnknown(detail),
                }
            }
        };
        profile.steps_built = ledger.built();
        return Ok(HorizonSearch {
            outcome,
            formula_size: ledger.permanent_assertions(),
            profile,
        });
    }

    info!(max_horizon = options.max_horizon, "BMC: no path up to max horizon");
    trace.comment(format!("No path within horizon {}", options.max_horizon));
    profile.steps_built = ledger.built();
    Ok(HorizonSearch {
        outcome: HorizonOutcome::Exhausted {
            max_horizon: options.max_horizon,
        },
        formula_size: ledger.permanent_assertions(),
        profile,
    })
}

/// Assert the scoped constraints of `horizon` and check. The caller owns the
/// surrounding push/pop.
fn check_horizon<S: SmtSolver>(
    solver: &mut S,
    encoder: &GridEncoder<'_>,
    ledger: &StepLedger,
    horizon: usize,
    options: &HorizonOptions,
    trace: &TraceLog,
    profile: &mut SearchProfile,
) -> Result<(SatResult, Option<Model>), S::Error> {
    let grid = encoder.grid();
    let end = grid.end();
    let steps = &ledger.steps()[..=horizon];
    trace.comment(format!("Horizon {horizon}"));

    if options.reachability_pruning {
        trace.comment(format!(
            "Reachability pruning: |x_t − {}| + |y_t − {}| ≤ {horizon} − t for t ∈ [0, {horizon}]",
            end.col, end.row
        ));
        for v in steps {
            solver.assert(&encoder.reachability(v, horizon))?;
            profile.scoped_assertions += 1;
        }
    }

    trace.comment(format!(
        "Goal: reach ({}, {}) by step {horizon}",
        end.col, end.row
    ));
    trace.push(format!(
        "(x_{horizon} = {}) ∧ (y_{horizon} = {})",
        end.col, end.row
    ));
    solver.assert(&encoder.goal(&steps[horizon]))?;
    profile.scoped_assertions += 1;

    for &checkpoint in grid.checkpoints() {
        trace.comment(format!(
            "Checkpoint at ({}, {}) must be visited at some step ≤ {horizon}",
            checkpoint.col, checkpoint.row
        ));
        solver.assert(&encoder.checkpoint_visited(checkpoint, steps))?;
        profile.scoped_assertions += 1;
    }

    let vars: Vec<(&str, SmtSort)> = steps.iter().flat_map(StepVars::declarations).collect();
    let started = Instant::now();
    let out = solver.check_sat_with_model(&vars);
    profile.solve_elapsed += started.elapsed();
    out
}

/// Read `(x_t, y_t)` for every step in order and return the cells as
/// `(row = y_t, col = x_t)`. `None` if any value is missing or negative.
pub fn decode_path(model: &Model, steps: &[StepVars]) -> Option<Vec<Cell>> {
    steps
        .iter()
        .map(|v| {
            let col = usize::try_from(model.get_int(&v.x)?).ok()?;
            let row = usize::try_from(model.get_int(&v.y)?).ok()?;
            Some(Cell::new(row, col))
        })
        .collect()
}
