//! Solve sessions.
//!
//! A [`SolveSession`] is the explicit owner of one solve: the grid, the
//! options, the trace and the cancellation switch. There is no shared
//! "current maze". Every solve constructs its own Z3 session, so a session
//! can be moved to a worker thread with [`SolveSession::spawn`] and the Z3
//! context is created there.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use mazecheck_grid::Grid;
use mazecheck_smt::backends::recording::RecordingSolver;
use mazecheck_smt::backends::z3_backend::Z3Solver;
use mazecheck_smt::bmc::{run_horizon_search, CancellationToken, HorizonOptions, HorizonSearch};
pub use mazecheck_smt::bmc::SymmetryBreaking;
use mazecheck_smt::solver::SmtSolver;
use mazecheck_smt::trace::TraceLog;
use thiserror::Error;
use tracing::info;

use crate::result::SolveResult;
use crate::timeout::deadline_from_timeout_secs;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Solver error: {0}")]
    Solver(String),
    #[error("Could not write SMT dump to {}: {source}", path.display())]
    Dump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not start solve worker: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("Solve worker panicked")]
    WorkerPanicked,
}

/// Options for one solve.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Largest horizon tested; `None` means width × height.
    pub max_horizon: Option<usize>,
    /// Per-check solver timeout and overall deadline in seconds; 0 disables both.
    pub timeout_secs: u64,
    pub symmetry_breaking: SymmetryBreaking,
    pub reachability_pruning: bool,
    /// Write the SMT-LIB2 transcript of the solve here.
    pub dump_smt: Option<PathBuf>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_horizon: None,
            timeout_secs: 300,
            symmetry_breaking: SymmetryBreaking::default(),
            reachability_pruning: true,
            dump_smt: None,
        }
    }
}

impl SolveOptions {
    pub fn max_horizon_for(&self, grid: &Grid) -> usize {
        self.max_horizon
            .unwrap_or_else(|| grid.default_max_horizon())
    }

    pub fn horizon_options(&self, grid: &Grid, deadline: Option<Instant>) -> HorizonOptions {
        HorizonOptions {
            max_horizon: self.max_horizon_for(grid),
            symmetry_breaking: self.symmetry_breaking.enabled_for(grid),
            reachability_pruning: self.reachability_pruning,
            deadline,
        }
    }
}

pub struct SolveSession {
    grid: Grid,
    options: SolveOptions,
    trace: TraceLog,
    cancel: CancellationToken,
}

impl SolveSession {
    pub fn new(grid: Grid, options: SolveOptions) -> Self {
        Self {
            grid,
            options,
            trace: TraceLog::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// Shared handle on the trace; clones observe the same log.
    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the search on the calling thread.
    pub fn solve(self) -> Result<SolveResult, EngineError> {
        let started = Instant::now();
        let deadline = deadline_from_timeout_secs(self.options.timeout_secs);
        let horizon = self.options.horizon_options(&self.grid, deadline);
        info!(
            width = self.grid.width(),
            height = self.grid.height(),
            obstacles = self.grid.obstacle_count(),
            checkpoints = self.grid.checkpoints().len(),
            max_horizon = horizon.max_horizon,
            symmetry_breaking = horizon.symmetry_breaking,
            "Solving grid"
        );

        let solver = Z3Solver::with_timeout_secs(self.options.timeout_secs);
        let search = match &self.options.dump_smt {
            Some(path) => {
                let mut recording = RecordingSolver::new(solver);
                let search = self.search_with(&mut recording, &horizon);
                write_smt_dump(path, &recording.script())?;
                search?
            }
            None => {
                let mut solver = solver;
                self.search_with(&mut solver, &horizon)?
            }
        };

        let result = SolveResult::from_search(
            search,
            horizon.max_horizon,
            started.elapsed(),
            self.trace.snapshot(),
        );
        info!(
            status = %result.status,
            horizon = ?result.horizon,
            formula_size = result.formula_size,
            elapsed_secs = result.elapsed_secs,
            "Solve finished"
        );
        Ok(result)
    }

    /// Run the search on a worker thread. The Z3 context is created there.
    pub fn spawn(self) -> Result<SolveHandle, EngineError> {
        let trace = self.trace.clone();
        let cancel = self.cancel.clone();
        let worker = thread::Builder::new()
            .name("mazecheck-solve".into())
            .spawn(move || self.solve())
            .map_err(EngineError::Spawn)?;
        Ok(SolveHandle {
            trace,
            cancel,
            worker,
        })
    }

    fn search_with<S: SmtSolver>(
        &self,
        solver: &mut S,
        options: &HorizonOptions,
    ) -> Result<HorizonSearch, EngineError> {
        run_horizon_search(solver, &self.grid, options, &self.trace, &self.cancel)
            .map_err(|e| EngineError::Solver(e.to_string()))
    }
}

fn write_smt_dump(path: &Path, script: &str) -> Result<(), EngineError> {
    std::fs::write(path, script).map_err(|source| EngineError::Dump {
        path: path.to_path_buf(),
        source,
    })?;
    info!("SMT dump written to {}", path.display());
    Ok(())
}

/// A solve running on a worker thread.
pub struct SolveHandle {
    trace: TraceLog,
    cancel: CancellationToken,
    worker: JoinHandle<Result<SolveResult, EngineError>>,
}

impl SolveHandle {
    /// Trace lines appended at or after `offset`; never blocks on the solver.
    pub fn trace_since(&self, offset: usize) -> Vec<String> {
        self.trace.lines_since(offset)
    }

    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    /// Ask the worker to stop before its next horizon.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    pub fn wait(self) -> Result<SolveResult, EngineError> {
        self.worker
            .join()
            .map_err(|_| EngineError::WorkerPanicked)?
    }
}
