#![no_main]
use libfuzzer_sys::fuzz_target;
use mazecheck_smt::backends::scripted::ScriptedSolver;
use mazecheck_smt::bmc::{run_horizon_search, CancellationToken, HorizonOptions};
use mazecheck_smt::solver::SatResult;
use mazecheck_smt::trace::TraceLog;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let rows: Vec<&str> = s.lines().take(12).collect();
        if let Ok(grid) = mazecheck_grid::Grid::from_rows(&rows) {
            // Drive the encoder through a few horizons without a real solver.
            let mut solver = ScriptedSolver::new(vec![SatResult::Unsat; 4]);
            let options = HorizonOptions {
                max_horizon: grid.manhattan_lower_bound() + 3,
                ..HorizonOptions::for_grid(&grid)
            };
            let _ = run_horizon_search(
                &mut solver,
                &grid,
                &options,
                &TraceLog::new(),
                &CancellationToken::new(),
            );
        }
    }
});
