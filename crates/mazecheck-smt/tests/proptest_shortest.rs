//! Property-based check of horizon minimality against a BFS oracle.
//!
//! On small random grids the horizon of the first satisfiable check must equal
//! the length of the shortest walk (through the checkpoint, if any), and an
//! exhausted search must mean no such walk fits in the default bound.

use std::collections::VecDeque;

use mazecheck_grid::{Cell, Grid};
use mazecheck_smt::backends::z3_backend::Z3Solver;
use mazecheck_smt::bmc::{run_horizon_search, CancellationToken, HorizonOptions, HorizonOutcome};
use mazecheck_smt::trace::TraceLog;
use proptest::prelude::*;

fn bfs_distance(grid: &Grid, from: Cell, to: Cell) -> Option<usize> {
    let index = |c: Cell| c.row * grid.width() + c.col;
    let mut dist = vec![None; grid.width() * grid.height()];
    dist[index(from)] = Some(0);
    let mut queue = VecDeque::from([from]);
    while let Some(cell) = queue.pop_front() {
        let d = dist[index(cell)]?;
        if cell == to {
            return Some(d);
        }
        for next in grid.neighbours(cell) {
            if dist[index(next)].is_none() {
                dist[index(next)] = Some(d + 1);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Shortest walk from start to end visiting the single checkpoint, if any.
fn oracle(grid: &Grid) -> Option<usize> {
    match grid.checkpoints() {
        [] => bfs_distance(grid, grid.start(), grid.end()),
        [k] => Some(bfs_distance(grid, grid.start(), *k)? + bfs_distance(grid, *k, grid.end())?),
        _ => unreachable!("strategy places at most one checkpoint"),
    }
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..=4, 1usize..=4)
        .prop_flat_map(|(w, h)| {
            (
                Just(w),
                Just(h),
                proptest::collection::vec(proptest::bool::weighted(0.25), w * h),
                (0..h, 0..w),
                (0..h, 0..w),
                proptest::option::of((0..h, 0..w)),
            )
        })
        .prop_map(|(w, h, mut blocked, start, end, checkpoint)| {
            let mut free = |(r, c): (usize, usize)| blocked[r * w + c] = false;
            free(start);
            free(end);
            if let Some(k) = checkpoint {
                free(k);
            }
            let rows = blocked.chunks(w).map(<[bool]>::to_vec).collect();
            Grid::new(
                rows,
                start.into(),
                end.into(),
                checkpoint.map(Cell::from).into_iter().collect(),
            )
            .unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn first_satisfiable_horizon_is_the_shortest_walk(grid in arb_grid()) {
        let mut solver = Z3Solver::new();
        let search = run_horizon_search(
            &mut solver,
            &grid,
            &HorizonOptions::for_grid(&grid),
            &TraceLog::new(),
            &CancellationToken::new(),
        )
        .unwrap();

        let bound = grid.default_max_horizon();
        match (oracle(&grid).filter(|d| *d <= bound), search.outcome) {
            (Some(expected), HorizonOutcome::Found { horizon, path }) => {
                prop_assert_eq!(horizon, expected);
                prop_assert_eq!(path.len(), horizon + 1);
                for pair in path.windows(2) {
                    prop_assert!(pair[0].is_adjacent(pair[1]));
                }
            }
            (None, HorizonOutcome::Exhausted { max_horizon }) => {
                prop_assert_eq!(max_horizon, bound);
            }
            (expected, outcome) => {
                prop_assert!(false, "oracle {:?} but search gave {:?}", expected, outcome);
            }
        }
    }
}
