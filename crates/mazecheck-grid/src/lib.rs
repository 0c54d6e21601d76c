#![doc = include_str!("../README.md")]

//! The grid is an input contract only: generation, solvability patching and
//! checkpoint placement happen elsewhere. Everything here is read-only once
//! a [`Grid`] has been constructed.

pub mod errors;
pub mod format;
pub mod grid;

pub use errors::GridError;
pub use format::GridFile;
pub use grid::{Cell, Grid};

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..8, 1usize..8)
            .prop_flat_map(|(w, h)| {
                (
                    Just(w),
                    Just(h),
                    proptest::collection::vec(proptest::bool::weighted(0.3), w * h),
                    (0..h, 0..w),
                    (0..h, 0..w),
                )
            })
            .prop_map(|(w, h, mut flags, start, end)| {
                flags[start.0 * w + start.1] = false;
                flags[end.0 * w + end.1] = false;
                let rows = flags.chunks(w).map(<[bool]>::to_vec).collect();
                Grid::new(rows, start.into(), end.into(), vec![])
                    .expect("generated grid keeps start and end open")
            })
    }

    proptest! {
        #[test]
        fn neighbourhood_is_symmetric(grid in arb_grid()) {
            for row in 0..grid.height() {
                for col in 0..grid.width() {
                    let cell = Cell::new(row, col);
                    if grid.is_obstacle(row, col) {
                        continue;
                    }
                    for n in grid.neighbours(cell) {
                        prop_assert!(cell.is_adjacent(n));
                        prop_assert!(grid.neighbours(n).any(|back| back == cell));
                    }
                }
            }
        }

        #[test]
        fn obstacle_list_matches_flags(grid in arb_grid()) {
            let obstacles = grid.obstacles();
            prop_assert_eq!(obstacles.len(), grid.obstacle_count());
            for cell in obstacles {
                prop_assert!(grid.is_obstacle(cell.row, cell.col));
            }
            prop_assert!(!grid.is_obstacle(grid.start().row, grid.start().col));
        }
    }
}
