#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Loading must reject, never panic; accepted grids must re-serialize.
        if let Ok(grid) = mazecheck_grid::Grid::from_json_str(s) {
            let _ = grid.to_json_string();
            let _ = grid.obstacles();
        }
        let rows: Vec<&str> = s.lines().collect();
        let _ = mazecheck_grid::Grid::from_rows(&rows);
    }
});
