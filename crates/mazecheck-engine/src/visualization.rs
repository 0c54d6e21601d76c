use std::collections::HashMap;

use mazecheck_grid::{Cell, Grid};

fn base_glyph(grid: &Grid, cell: Cell) -> char {
    if cell == grid.start() && cell == grid.end() {
        '*'
    } else if cell == grid.start() {
        'S'
    } else if cell == grid.end() {
        'E'
    } else if grid.checkpoints().contains(&cell) {
        'K'
    } else if grid.is_obstacle(cell.row, cell.col) {
        '#'
    } else {
        '.'
    }
}

/// Direction of the move that leaves `from`.
fn arrow(from: Cell, to: Cell) -> char {
    if to.row > from.row {
        'v'
    } else if to.row < from.row {
        '^'
    } else if to.col > from.col {
        '>'
    } else {
        '<'
    }
}

/// Draw the grid as ASCII, one row per line. Markers (`S`, `E`, `K`, `#`)
/// always win; open cells on the path show the direction of the first move
/// taken from them.
pub fn render_grid(grid: &Grid, path: Option<&[Cell]>) -> String {
    let mut moves: HashMap<Cell, char> = HashMap::new();
    if let Some(path) = path {
        for pair in path.windows(2) {
            moves.entry(pair[0]).or_insert_with(|| arrow(pair[0], pair[1]));
        }
    }

    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let cell = Cell::new(row, col);
            let glyph = match base_glyph(grid, cell) {
                '.' => moves.get(&cell).copied().unwrap_or('.'),
                marker => marker,
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// One-line legend printed under a rendered grid.
pub fn legend() -> &'static str {
    "S start, E end, K checkpoint, # obstacle, ^v<> path"
}
