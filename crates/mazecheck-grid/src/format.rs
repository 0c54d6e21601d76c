//! Grid serialization: the JSON maze format and a compact ASCII form.

use serde::{Deserialize, Serialize};

use crate::errors::GridError;
use crate::grid::{Cell, Grid};

/// On-disk JSON layout. `grid[r][c] == 1` marks an obstacle and `keys`
/// lists the checkpoints (absent means none).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridFile {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<u8>>,
    pub start: Cell,
    pub end: Cell,
    #[serde(default)]
    pub keys: Vec<Cell>,
}

impl TryFrom<GridFile> for Grid {
    type Error = GridError;

    fn try_from(file: GridFile) -> Result<Self, Self::Error> {
        if file.grid.len() != file.height {
            return Err(GridError::HeightMismatch {
                declared: file.height,
                found: file.grid.len(),
            });
        }
        let mut rows = Vec::with_capacity(file.height);
        for (row, cells) in file.grid.iter().enumerate() {
            if cells.len() != file.width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: file.width,
                    found: cells.len(),
                });
            }
            let mut flags = Vec::with_capacity(file.width);
            for (col, &value) in cells.iter().enumerate() {
                match value {
                    0 => flags.push(false),
                    1 => flags.push(true),
                    other => {
                        return Err(GridError::InvalidCellValue {
                            row,
                            col,
                            value: other,
                        })
                    }
                }
            }
            rows.push(flags);
        }
        Grid::new(rows, file.start, file.end, file.keys)
    }
}

impl From<&Grid> for GridFile {
    fn from(grid: &Grid) -> Self {
        GridFile {
            width: grid.width(),
            height: grid.height(),
            grid: grid.rows(),
            start: grid.start(),
            end: grid.end(),
            keys: grid.checkpoints().to_vec(),
        }
    }
}

impl Grid {
    pub fn from_json_str(source: &str) -> Result<Self, GridError> {
        let file: GridFile = serde_json::from_str(source)?;
        Grid::try_from(file)
    }

    pub fn to_json_string(&self) -> Result<String, GridError> {
        Ok(serde_json::to_string(&GridFile::from(self))?)
    }

    /// Parse the ASCII form: `#` obstacle, `.` open, `S` start, `E` end,
    /// `K` checkpoint. Exactly one `S` and one `E` are required; if start and
    /// end coincide use `*`.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        let mut flags = Vec::with_capacity(rows.len());
        let mut start = None;
        let mut end = None;
        let mut checkpoints = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, symbol) in line.chars().enumerate() {
                let here = Cell::new(row, col);
                match symbol {
                    '#' => cells.push(true),
                    '.' => cells.push(false),
                    'S' => {
                        set_marker(&mut start, "start", here)?;
                        cells.push(false);
                    }
                    'E' => {
                        set_marker(&mut end, "end", here)?;
                        cells.push(false);
                    }
                    '*' => {
                        set_marker(&mut start, "start", here)?;
                        set_marker(&mut end, "end", here)?;
                        cells.push(false);
                    }
                    'K' => {
                        checkpoints.push(here);
                        cells.push(false);
                    }
                    other => {
                        return Err(GridError::UnknownSymbol {
                            symbol: other,
                            row,
                            col,
                        })
                    }
                }
            }
            flags.push(cells);
        }

        let start = start.ok_or(GridError::MissingMarker { role: "start" })?;
        let end = end.ok_or(GridError::MissingMarker { role: "end" })?;
        Grid::new(flags, start, end, checkpoints)
    }
}

fn set_marker(slot: &mut Option<Cell>, role: &'static str, cell: Cell) -> Result<(), GridError> {
    if slot.is_some() {
        return Err(GridError::DuplicateMarker {
            role,
            row: cell.row,
            col: cell.col,
        });
    }
    *slot = Some(cell);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLED: &str = r#"{
        "width": 3,
        "height": 3,
        "grid": [[0, 1, 0], [0, 1, 0], [0, 1, 0]],
        "start": [0, 0],
        "end": [0, 2]
    }"#;

    #[test]
    fn loads_json_without_keys() {
        let grid = Grid::from_json_str(WALLED).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.start(), Cell::new(0, 0));
        assert_eq!(grid.end(), Cell::new(0, 2));
        assert!(grid.checkpoints().is_empty());
        assert!(grid.is_obstacle(2, 1));
    }

    #[test]
    fn loads_json_with_keys() {
        let source = r#"{"width":2,"height":2,"grid":[[0,0],[0,0]],
            "start":[0,0],"end":[1,1],"keys":[[0,1]]}"#;
        let grid = Grid::from_json_str(source).unwrap();
        assert_eq!(grid.checkpoints(), &[Cell::new(0, 1)]);
    }

    #[test]
    fn json_output_keeps_the_maze_layout() {
        let grid = Grid::from_rows(&["S#.", "..K", "..E"]).unwrap();
        let json = grid.to_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["grid"][0], serde_json::json!([0, 1, 0]));
        assert_eq!(value["keys"], serde_json::json!([[1, 2]]));
        assert_eq!(Grid::from_json_str(&json).unwrap(), grid);
    }

    #[test]
    fn rejects_height_mismatch() {
        let source = r#"{"width":2,"height":3,"grid":[[0,0],[0,0]],"start":[0,0],"end":[1,1]}"#;
        let err = Grid::from_json_str(source).unwrap_err();
        assert!(matches!(
            err,
            GridError::HeightMismatch {
                declared: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn rejects_width_mismatch() {
        let source = r#"{"width":3,"height":1,"grid":[[0,0]],"start":[0,0],"end":[0,1]}"#;
        assert!(matches!(
            Grid::from_json_str(source).unwrap_err(),
            GridError::RaggedRow { .. }
        ));
    }

    #[test]
    fn rejects_unknown_cell_values() {
        let source = r#"{"width":2,"height":1,"grid":[[0,2]],"start":[0,0],"end":[0,0]}"#;
        assert!(matches!(
            Grid::from_json_str(source).unwrap_err(),
            GridError::InvalidCellValue { value: 2, .. }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Grid::from_json_str("{not json").unwrap_err(),
            GridError::Json(_)
        ));
    }

    #[test]
    fn ascii_rows_parse_markers() {
        let grid = Grid::from_rows(&["S.#", ".K.", "#.E"]).unwrap();
        assert_eq!(grid.start(), Cell::new(0, 0));
        assert_eq!(grid.end(), Cell::new(2, 2));
        assert_eq!(grid.checkpoints(), &[Cell::new(1, 1)]);
        assert_eq!(grid.obstacles(), vec![Cell::new(0, 2), Cell::new(2, 0)]);
    }

    #[test]
    fn ascii_star_marks_start_and_end() {
        let grid = Grid::from_rows(&["..", ".*"]).unwrap();
        assert_eq!(grid.start(), grid.end());
        assert_eq!(grid.manhattan_lower_bound(), 0);
    }

    #[test]
    fn ascii_rejects_missing_and_duplicate_markers() {
        assert!(matches!(
            Grid::from_rows(&["S..", "..."]).unwrap_err(),
            GridError::MissingMarker { role: "end" }
        ));
        assert!(matches!(
            Grid::from_rows(&["S.S", "..E"]).unwrap_err(),
            GridError::DuplicateMarker { role: "start", .. }
        ));
        assert!(matches!(
            Grid::from_rows(&["S.x", "..E"]).unwrap_err(),
            GridError::UnknownSymbol { symbol: 'x', .. }
        ));
    }
}
