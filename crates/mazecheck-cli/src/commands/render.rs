use std::path::PathBuf;

use miette::IntoDiagnostic;

use mazecheck_engine::visualization::{legend, render_grid};
use mazecheck_engine::{SolveOptions, SolveSession};

use crate::commands::helpers::read_grid_file;

pub(crate) fn run_render_command(
    file: PathBuf,
    solve: bool,
    timeout: u64,
    max_input_bytes: u64,
) -> miette::Result<()> {
    let grid = read_grid_file(&file, max_input_bytes)?;
    let path = if solve {
        let options = SolveOptions {
            timeout_secs: timeout,
            ..SolveOptions::default()
        };
        let result = SolveSession::new(grid.clone(), options)
            .solve()
            .into_diagnostic()?;
        if result.path.is_none() {
            eprintln!("No path: {}", result.status);
        }
        result.path
    } else {
        None
    };

    print!("{}", render_grid(&grid, path.as_deref()));
    println!("{}", legend());
    Ok(())
}
