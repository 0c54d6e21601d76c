use std::path::PathBuf;

use miette::IntoDiagnostic;

use crate::commands::helpers::{parse_output_format, read_grid_file};
use crate::types::{GridSummary, OutputFormat};

pub(crate) fn run_validate_command(
    file: PathBuf,
    format: String,
    max_input_bytes: u64,
) -> miette::Result<()> {
    let output_format = parse_output_format(&format)?;
    let grid = read_grid_file(&file, max_input_bytes)?;
    let summary = GridSummary::of(&grid);

    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).into_diagnostic()?
            );
        }
        OutputFormat::Text => {
            println!("Grid {}: OK", file.display());
            println!("  Size: {}x{}", summary.width, summary.height);
            println!("  Obstacles: {}", summary.obstacles);
            println!("  Start: {}  End: {}", summary.start, summary.end);
            if summary.checkpoints.is_empty() {
                println!("  Checkpoints: (none)");
            } else {
                let cells: Vec<String> =
                    summary.checkpoints.iter().map(ToString::to_string).collect();
                println!("  Checkpoints: {}", cells.join(", "));
            }
            println!(
                "  Horizon range: {}..={}",
                summary.lower_bound, summary.default_max_horizon
            );
        }
    }
    Ok(())
}
