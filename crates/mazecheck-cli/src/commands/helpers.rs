use std::fs;
use std::path::Path;

use miette::IntoDiagnostic;
use serde_json::Value;

use mazecheck_engine::SymmetryBreaking;
use mazecheck_grid::Grid;

use crate::types::OutputFormat;

pub(crate) fn parse_output_format(raw: &str) -> miette::Result<OutputFormat> {
    match raw {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => miette::bail!("Unknown output format: {other}. Use 'text' or 'json'."),
    }
}

pub(crate) fn parse_symmetry_breaking(raw: &str) -> miette::Result<SymmetryBreaking> {
    match raw {
        "auto" => Ok(SymmetryBreaking::Auto),
        "always" => Ok(SymmetryBreaking::Always),
        "never" => Ok(SymmetryBreaking::Never),
        other => miette::bail!("Unknown symmetry mode: {other}. Use 'auto', 'always' or 'never'."),
    }
}

/// Read a grid file, refusing anything larger than `max_input_bytes` before
/// it is loaded.
pub(crate) fn read_grid_file(path: &Path, max_input_bytes: u64) -> miette::Result<Grid> {
    let metadata = fs::metadata(path).into_diagnostic()?;
    if metadata.len() > max_input_bytes {
        miette::bail!(
            "Input file {} is {} bytes, exceeding limit of {} bytes",
            path.display(),
            metadata.len(),
            max_input_bytes
        );
    }
    let source = fs::read_to_string(path).into_diagnostic()?;
    Grid::from_json_str(&source)
        .map_err(|e| miette::Report::new(e).wrap_err(format!("Invalid grid file {}", path.display())))
}

pub(crate) fn write_json_artifact(path: &Path, value: &Value) -> miette::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).into_diagnostic()?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(value).into_diagnostic()?).into_diagnostic()?;
    Ok(())
}
