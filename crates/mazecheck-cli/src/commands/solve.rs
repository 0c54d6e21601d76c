use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use miette::IntoDiagnostic;
use tracing::info;

use mazecheck_engine::visualization::{legend, render_grid};
use mazecheck_engine::{SolveOptions, SolveResult, SolveSession};
use mazecheck_grid::Grid;

use crate::commands::helpers::{
    parse_output_format, parse_symmetry_breaking, read_grid_file, write_json_artifact,
};
use crate::types::OutputFormat;

const LIVE_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub(crate) struct SolveArgs {
    pub(crate) file: PathBuf,
    pub(crate) max_horizon: Option<usize>,
    pub(crate) timeout: u64,
    pub(crate) symmetry: String,
    pub(crate) no_pruning: bool,
    pub(crate) dump_smt: Option<PathBuf>,
    pub(crate) live: bool,
    pub(crate) show_formula: bool,
    pub(crate) format: String,
    pub(crate) out: Option<PathBuf>,
}

pub(crate) fn run_solve_command(args: SolveArgs, max_input_bytes: u64) -> miette::Result<()> {
    let output_format = parse_output_format(&args.format)?;
    let grid = read_grid_file(&args.file, max_input_bytes)?;
    let options = SolveOptions {
        max_horizon: args.max_horizon,
        timeout_secs: args.timeout,
        symmetry_breaking: parse_symmetry_breaking(&args.symmetry)?,
        reachability_pruning: !args.no_pruning,
        dump_smt: args.dump_smt,
    };
    info!(file = %args.file.display(), "Loaded grid");

    let session = SolveSession::new(grid.clone(), options);
    let result = if args.live {
        solve_live(session, output_format)?
    } else {
        session.solve().into_diagnostic()?
    };

    if let Some(out) = &args.out {
        let value = serde_json::to_value(&result).into_diagnostic()?;
        write_json_artifact(out, &value)?;
    }

    match output_format {
        OutputFormat::Json => {
            println!("{}", result.to_json_pretty().into_diagnostic()?);
        }
        OutputFormat::Text => {
            print_text_result(&grid, &result, args.show_formula && !args.live);
        }
    }
    Ok(())
}

/// Run the solve on a worker thread and echo trace lines as they appear.
/// In JSON mode the stream goes to stderr so stdout stays parseable.
fn solve_live(session: SolveSession, format: OutputFormat) -> miette::Result<SolveResult> {
    let handle = session.spawn().into_diagnostic()?;
    let mut seen = 0;
    loop {
        let finished = handle.is_finished();
        let fresh = handle.trace_since(seen);
        seen += fresh.len();
        emit_lines(&fresh, format)?;
        if finished {
            break;
        }
        std::thread::sleep(LIVE_POLL_INTERVAL);
    }
    handle.wait().into_diagnostic()
}

fn emit_lines(lines: &[String], format: OutputFormat) -> miette::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    match format {
        OutputFormat::Text => {
            let mut out = std::io::stdout().lock();
            for line in lines {
                writeln!(out, "{line}").into_diagnostic()?;
            }
            out.flush().into_diagnostic()
        }
        OutputFormat::Json => {
            let mut err = std::io::stderr().lock();
            for line in lines {
                writeln!(err, "{line}").into_diagnostic()?;
            }
            Ok(())
        }
    }
}

fn print_text_result(grid: &Grid, result: &SolveResult, show_formula: bool) {
    println!("{result}");
    if let Some(path) = &result.path {
        println!();
        print!("{}", render_grid(grid, Some(path)));
        println!("{}", legend());
    }
    if show_formula {
        println!();
        println!("Constraint trace:");
        for line in &result.trace {
            println!("{line}");
        }
    }
}
