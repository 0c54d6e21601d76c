#![doc = include_str!("../README.md")]

mod cli;
mod commands;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::solve::SolveArgs;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve {
            file,
            max_horizon,
            timeout,
            symmetry,
            no_pruning,
            dump_smt,
            live,
            show_formula,
            format,
            out,
        } => {
            commands::solve::run_solve_command(
                SolveArgs {
                    file,
                    max_horizon,
                    timeout,
                    symmetry,
                    no_pruning,
                    dump_smt,
                    live,
                    show_formula,
                    format,
                    out,
                },
                cli.max_input_bytes,
            )?;
        }
        Commands::Validate { file, format } => {
            commands::validate::run_validate_command(file, format, cli.max_input_bytes)?;
        }
        Commands::Render {
            file,
            solve,
            timeout,
        } => {
            commands::render::run_render_command(file, solve, timeout, cli.max_input_bytes)?;
        }
    }
    Ok(())
}
