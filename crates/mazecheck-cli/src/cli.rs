//! CLI argument definitions: top-level `Cli` struct and `Commands` enum.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub(crate) const CLI_LONG_ABOUT: &str =
    "Shortest checkpoint-visiting paths through obstacle grids, found by \
    incremental SMT bounded model checking.\n\n\
    Typical use:\n  \
    1. mazecheck validate maze.json\n  \
    2. mazecheck solve maze.json\n  \
    3. mazecheck render maze.json --solve";

#[derive(Parser)]
#[command(name = "mazecheck")]
#[command(about = "Incremental SMT pathfinding through grids with checkpoints")]
#[command(long_about = CLI_LONG_ABOUT)]
#[command(version)]
pub(crate) struct Cli {
    /// Maximum grid file size in bytes
    #[arg(
        long,
        global = true,
        env = "MAZECHECK_MAX_INPUT_BYTES",
        default_value_t = 1048576
    )]
    pub(crate) max_input_bytes: u64,

    /// Only log warnings and errors (RUST_LOG still wins)
    #[arg(long, short, global = true, default_value_t = false)]
    pub(crate) quiet: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Search for the shortest path visiting every checkpoint
    Solve {
        /// Grid file (JSON)
        file: PathBuf,

        /// Largest horizon to test (default: width × height)
        #[arg(long)]
        max_horizon: Option<usize>,

        /// Per-check and overall timeout in seconds (0 disables)
        #[arg(long, default_value_t = 300)]
        timeout: u64,

        /// No-reversal constraint: auto | always | never
        #[arg(long, default_value = "auto")]
        symmetry: String,

        /// Disable the distance-to-goal pruning inside each horizon
        #[arg(long, default_value_t = false)]
        no_pruning: bool,

        /// Write the SMT-LIB2 transcript of the solve to this file
        #[arg(long)]
        dump_smt: Option<PathBuf>,

        /// Stream constraint trace lines while the solver runs
        #[arg(long, default_value_t = false)]
        live: bool,

        /// Print the full constraint trace after the result
        #[arg(long, default_value_t = false)]
        show_formula: bool,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write the JSON result to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check a grid file and print a summary
    Validate {
        /// Grid file (JSON)
        file: PathBuf,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Draw a grid as ASCII, optionally with the solved path
    Render {
        /// Grid file (JSON)
        file: PathBuf,

        /// Solve first and overlay the path
        #[arg(long, default_value_t = false)]
        solve: bool,

        /// Timeout in seconds when solving (0 disables)
        #[arg(long, default_value_t = 300)]
        timeout: u64,
    },
}
