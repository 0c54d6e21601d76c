//! Contract tests for the `mazecheck` binary against the fixtures in `mazes/`.

use std::path::PathBuf;
use std::process::{Command, Output};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn maze(name: &str) -> PathBuf {
    workspace_root().join("mazes").join(name)
}

fn mazecheck(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mazecheck"))
        .args(args)
        .env("RUST_LOG", "warn")
        .env_remove("MAZECHECK_MAX_INPUT_BYTES")
        .current_dir(workspace_root())
        .output()
        .expect("failed to run mazecheck")
}

fn solve_json(args: &[&str]) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let output = mazecheck(args);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn solve_open_grid_json() -> TestResult {
    let path = maze("open_3x3.json");
    let json = solve_json(&["solve", path.to_str().unwrap(), "--format", "json"])?;
    assert_eq!(json["found"], true);
    assert_eq!(json["status"], "found");
    assert_eq!(json["horizon"], 4);
    assert_eq!(json["path"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["path"][0], serde_json::json!([0, 0]));
    assert_eq!(json["path"][4], serde_json::json!([2, 2]));
    assert!(json["formula_size"].as_u64().unwrap_or(0) > 0);
    assert!(json["trace"].as_array().is_some_and(|t| !t.is_empty()));
    Ok(())
}

#[test]
fn solve_walled_grid_reports_no_path() -> TestResult {
    let path = maze("walled_3x3.json");
    let json = solve_json(&["solve", path.to_str().unwrap(), "--format", "json"])?;
    assert_eq!(json["found"], false);
    assert_eq!(json["status"], "exhausted");
    assert!(json.get("path").is_none());
    Ok(())
}

#[test]
fn solve_checkpoint_grid_visits_key() -> TestResult {
    let path = maze("checkpoint_5x5.json");
    let json = solve_json(&["solve", path.to_str().unwrap(), "--format", "json"])?;
    assert_eq!(json["horizon"], 8);
    let path = json["path"].as_array().cloned().unwrap_or_default();
    assert!(path.contains(&serde_json::json!([2, 2])));
    Ok(())
}

#[test]
fn dead_end_checkpoint_needs_auto_symmetry() -> TestResult {
    let path = maze("dead_end_key.json");
    let auto = solve_json(&["solve", path.to_str().unwrap(), "--format", "json"])?;
    assert_eq!(auto["horizon"], 10);

    let forced = solve_json(&[
        "solve",
        path.to_str().unwrap(),
        "--format",
        "json",
        "--symmetry",
        "always",
    ])?;
    assert_eq!(forced["status"], "exhausted");
    Ok(())
}

#[test]
fn max_horizon_below_distance_is_exhausted() -> TestResult {
    let path = maze("open_3x3.json");
    let json = solve_json(&[
        "solve",
        path.to_str().unwrap(),
        "--format",
        "json",
        "--max-horizon",
        "3",
    ])?;
    assert_eq!(json["status"], "exhausted");
    assert_eq!(json["formula_size"], 0);
    assert_eq!(json["max_horizon"], 3);
    Ok(())
}

#[test]
fn text_output_draws_the_path() {
    let path = maze("open_3x3.json");
    let output = mazecheck(&["solve", path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("RESULT: PATH FOUND"));
    assert!(stdout.contains("Horizon 4 (5 cells)."));
    assert!(stdout.contains("S start, E end"));
}

#[test]
fn live_mode_streams_trace_before_result() {
    let path = maze("checkpoint_5x5.json");
    let output = mazecheck(&["solve", path.to_str().unwrap(), "--live"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let trace_at = stdout.find("; Initial state at step 0");
    let result_at = stdout.find("RESULT: PATH FOUND");
    assert!(trace_at.is_some());
    assert!(trace_at < result_at);
}

#[test]
fn dump_smt_and_out_write_files() -> TestResult {
    let dir = tempfile::tempdir()?;
    let dump = dir.path().join("solve.smt2");
    let out = dir.path().join("reports").join("result.json");
    let path = maze("open_3x3.json");
    let output = mazecheck(&[
        "solve",
        path.to_str().unwrap(),
        "--dump-smt",
        dump.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--quiet",
    ]);
    assert!(output.status.success());
    let script = std::fs::read_to_string(&dump)?;
    assert!(script.starts_with("(set-logic QF_LIA)"));
    let report: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out)?)?;
    assert_eq!(report["horizon"], 4);
    Ok(())
}

#[test]
fn validate_rejects_blocked_start() {
    let path = maze("blocked_start.json");
    let output = mazecheck(&["validate", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is an obstacle"), "stderr: {stderr}");
}

#[test]
fn validate_summarises_grid_as_json() -> TestResult {
    let path = maze("checkpoint_5x5.json");
    let json = solve_json(&["validate", path.to_str().unwrap(), "--format", "json"])?;
    assert_eq!(json["valid"], true);
    assert_eq!(json["width"], 5);
    assert_eq!(json["checkpoints"], serde_json::json!([[2, 2]]));
    assert_eq!(json["lower_bound"], 8);
    assert_eq!(json["default_max_horizon"], 25);
    Ok(())
}

#[test]
fn oversized_input_is_rejected() {
    let path = maze("checkpoint_5x5.json");
    let output = mazecheck(&["--max-input-bytes", "50", "validate", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeding limit of 50 bytes"), "stderr: {stderr}");
}

#[test]
fn input_limit_reads_environment() {
    let path = maze("checkpoint_5x5.json");
    let output = Command::new(env!("CARGO_BIN_EXE_mazecheck"))
        .args(["validate", path.to_str().unwrap()])
        .env("MAZECHECK_MAX_INPUT_BYTES", "10")
        .output()
        .expect("failed to run mazecheck");
    assert!(!output.status.success());
}

#[test]
fn render_without_solving_shows_markers() {
    let path = maze("walled_3x3.json");
    let output = mazecheck(&["render", path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("S#.\n.#.\n.#E\n"));
}

#[test]
fn unknown_format_is_an_error() {
    let path = maze("open_3x3.json");
    let output = mazecheck(&["solve", path.to_str().unwrap(), "--format", "yaml"]);
    assert!(!output.status.success());
}
