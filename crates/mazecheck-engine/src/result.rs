use std::fmt;
use std::time::Duration;

use mazecheck_grid::Cell;
use mazecheck_smt::bmc::{HorizonOutcome, HorizonSearch};
use serde::{Deserialize, Serialize};

/// Terminal state of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    Found,
    Exhausted,
    Indeterminate,
}

impl SolveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Found => "found",
            SolveStatus::Exhausted => "exhausted",
            SolveStatus::Indeterminate => "indeterminate",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one solve, as reported to callers and serialized by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub found: bool,
    pub status: SolveStatus,
    /// Number of moves; present only when a path was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon: Option<usize>,
    /// `(row, col)` cells at steps `0..=horizon`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Cell>>,
    pub max_horizon: usize,
    pub horizons_checked: usize,
    pub elapsed_secs: f64,
    /// Permanent constraints asserted over the solve.
    pub formula_size: usize,
    pub trace: Vec<String>,
    /// Why an indeterminate solve stopped, e.g. `solver-unknown: timeout`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SolveResult {
    pub fn from_search(
        search: HorizonSearch,
        max_horizon: usize,
        elapsed: Duration,
        trace: Vec<String>,
    ) -> Self {
        let (status, horizon, path, reason) = match search.outcome {
            HorizonOutcome::Found { horizon, path } => {
                (SolveStatus::Found, Some(horizon), Some(path), None)
            }
            HorizonOutcome::Exhausted { .. } => (SolveStatus::Exhausted, None, None, None),
            HorizonOutcome::Indeterminate { reason, .. } => {
                (SolveStatus::Indeterminate, None, None, Some(reason.to_string()))
            }
        };
        Self {
            found: status == SolveStatus::Found,
            status,
            horizon,
            path,
            max_horizon,
            horizons_checked: search.profile.horizons_checked,
            elapsed_secs: elapsed.as_secs_f64(),
            formula_size: search.formula_size,
            trace,
            reason,
        }
    }

    /// Stable verdict string; depends only on the status, not on timings or
    /// the particular path.
    pub fn verdict_class(&self) -> &'static str {
        self.status.as_str()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.horizon, &self.path) {
            (SolveStatus::Found, Some(horizon), Some(path)) => {
                writeln!(f, "RESULT: PATH FOUND")?;
                writeln!(f, "Horizon {horizon} ({} cells).", path.len())?;
                let steps: Vec<String> = path.iter().map(Cell::to_string).collect();
                writeln!(f, "Path: {}", steps.join(" → "))?;
            }
            (SolveStatus::Indeterminate, ..) => {
                writeln!(f, "RESULT: INDETERMINATE")?;
                if let Some(reason) = &self.reason {
                    writeln!(f, "Reason: {reason}")?;
                }
            }
            _ => {
                writeln!(f, "RESULT: NO PATH")?;
                writeln!(f, "No path within horizon {}.", self.max_horizon)?;
            }
        }
        write!(
            f,
            "Checked {} horizon(s), {} permanent constraints, {:.3}s.",
            self.horizons_checked, self.formula_size, self.elapsed_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazecheck_smt::bmc::{IndeterminateReason, SearchProfile};

    fn search(outcome: HorizonOutcome) -> HorizonSearch {
        HorizonSearch {
            outcome,
            formula_size: 12,
            profile: SearchProfile {
                horizons_checked: 2,
                ..SearchProfile::default()
            },
        }
    }

    #[test]
    fn found_result_serializes_path_as_row_col_pairs() {
        let result = SolveResult::from_search(
            search(HorizonOutcome::Found {
                horizon: 1,
                path: vec![Cell::new(0, 0), Cell::new(0, 1)],
            }),
            4,
            Duration::from_millis(250),
            vec!["; Horizon 1".into()],
        );
        assert!(result.found);
        let json: serde_json::Value = serde_json::from_str(&result.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["horizon"], 1);
        assert_eq!(json["path"], serde_json::json!([[0, 0], [0, 1]]));
        assert_eq!(json["formula_size"], 12);
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn exhausted_result_omits_path_fields() {
        let result = SolveResult::from_search(
            search(HorizonOutcome::Exhausted { max_horizon: 9 }),
            9,
            Duration::ZERO,
            vec![],
        );
        assert!(!result.found);
        assert_eq!(result.verdict_class(), "exhausted");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("horizon").is_none());
        assert!(json.get("path").is_none());
        assert!(result.to_string().contains("No path within horizon 9."));
    }

    #[test]
    fn indeterminate_result_carries_reason() {
        let result = SolveResult::from_search(
            search(HorizonOutcome::Indeterminate {
                horizon: 3,
                reason: IndeterminateReason::SolverUnknown("timeout".into()),
            }),
            9,
            Duration::ZERO,
            vec![],
        );
        assert_eq!(result.status, SolveStatus::Indeterminate);
        assert_eq!(result.reason.as_deref(), Some("solver-unknown: timeout"));
        assert!(result.to_string().starts_with("RESULT: INDETERMINATE\nReason: solver-unknown: timeout"));
    }
}
