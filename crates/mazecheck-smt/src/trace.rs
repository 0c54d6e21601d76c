//! Append-only, human-readable log of the constraints a search emits.
//!
//! The horizon driver is the single writer. Observers hold clones of the same
//! [`TraceLog`] and poll it from other threads while the search runs. Once the
//! search reaches a terminal state the log is frozen and later appends are
//! dropped.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

#[derive(Debug, Default)]
struct TraceState {
    lines: Vec<String>,
    frozen: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    state: Arc<RwLock<TraceState>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, TraceState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, TraceState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a line. Returns false if the log is already frozen.
    pub fn push(&self, line: impl Into<String>) -> bool {
        let mut state = self.write();
        if state.frozen {
            warn!("trace: append after freeze ignored");
            return false;
        }
        state.lines.push(line.into());
        true
    }

    /// Append a `;`-prefixed comment line.
    pub fn comment(&self, text: impl AsRef<str>) -> bool {
        self.push(format!("; {}", text.as_ref()))
    }

    pub fn freeze(&self) {
        self.write().frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.read().frozen
    }

    pub fn len(&self) -> usize {
        self.read().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.read().lines.clone()
    }

    /// Lines appended at or after `offset`. Polling observers pass the total
    /// they have already seen.
    pub fn lines_since(&self, offset: usize) -> Vec<String> {
        let state = self.read();
        state.lines.get(offset..).map(<[String]>::to_vec).unwrap_or_default()
    }

    pub fn render(&self) -> String {
        self.read().lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_until_frozen() {
        let trace = TraceLog::new();
        assert!(trace.is_empty());
        assert!(trace.comment("Initial state at step 0"));
        assert!(trace.push("(x_0 = 0) ∧ (y_0 = 0)"));
        trace.freeze();
        assert!(!trace.push("late"));
        assert!(trace.is_frozen());
        assert_eq!(
            trace.render(),
            "; Initial state at step 0\n(x_0 = 0) ∧ (y_0 = 0)"
        );
    }

    #[test]
    fn lines_since_returns_only_new_entries() {
        let trace = TraceLog::new();
        trace.push("a");
        trace.push("b");
        let seen = trace.len();
        trace.push("c");
        assert_eq!(trace.lines_since(seen), vec!["c".to_string()]);
        assert!(trace.lines_since(10).is_empty());
    }

    #[test]
    fn clones_share_one_log_across_threads() {
        let trace = TraceLog::new();
        let writer = trace.clone();
        let handle = std::thread::spawn(move || {
            for i in 0..100 {
                writer.push(format!("line {i}"));
            }
            writer.freeze();
        });
        handle.join().unwrap();
        assert_eq!(trace.len(), 100);
        assert!(trace.is_frozen());
        assert_eq!(trace.snapshot()[99], "line 99");
    }
}
