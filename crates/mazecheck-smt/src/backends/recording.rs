//! SMT-LIB2 transcript of everything sent to a backend.

use crate::backends::smtlib_printer::{declaration_to_smtlib, to_smtlib};
use crate::solver::{Model, SatResult, SmtSolver};
use crate::sorts::SmtSort;
use crate::terms::SmtTerm;

/// Wraps a solver and mirrors each command as an SMT-LIB2 line.
///
/// The transcript is a replayable QF_LIA script: feeding it to any SMT-LIB
/// solver reproduces the same sequence of checks.
pub struct RecordingSolver<S> {
    inner: S,
    lines: Vec<String>,
}

impl<S: SmtSolver> RecordingSolver<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            lines: vec!["(set-logic QF_LIA)".to_string()],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The transcript joined into one script.
    pub fn script(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

impl<S: SmtSolver> SmtSolver for RecordingSolver<S> {
    type Error = S::Error;

    fn declare_var(&mut self, name: &str, sort: SmtSort) -> Result<(), Self::Error> {
        self.lines.push(declaration_to_smtlib(name, sort));
        self.inner.declare_var(name, sort)
    }

    fn assert(&mut self, term: &SmtTerm) -> Result<(), Self::Error> {
        self.lines.push(format!("(assert {})", to_smtlib(term)));
        self.inner.assert(term)
    }

    fn push(&mut self) -> Result<(), Self::Error> {
        self.lines.push("(push 1)".to_string());
        self.inner.push()
    }

    fn pop(&mut self) -> Result<(), Self::Error> {
        self.lines.push("(pop 1)".to_string());
        self.inner.pop()
    }

    fn check_sat_with_model(
        &mut self,
        vars: &[(&str, SmtSort)],
    ) -> Result<(SatResult, Option<Model>), Self::Error> {
        self.lines.push("(check-sat)".to_string());
        let out = self.inner.check_sat_with_model(vars)?;
        if out.0 == SatResult::Sat && !vars.is_empty() {
            let names: Vec<&str> = vars.iter().map(|(n, _)| *n).collect();
            self.lines.push(format!("(get-value ({}))", names.join(" ")));
        }
        Ok(out)
    }
}
