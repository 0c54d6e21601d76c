use std::collections::HashMap;

use crate::sorts::SmtSort;
use crate::terms::SmtTerm;

/// Result of a satisfiability check.
#[derive(Debug, Clone, PartialEq)]
pub enum SatResult {
    Sat,
    Unsat,
    Unknown(String),
}

/// Integer assignments extracted from a SAT result.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub values: HashMap<String, i64>,
}

impl Model {
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }
}

/// Abstract SMT solver interface.
///
/// A solver is a single-owner session: one horizon search drives it from
/// start to finish and nothing else may interleave commands with it.
pub trait SmtSolver {
    type Error: std::error::Error;

    /// Declare a new variable.
    fn declare_var(&mut self, name: &str, sort: SmtSort) -> Result<(), Self::Error>;

    /// Assert a constraint in the current scope.
    fn assert(&mut self, term: &SmtTerm) -> Result<(), Self::Error>;

    /// Push a new scope.
    fn push(&mut self) -> Result<(), Self::Error>;

    /// Pop the innermost scope, dropping every assertion made inside it.
    fn pop(&mut self) -> Result<(), Self::Error>;

    /// Check satisfiability and extract a model if SAT.
    ///
    /// The model only carries values for `vars`; it is valid until the next
    /// mutation of the solver.
    fn check_sat_with_model(
        &mut self,
        vars: &[(&str, SmtSort)],
    ) -> Result<(SatResult, Option<Model>), Self::Error>;
}
