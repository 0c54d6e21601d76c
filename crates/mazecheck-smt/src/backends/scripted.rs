//! Deterministic backend that replays a fixed sequence of verdicts.
//!
//! Used to drive the horizon search through paths a real solver rarely takes
//! (unknown verdicts, missing models) and to count the commands it issues.

use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use crate::solver::{Model, SatResult, SmtSolver};
use crate::sorts::SmtSort;
use crate::terms::SmtTerm;

#[derive(Debug, Error)]
pub enum ScriptedError {
    #[error("pop without a matching push")]
    UnbalancedPop,
    #[error("variable {0} declared twice")]
    Redeclared(String),
}

#[derive(Debug, Default)]
pub struct ScriptedSolver {
    verdicts: VecDeque<SatResult>,
    model: HashMap<String, i64>,
    declared: Vec<String>,
    /// Assertions per scope; index 0 is the permanent level.
    scopes: Vec<Vec<SmtTerm>>,
    checks: usize,
    pushes: usize,
    pops: usize,
}

impl ScriptedSolver {
    /// Verdicts are consumed one per check. Once exhausted every further
    /// check reports unknown.
    pub fn new(verdicts: Vec<SatResult>) -> Self {
        Self {
            verdicts: verdicts.into(),
            scopes: vec![Vec::new()],
            ..Self::default()
        }
    }

    /// Integer values handed out for SAT verdicts. Requested variables that
    /// are missing here are left out of the model.
    pub fn with_model(mut self, values: impl IntoIterator<Item = (String, i64)>) -> Self {
        self.model = values.into_iter().collect();
        self
    }

    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    pub fn permanent_assertions(&self) -> &[SmtTerm] {
        &self.scopes[0]
    }

    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    pub fn checks(&self) -> usize {
        self.checks
    }

    pub fn pushes(&self) -> usize {
        self.pushes
    }

    pub fn pops(&self) -> usize {
        self.pops
    }

    /// Total number of commands received.
    pub fn commands(&self) -> usize {
        self.declared.len()
            + self.scopes.iter().map(Vec::len).sum::<usize>()
            + self.checks
            + self.pushes
            + self.pops
    }

    fn next_verdict(&mut self) -> SatResult {
        self.checks += 1;
        self.verdicts
            .pop_front()
            .unwrap_or_else(|| SatResult::Unknown("script exhausted".into()))
    }
}

impl SmtSolver for ScriptedSolver {
    type Error = ScriptedError;

    fn declare_var(&mut self, name: &str, _sort: SmtSort) -> Result<(), Self::Error> {
        if self.declared.iter().any(|d| d == name) {
            return Err(ScriptedError::Redeclared(name.to_string()));
        }
        self.declared.push(name.to_string());
        Ok(())
    }

    fn assert(&mut self, term: &SmtTerm) -> Result<(), Self::Error> {
        if let Some(scope) = self.scopes.last_mut() {
            scope.push(term.clone());
        }
        Ok(())
    }

    fn push(&mut self) -> Result<(), Self::Error> {
        self.pushes += 1;
        self.scopes.push(Vec::new());
        Ok(())
    }

    fn pop(&mut self) -> Result<(), Self::Error> {
        if self.scopes.len() <= 1 {
            return Err(ScriptedError::UnbalancedPop);
        }
        self.pops += 1;
        self.scopes.pop();
        Ok(())
    }

    fn check_sat_with_model(
        &mut self,
        vars: &[(&str, SmtSort)],
    ) -> Result<(SatResult, Option<Model>), Self::Error> {
        let verdict = self.next_verdict();
        if verdict != SatResult::Sat {
            return Ok((verdict, None));
        }
        let values = vars
            .iter()
            .filter_map(|(name, _)| {
                self.model
                    .get(*name)
                    .map(|&v| (name.to_string(), v))
            })
            .collect();
        Ok((SatResult::Sat, Some(Model { values })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdicts_are_consumed_in_order() {
        let mut solver = ScriptedSolver::new(vec![SatResult::Unsat, SatResult::Sat]);
        let mut check = || solver.check_sat_with_model(&[]).unwrap().0;
        assert_eq!(check(), SatResult::Unsat);
        assert_eq!(check(), SatResult::Sat);
        assert!(matches!(check(), SatResult::Unknown(_)));
        assert_eq!(solver.checks(), 3);
    }

    #[test]
    fn scoped_assertions_leave_with_pop() {
        let mut solver = ScriptedSolver::new(vec![]);
        let permanent = SmtTerm::var("x_0").ge(SmtTerm::int(0));
        solver.assert(&permanent).unwrap();
        solver.push().unwrap();
        solver.assert(&SmtTerm::var("x_0").eq(SmtTerm::int(2))).unwrap();
        assert_eq!(solver.depth(), 1);
        solver.pop().unwrap();
        assert_eq!(solver.depth(), 0);
        assert_eq!(solver.permanent_assertions(), &[permanent]);
        assert!(matches!(solver.pop(), Err(ScriptedError::UnbalancedPop)));
    }

    #[test]
    fn model_only_contains_requested_known_values() {
        let mut solver = ScriptedSolver::new(vec![SatResult::Sat])
            .with_model([("x_0".to_string(), 1), ("y_0".to_string(), 2)]);
        let (_, model) = solver
            .check_sat_with_model(&[("x_0", SmtSort::Int), ("z", SmtSort::Int)])
            .unwrap();
        let model = model.unwrap();
        assert_eq!(model.get_int("x_0"), Some(1));
        assert_eq!(model.get_int("y_0"), None);
        assert_eq!(model.get_int("z"), None);
    }

    #[test]
    fn redeclaration_is_rejected() {
        let mut solver = ScriptedSolver::new(vec![]);
        solver.declare_var("x_0", SmtSort::Int).unwrap();
        assert!(matches!(
            solver.declare_var("x_0", SmtSort::Int),
            Err(ScriptedError::Redeclared(_))
        ));
    }
}
