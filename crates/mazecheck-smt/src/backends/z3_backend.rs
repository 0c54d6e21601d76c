use std::collections::HashMap;

use thiserror::Error;
use z3::SatResult as Z3SatResult;

use crate::solver::{Model, SatResult, SmtSolver};
use crate::sorts::SmtSort;
use crate::terms::SmtTerm;

#[derive(Debug, Error)]
pub enum Z3Error {
    #[error("Z3 error: {0}")]
    Internal(String),
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),
    #[error("Pop without a matching push")]
    UnbalancedPop,
}

/// Z3 session. The underlying context is thread-local, so a `Z3Solver` must
/// be created on the thread that drives it.
pub struct Z3Solver {
    solver: z3::Solver,
    int_vars: HashMap<String, z3::ast::Int>,
    scopes: usize,
}

impl Z3Solver {
    pub fn new() -> Self {
        Self {
            solver: z3::Solver::new(),
            int_vars: HashMap::new(),
            scopes: 0,
        }
    }

    /// Solver whose individual `check-sat` calls give up after `timeout_secs`
    /// and report unknown. Zero disables the limit.
    pub fn with_timeout_secs(timeout_secs: u64) -> Self {
        if timeout_secs == 0 {
            return Self::new();
        }
        let session = Self::new();
        let mut params = z3::Params::new();
        let timeout_ms = u32::try_from(timeout_secs.saturating_mul(1000)).unwrap_or(u32::MAX);
        params.set_u32("timeout", timeout_ms);
        session.solver.set_params(&params);
        session
    }

    fn translate_term(&self, term: &SmtTerm) -> Result<Z3Term, Z3Error> {
        match term {
            SmtTerm::Var(name) => self
                .int_vars
                .get(name)
                .map(|v| Z3Term::Int(v.clone()))
                .ok_or_else(|| Z3Error::UnknownVariable(name.clone())),
            SmtTerm::IntLit(n) => Ok(Z3Term::Int(z3::ast::Int::from_i64(*n))),
            SmtTerm::Add(lhs, rhs) => {
                let (l, r) = self.int_operands(lhs, rhs)?;
                Ok(Z3Term::Int(&l + &r))
            }
            SmtTerm::Sub(lhs, rhs) => {
                let (l, r) = self.int_operands(lhs, rhs)?;
                Ok(Z3Term::Int(&l - &r))
            }
            SmtTerm::Eq(lhs, rhs) => {
                let (l, r) = self.int_operands(lhs, rhs)?;
                Ok(Z3Term::Bool(l.eq(&r)))
            }
            SmtTerm::Lt(lhs, rhs) => {
                let (l, r) = self.int_operands(lhs, rhs)?;
                Ok(Z3Term::Bool(l.lt(&r)))
            }
            SmtTerm::Le(lhs, rhs) => {
                let (l, r) = self.int_operands(lhs, rhs)?;
                Ok(Z3Term::Bool(l.le(&r)))
            }
            SmtTerm::Gt(lhs, rhs) => {
                let (l, r) = self.int_operands(lhs, rhs)?;
                Ok(Z3Term::Bool(l.gt(&r)))
            }
            SmtTerm::Ge(lhs, rhs) => {
                let (l, r) = self.int_operands(lhs, rhs)?;
                Ok(Z3Term::Bool(l.ge(&r)))
            }
            SmtTerm::And(terms) => {
                let bools = self.bool_operands(terms)?;
                let refs: Vec<&z3::ast::Bool> = bools.iter().collect();
                Ok(Z3Term::Bool(z3::ast::Bool::and(&refs)))
            }
            SmtTerm::Or(terms) => {
                let bools = self.bool_operands(terms)?;
                let refs: Vec<&z3::ast::Bool> = bools.iter().collect();
                Ok(Z3Term::Bool(z3::ast::Bool::or(&refs)))
            }
            SmtTerm::Not(inner) => {
                let b = self.translate_term(inner)?.into_bool()?;
                Ok(Z3Term::Bool(b.not()))
            }
            SmtTerm::Ite(cond, then, els) => {
                let c = self.translate_term(cond)?.into_bool()?;
                let (t, e) = self.int_operands(then, els)?;
                Ok(Z3Term::Int(c.ite(&t, &e)))
            }
        }
    }

    fn int_operands(
        &self,
        lhs: &SmtTerm,
        rhs: &SmtTerm,
    ) -> Result<(z3::ast::Int, z3::ast::Int), Z3Error> {
        let l = self.translate_term(lhs)?.into_int()?;
        let r = self.translate_term(rhs)?.into_int()?;
        Ok((l, r))
    }

    fn bool_operands(&self, terms: &[SmtTerm]) -> Result<Vec<z3::ast::Bool>, Z3Error> {
        terms
            .iter()
            .map(|t| self.translate_term(t).and_then(Z3Term::into_bool))
            .collect()
    }

    /// Unknown carries Z3's own reason, e.g. `timeout` or `canceled`.
    fn map_result(&self, result: Z3SatResult) -> SatResult {
        match result {
            Z3SatResult::Sat => SatResult::Sat,
            Z3SatResult::Unsat => SatResult::Unsat,
            Z3SatResult::Unknown => SatResult::Unknown(
                self.solver
                    .get_reason_unknown()
                    .unwrap_or_else(|| "Z3 returned unknown".into()),
            ),
        }
    }
}

/// Translated term: integer expressions or the formulas built over them.
enum Z3Term {
    Int(z3::ast::Int),
    Bool(z3::ast::Bool),
}

impl Z3Term {
    fn into_int(self) -> Result<z3::ast::Int, Z3Error> {
        match self {
            Z3Term::Int(i) => Ok(i),
            Z3Term::Bool(_) => Err(Z3Error::Internal("Expected Int, got Bool".into())),
        }
    }

    fn into_bool(self) -> Result<z3::ast::Bool, Z3Error> {
        match self {
            Z3Term::Bool(b) => Ok(b),
            Z3Term::Int(_) => Err(Z3Error::Internal("Expected Bool, got Int".into())),
        }
    }
}

impl Default for Z3Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl SmtSolver for Z3Solver {
    type Error = Z3Error;

    fn declare_var(&mut self, name: &str, sort: SmtSort) -> Result<(), Z3Error> {
        match sort {
            SmtSort::Int => {
                let v = z3::ast::Int::new_const(name);
                self.int_vars.insert(name.to_string(), v);
            }
        }
        Ok(())
    }

    fn assert(&mut self, term: &SmtTerm) -> Result<(), Z3Error> {
        let z3_term = self.translate_term(term)?.into_bool()?;
        self.solver.assert(&z3_term);
        Ok(())
    }

    fn push(&mut self) -> Result<(), Z3Error> {
        self.solver.push();
        self.scopes += 1;
        Ok(())
    }

    fn pop(&mut self) -> Result<(), Z3Error> {
        if self.scopes == 0 {
            return Err(Z3Error::UnbalancedPop);
        }
        self.solver.pop(1);
        self.scopes -= 1;
        Ok(())
    }

    fn check_sat_with_model(
        &mut self,
        vars: &[(&str, SmtSort)],
    ) -> Result<(SatResult, Option<Model>), Z3Error> {
        match self.solver.check() {
            Z3SatResult::Sat => {
                let z3_model = self
                    .solver
                    .get_model()
                    .ok_or_else(|| Z3Error::Internal("SAT but no model available".into()))?;
                let mut values = HashMap::new();

                for &(name, _) in vars {
                    let value = self
                        .int_vars
                        .get(name)
                        .and_then(|v| z3_model.eval::<z3::ast::Int>(v, true))
                        .and_then(|val| val.as_i64());
                    if let Some(n) = value {
                        values.insert(name.to_string(), n);
                    }
                }

                Ok((SatResult::Sat, Some(Model { values })))
            }
            other => Ok((self.map_result(other), None)),
        }
    }
}
