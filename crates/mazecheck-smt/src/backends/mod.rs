//! Solver backends behind the [`SmtSolver`](crate::solver::SmtSolver) trait.

pub mod recording;
pub mod scripted;
pub mod smtlib_printer;
pub mod z3_backend;
