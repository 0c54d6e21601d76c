#![doc = include_str!("../README.md")]

pub mod result;
pub mod session;
pub mod timeout;
pub mod visualization;

pub use result::{SolveResult, SolveStatus};
pub use session::{EngineError, SolveHandle, SolveOptions, SolveSession, SymmetryBreaking};
