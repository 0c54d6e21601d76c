#![doc = include_str!("../README.md")]

//! SMT encoding and incremental bounded model checking for grid pathfinding.
//!
//! Permanent per-step constraints live in the [`encoder::StepLedger`]; the
//! [`bmc`] driver wraps each horizon's goal and checkpoint constraints in a
//! push/pop frame so a single solver session serves every horizon.

pub mod backends;
pub mod bmc;
pub mod encoder;
pub mod solver;
pub mod sorts;
pub mod terms;
pub mod trace;
