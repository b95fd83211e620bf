//! Steady CLI support: trace replay through the visual stability gate.

pub mod replay;

pub use replay::{ReplayError, Script, Step, run};
