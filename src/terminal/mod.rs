//! Terminal capability module orchestrator.
//!
//! Callers import the capability trait and its backends from here while
//! the implementation details live in the private `core` module.

mod core;

pub use core::{OsTerminal, StaticTerminal, Terminal};
