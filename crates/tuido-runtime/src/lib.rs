#![forbid(unsafe_code)]

//! Elm-style runtime for tuido.
//!
//! Applications implement [`Model`]; the [`Program`] drives a model against a
//! real terminal, and the [`ProgramSimulator`] drives the same model without
//! any terminal for deterministic tests.

pub mod program;
pub mod simulator;
pub mod terminal;

pub use program::{Cmd, Model};
pub use simulator::{CmdRecord, ProgramSimulator};
pub use terminal::{Program, ProgramConfig};
