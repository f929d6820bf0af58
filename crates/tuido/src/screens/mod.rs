#![forbid(unsafe_code)]

//! The two screens: tasks (form + list) and the scenario suite.

pub mod suite;
pub mod tasks;

pub use suite::SuiteScreen;
pub use tasks::TasksScreen;
