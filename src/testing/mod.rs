//! Scenario runner
//!
//! Reads YAML test scenarios and runs each step in-process against the
//! same dispatch code the CLI uses, with captured input and output.

mod config;
mod runner;

pub use config::*;
pub use runner::{run_scenario, TestResult};
