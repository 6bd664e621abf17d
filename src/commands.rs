//! CLI command definitions
//!
//! Defines the clap commands for the `wpf` driver. The scenario runner
//! parses its step lines with the same definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use crate::bigbang::OwnershipMode;

#[derive(Parser, Debug)]
#[command(name = "wpf", about = "Memory-safe renditions of classic bug examples")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Link two elements as peers, release one, store both and sum them
    Bigbang {
        /// Number of container slots
        #[arg(long)]
        capacity: Option<usize>,

        /// Whether the container owns or only views its elements
        #[arg(long, value_enum)]
        ownership: Option<OwnershipMode>,

        /// Store the released peer first
        #[arg(long)]
        peer_first: bool,
    },

    /// Print Fibonacci numbers from N down to 1
    Fibo {
        /// Largest n to print
        n: Option<u32>,
    },

    /// Print the middle of three integers
    Middle {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        #[arg(allow_negative_numbers = true)]
        z: i32,

        /// Use the version with the boundary bug
        #[arg(long)]
        faulty: bool,
    },

    /// Read fixed-size integer buffers from stdin until a 0 or end of input
    Memleak {
        /// Integers per buffer
        #[arg(long, short, default_value = "4")]
        size: usize,
    },

    /// Add priced items through a map that records a replayable test
    Map {
        /// Write the replay log here instead of stderr
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Sort integers with a recursive insertion sort
    Sort {
        #[arg(allow_negative_numbers = true)]
        values: Vec<i32>,

        /// Use the version that appends instead of prepends
        #[arg(long)]
        faulty: bool,
    },

    /// Delta debugging on a built-in failing test
    Dd {
        /// Which failing test to debug
        #[arg(value_enum)]
        target: DdTarget,

        /// Isolate a failure-inducing difference instead of minimizing
        #[arg(long)]
        isolate: bool,

        /// Failing input (default depends on the target)
        #[arg(allow_negative_numbers = true)]
        input: Vec<String>,
    },

    /// Execute a test scenario defined in a YAML file
    Check {
        /// Path to the YAML test scenario file
        path: PathBuf,
    },
}

/// Built-in failing tests for the `dd` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DdTarget {
    /// HTML characters failing when they match `<SELECT.*>`
    Select,
    /// Integers the faulty sort gets wrong
    Sort,
    /// Integers failing when both 1 and 3 are present
    Pair,
}
