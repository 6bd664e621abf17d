//! Error types for the example drivers
//!
//! Messages name the offending value so a failing scenario step can be
//! read without re-running it.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the examples and the scenario runner
#[derive(Error, Debug)]
pub enum Error {
    // === Container Errors ===
    #[error("Container is full: all {capacity} slots are occupied")]
    ContainerFull { capacity: usize },

    #[error("Slot {index} is out of range for a container of capacity {capacity}")]
    SlotOutOfRange { index: usize, capacity: usize },

    // === Arithmetic Errors ===
    #[error("fib({0}) does not fit in a 64-bit integer")]
    FibOverflow(u32),

    // === Input Errors ===
    #[error("Invalid integer '{token}' in input")]
    InvalidInteger { token: String },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    // === Delta Debugging Errors ===
    #[error("Delta debugging precondition failed: {0}")]
    DdPrecondition(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write file '{path}': {error}")]
    FileWrite { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Test Errors ===
    #[error("Test assertion failed: {0}")]
    TestAssertion(String),
}

impl Error {
    /// Create an invalid integer error from the offending token
    pub fn invalid_integer(token: &str) -> Self {
        Self::InvalidInteger {
            token: token.to_string(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: &std::path::Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a file write error
    pub fn file_write(path: &std::path::Path, error: &io::Error) -> Self {
        Self::FileWrite {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
