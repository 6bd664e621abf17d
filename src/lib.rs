//! Why Programs Fail - classic bug examples, memory-safe
//!
//! Each module renders one of the book's small buggy programs in a form
//! where the original defect is either fixed or ruled out by the type
//! system. Some modules keep a `_faulty` variant of the function so the
//! failure can still be reproduced and debugged.

pub mod bigbang;
pub mod cli;
pub mod commands;
pub mod common;
pub mod dd;
pub mod fibo;
pub mod map;
pub mod memleak;
pub mod middle;
pub mod sort;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
