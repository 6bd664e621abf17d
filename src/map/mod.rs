//! String-to-integer maps and a call-recording decorator

mod controlled;

pub use controlled::ControlledMap;

use std::collections::BTreeMap;

/// A map from names to integer values
pub trait Map {
    fn add(&mut self, key: &str, value: i32);

    /// Remove `key`, returning its value if it was present
    fn del(&mut self, key: &str) -> Option<i32>;

    fn lookup(&mut self, key: &str) -> Option<i32>;
}

/// Ordered in-memory map
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BasicMap {
    entries: BTreeMap<String, i32>,
}

impl BasicMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Map for BasicMap {
    fn add(&mut self, key: &str, value: i32) {
        self.entries.insert(key.to_string(), value);
    }

    fn del(&mut self, key: &str) -> Option<i32> {
        self.entries.remove(key)
    }

    fn lookup(&mut self, key: &str) -> Option<i32> {
        self.entries.get(key).copied()
    }
}
