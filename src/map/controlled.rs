//! Map decorator that records every call as a replayable test
//!
//! The log is Rust source: a test function that performs the same calls
//! against a `BasicMap` and asserts every lookup result seen at record
//! time. Failed writes to the log are reported through tracing and never
//! change how the wrapped map behaves.

use std::fmt;
use std::io::{self, Write};

use super::Map;

/// Wraps a map and writes each call to `log`
pub struct ControlledMap<M, W: Write> {
    inner: M,
    log: Option<W>,
}

impl<M: Map, W: Write> ControlledMap<M, W> {
    pub fn new(inner: M, log: W) -> Self {
        let mut map = Self {
            inner,
            log: Some(log),
        };
        map.emit(format_args!("use wpf::map::{{BasicMap, Map}};\n"));
        map.emit(format_args!("\n#[test]\nfn replayed_session() {{\n"));
        map.emit(format_args!("    let mut map = BasicMap::new();\n"));
        map
    }

    /// The wrapped map
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Close the recorded test and hand back the log
    pub fn finish(mut self) -> io::Result<W> {
        let mut log = self
            .log
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log already closed"))?;
        log.write_all(b"}\n")?;
        log.flush()?;
        Ok(log)
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Some(log) = self.log.as_mut() {
            if let Err(e) = log.write_fmt(line).and_then(|()| log.flush()) {
                tracing::warn!("Failed to write map replay log: {}", e);
            }
        }
    }
}

impl<M: Map, W: Write> Map for ControlledMap<M, W> {
    fn add(&mut self, key: &str, value: i32) {
        self.emit(format_args!("    map.add({:?}, {});\n", key, value));
        self.inner.add(key, value);
    }

    fn del(&mut self, key: &str) -> Option<i32> {
        self.emit(format_args!("    map.del({:?});\n", key));
        self.inner.del(key)
    }

    fn lookup(&mut self, key: &str) -> Option<i32> {
        let found = self.inner.lookup(key);
        self.emit(format_args!(
            "    assert_eq!(map.lookup({:?}), {:?});\n",
            key, found
        ));
        found
    }
}

impl<M, W: Write> Drop for ControlledMap<M, W> {
    fn drop(&mut self) {
        if let Some(log) = self.log.as_mut() {
            if let Err(e) = log.write_all(b"}\n").and_then(|()| log.flush()) {
                tracing::warn!("Failed to close map replay log: {}", e);
            }
        }
    }
}
