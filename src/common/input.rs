//! Whitespace-separated token reading for the interactive drivers

use std::collections::VecDeque;
use std::io::BufRead;

use super::{Error, Result};

/// Reads whitespace-separated tokens from a buffered reader, line by line
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input
    pub fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    /// Next token parsed as an integer, or `None` at end of input
    pub fn next_int(&mut self) -> Result<Option<i32>> {
        match self.next_token()? {
            Some(token) => token
                .parse()
                .map(Some)
                .map_err(|_| Error::invalid_integer(&token)),
            None => Ok(None),
        }
    }
}
