//! Fixed-size integer buffer reading
//!
//! A `0` value marks end of data. Stopping early drops the partial
//! buffer instead of abandoning it.

use std::io::BufRead;

use crate::common::input::TokenReader;
use crate::common::Result;

/// Read `size` integers, or `None` when a `0` or end of input comes first
pub fn read_buf<R: BufRead>(size: usize, reader: &mut TokenReader<R>) -> Result<Option<Vec<i32>>> {
    let mut buf = Vec::new();
    while buf.len() < size {
        match reader.next_int()? {
            Some(value) if value != 0 => buf.push(value),
            _ => {
                tracing::debug!(read = buf.len(), size, "end of data, discarding partial buffer");
                return Ok(None);
            }
        }
    }
    Ok(Some(buf))
}

/// Read consecutive buffers of `size` until the data runs out
pub fn read_all<R: BufRead>(size: usize, reader: &mut TokenReader<R>) -> Result<Vec<Vec<i32>>> {
    let mut buffers = Vec::new();
    if size == 0 {
        return Ok(buffers);
    }
    while let Some(buf) = read_buf(size, reader)? {
        buffers.push(buf);
    }
    Ok(buffers)
}
