//! Iterative Fibonacci numbers
//!
//! Uses the `fib(0) = fib(1) = 1` convention. The accumulator starts out
//! initialized, so the small cases that skip the loop are well defined.

use crate::common::{Error, Result};

/// Fibonacci number `n`, failing once the value exceeds `u64`
pub fn fib(n: u32) -> Result<u64> {
    let (mut f0, mut f1) = (1u64, 1u64);
    let mut f = 1u64;

    for _ in 1..n {
        f = f0.checked_add(f1).ok_or(Error::FibOverflow(n))?;
        f0 = f1;
        f1 = f;
    }

    Ok(f)
}

/// `(n, fib(n))` for n from `start` down to 1
pub fn table(start: u32) -> Result<Vec<(u32, u64)>> {
    (1..=start).rev().map(|n| Ok((n, fib(n)?))).collect()
}
