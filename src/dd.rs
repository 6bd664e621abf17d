//! Delta debugging
//!
//! `ddmin` narrows a failing configuration down to a 1-minimal failing
//! subset. `dd` isolates a minimal failure-inducing difference between a
//! passing and a failing configuration. Test outcomes are cached per
//! configuration, so repeated probes of the same subset are free.

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

use crate::common::{Error, Result};

/// Result of testing one configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Pass,
    Fail,
    Unresolved,
}

/// Split `c` into `n` consecutive subsets; later subsets get the remainder
pub fn split<T: Clone>(c: &[T], n: usize) -> Vec<Vec<T>> {
    let mut subsets = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let size = (c.len() - start) / (n - i);
        subsets.push(c[start..start + size].to_vec());
        start += size;
    }
    subsets
}

/// Elements of `a` not in `b`
pub fn minus<T: Clone + PartialEq>(a: &[T], b: &[T]) -> Vec<T> {
    a.iter().filter(|x| !b.contains(x)).cloned().collect()
}

/// `a` followed by the elements of `b` not already in `a`
pub fn union<T: Clone + PartialEq>(a: &[T], b: &[T]) -> Vec<T> {
    let mut c = a.to_vec();
    c.extend(b.iter().filter(|x| !a.contains(x)).cloned());
    c
}

/// Output of `dd`: `delta = fail - pass`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Isolation<T> {
    pub delta: Vec<T>,
    pub pass: Vec<T>,
    pub fail: Vec<T>,
}

/// Runs delta debugging against a test function, caching its outcomes
pub struct Minimizer<T, F> {
    test: F,
    cache: HashMap<Vec<T>, Outcome>,
    tests_run: usize,
}

impl<T, F> Minimizer<T, F>
where
    T: Clone + Eq + Hash + std::fmt::Debug,
    F: FnMut(&[T]) -> Outcome,
{
    pub fn new(test: F) -> Self {
        Self {
            test,
            cache: HashMap::new(),
            tests_run: 0,
        }
    }

    /// Number of times the test function actually ran
    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    /// Outcome for `config`, running the test only on a cache miss
    pub fn outcome(&mut self, config: &[T]) -> Outcome {
        if let Some(outcome) = self.cache.get(config) {
            return *outcome;
        }
        let outcome = (self.test)(config);
        self.tests_run += 1;
        tracing::debug!(
            test = self.tests_run,
            size = config.len(),
            ?outcome,
            "tested configuration"
        );
        self.cache.insert(config.to_vec(), outcome);
        outcome
    }

    fn require(&mut self, config: &[T], expected: Outcome, what: &str) -> Result<()> {
        let actual = self.outcome(config);
        if actual != expected {
            return Err(Error::DdPrecondition(format!(
                "{what} must {expected:?}, but it tested {actual:?}"
            )));
        }
        Ok(())
    }

    /// Reduce `circumstances` to a 1-minimal failing subset
    pub fn ddmin(&mut self, circumstances: Vec<T>) -> Result<Vec<T>> {
        self.require(&[], Outcome::Pass, "the empty configuration")?;
        self.require(&circumstances, Outcome::Fail, "the failing configuration")?;

        let mut circumstances = circumstances;
        let mut n = 2;

        while circumstances.len() >= 2 {
            n = n.min(circumstances.len());
            let subsets = split(&circumstances, n);

            let mut reduced = false;
            for subset in &subsets {
                let complement = minus(&circumstances, subset);
                if self.outcome(&complement) == Outcome::Fail {
                    circumstances = complement;
                    n = (n - 1).max(2);
                    reduced = true;
                    break;
                }
            }

            if !reduced {
                if n == circumstances.len() {
                    break;
                }
                n = (n * 2).min(circumstances.len());
                tracing::trace!(n, "increasing granularity");
            }
        }

        tracing::info!(
            size = circumstances.len(),
            tests = self.tests_run,
            "ddmin finished"
        );
        Ok(circumstances)
    }

    /// Isolate a minimal difference between `c_pass` and `c_fail`
    pub fn dd(&mut self, c_pass: Vec<T>, c_fail: Vec<T>) -> Result<Isolation<T>> {
        self.require(&c_pass, Outcome::Pass, "the passing configuration")?;
        self.require(&c_fail, Outcome::Fail, "the failing configuration")?;

        let (mut c_pass, mut c_fail) = (c_pass, c_fail);
        let mut n = 2;

        loop {
            let delta = minus(&c_fail, &c_pass);
            if n > delta.len() {
                return Ok(self.isolated(delta, c_pass, c_fail));
            }

            let deltas = split(&delta, n);
            let mut j = 0;

            // Rounds always start from the first subset. A step that lowers
            // `n` to `j` or below also counts as a full round.
            while j < n {
                let next_pass = union(&c_pass, &deltas[j]);
                let next_fail = minus(&c_fail, &deltas[j]);

                let fail_outcome = self.outcome(&next_fail);
                if fail_outcome == Outcome::Fail && n == 2 {
                    c_fail = next_fail;
                    n = 2;
                    break;
                } else if fail_outcome == Outcome::Pass {
                    c_pass = next_fail;
                    n = 2;
                    break;
                }

                let pass_outcome = self.outcome(&next_pass);
                if pass_outcome == Outcome::Fail {
                    c_fail = next_pass;
                    n = 2;
                    break;
                } else if fail_outcome == Outcome::Fail {
                    c_fail = next_fail;
                    n = (n - 1).max(2);
                    break;
                } else if pass_outcome == Outcome::Pass {
                    c_pass = next_pass;
                    n = (n - 1).max(2);
                    break;
                }
                j += 1;
            }

            if j >= n {
                if n >= delta.len() {
                    return Ok(self.isolated(delta, c_pass, c_fail));
                }
                n = (n * 2).min(delta.len());
                tracing::trace!(n, "increasing granularity");
            }
        }
    }

    fn isolated(&self, delta: Vec<T>, pass: Vec<T>, fail: Vec<T>) -> Isolation<T> {
        tracing::info!(
            delta = delta.len(),
            tests = self.tests_run,
            "dd finished"
        );
        Isolation { delta, pass, fail }
    }
}
