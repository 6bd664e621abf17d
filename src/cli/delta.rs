//! Built-in failing tests for the `dd` command

use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;
use std::io::Write;

use crate::commands::DdTarget;
use crate::common::{Error, Result};
use crate::dd::{Minimizer, Outcome};
use crate::sort;

const SELECT_INPUT: &str = r#"<SELECT NAME="priority" MULTIPLE SIZE=7>"#;
const SORT_INPUT: [i32; 3] = [3, 1, 2];
const PAIR_INPUT: [i32; 4] = [1, 2, 3, 4];

/// What `dd` found, rendered as text
#[derive(Debug, Serialize)]
pub struct DdReport {
    pub target: DdTarget,
    pub tests: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail: Option<String>,
}

pub fn run(target: DdTarget, isolate: bool, input: &[String]) -> Result<DdReport> {
    match target {
        DdTarget::Select => {
            let text = if input.is_empty() {
                SELECT_INPUT.to_string()
            } else {
                input.join(" ")
            };
            let chars: Vec<char> = text.chars().collect();
            debug_target(target, isolate, chars, |c| matches_select(&render_chars(c)), |c| {
                render_chars(c)
            })
        }
        DdTarget::Sort => {
            let values = parse_ints(input, &SORT_INPUT)?;
            debug_target(target, isolate, values, |c| sort::sort_faulty(c) != sort::sort(c), |c| {
                render_ints(c)
            })
        }
        DdTarget::Pair => {
            let values = parse_ints(input, &PAIR_INPUT)?;
            debug_target(target, isolate, values, |c| c.contains(&1) && c.contains(&3), |c| {
                render_ints(c)
            })
        }
    }
}

pub fn print_report(report: &DdReport, out: &mut dyn Write) -> Result<()> {
    if let Some(minimal) = &report.minimal {
        writeln!(out, "minimal failing input: {}", minimal)?;
    }
    if let (Some(delta), Some(pass), Some(fail)) = (&report.delta, &report.pass, &report.fail) {
        writeln!(out, "failure-inducing difference: {}", delta)?;
        writeln!(out, "passing: {}", pass)?;
        writeln!(out, "failing: {}", fail)?;
    }
    writeln!(out, "tests run: {}", report.tests)?;
    Ok(())
}

/// Run ddmin or dd over the positions of `items`.
///
/// Configurations carry each item's original index so that a subset can
/// be put back in input order before it is tested or shown.
fn debug_target<I, P, R>(
    target: DdTarget,
    isolate: bool,
    items: Vec<I>,
    fails: P,
    render: R,
) -> Result<DdReport>
where
    I: Clone + Eq + Hash + Debug,
    P: Fn(&[I]) -> bool,
    R: Fn(&[I]) -> String,
{
    let indexed: Vec<(usize, I)> = items.into_iter().enumerate().collect();
    let mut minimizer = Minimizer::new(|config: &[(usize, I)]| {
        if fails(&in_order(config)) {
            Outcome::Fail
        } else {
            Outcome::Pass
        }
    });

    let mut report = DdReport {
        target,
        tests: 0,
        minimal: None,
        delta: None,
        pass: None,
        fail: None,
    };

    if isolate {
        let isolation = minimizer.dd(Vec::new(), indexed)?;
        report.delta = Some(render(&in_order(&isolation.delta)));
        report.pass = Some(render(&in_order(&isolation.pass)));
        report.fail = Some(render(&in_order(&isolation.fail)));
    } else {
        let minimal = minimizer.ddmin(indexed)?;
        report.minimal = Some(render(&in_order(&minimal)));
    }
    report.tests = minimizer.tests_run();
    Ok(report)
}

fn in_order<I: Clone>(config: &[(usize, I)]) -> Vec<I> {
    let mut sorted = config.to_vec();
    sorted.sort_by_key(|(index, _)| *index);
    sorted.into_iter().map(|(_, item)| item).collect()
}

/// Whether `text` matches `<SELECT.*>` at its start
fn matches_select(text: &str) -> bool {
    text.strip_prefix("<SELECT")
        .and_then(|rest| rest.split('\n').next())
        .is_some_and(|line| line.contains('>'))
}

fn render_chars(chars: &[char]) -> String {
    chars.iter().collect()
}

fn render_ints(values: &[i32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_ints(input: &[String], default: &[i32]) -> Result<Vec<i32>> {
    if input.is_empty() {
        return Ok(default.to_vec());
    }
    input
        .iter()
        .map(|token| token.parse().map_err(|_| Error::invalid_integer(token)))
        .collect()
}
