//! Test runner implementation
//!
//! Executes test scenarios by dispatching each step's command in-process
//! and asserting against its captured output.

use std::path::Path;

use clap::Parser;
use colored::Colorize;

use crate::cli::{self, Console};
use crate::commands::{Cli, Commands};
use crate::common::config::Config;
use crate::common::{split_command_line, Error, Result};

use super::config::{RunExpectation, TestScenario, TestStep};

/// Result of a test run
#[derive(Debug)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    pub error: Option<String>,
}

/// Run a test scenario from a YAML file
pub fn run_scenario(path: &Path, config: &Config, console: &mut Console) -> Result<TestResult> {
    // Load and parse the YAML scenario
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read test scenario '{}': {}",
            path.display(),
            e
        ))
    })?;

    let scenario: TestScenario = serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse test scenario: {}", e)))?;

    let steps_total = scenario.steps.len();
    let out = &mut *console.output;

    writeln!(
        out,
        "\n{} {}",
        "Running Test:".blue().bold(),
        scenario.name.white().bold()
    )?;

    if let Some(desc) = &scenario.description {
        writeln!(out, "  {}", desc.dimmed())?;
    }

    writeln!(out, "\n{}", "Steps:".cyan())?;

    let mut last_output = String::new();

    for (i, step) in scenario.steps.iter().enumerate() {
        let step_num = i + 1;

        let outcome = match step {
            TestStep::Run {
                command,
                stdin,
                expect,
            } => execute_run_step(
                command,
                stdin.as_deref().unwrap_or(""),
                expect.as_ref(),
                config,
                &mut last_output,
            ),
            TestStep::CheckOutput { contains, equals } => {
                check_output(&last_output, contains.as_deref(), equals.as_deref())
                    .map(|()| "check output".to_string())
            }
        };

        match outcome {
            Ok(label) => {
                writeln!(out, "  {} Step {}: {}", "✓".green(), step_num, label.dimmed())?;
            }
            Err(e) => {
                writeln!(out, "  {} Step {}: {}", "✗".red(), step_num, e)?;
                tracing::debug!(step = step_num, output = %last_output, "step failed");

                return Ok(TestResult {
                    name: scenario.name,
                    passed: false,
                    steps_run: step_num,
                    steps_total,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    writeln!(
        out,
        "\n{} {}\n",
        "✓".green().bold(),
        "Test Passed".green().bold()
    )?;

    Ok(TestResult {
        name: scenario.name,
        passed: true,
        steps_run: steps_total,
        steps_total,
        error: None,
    })
}

/// Execute a run step, leaving its output in `last_output`
fn execute_run_step(
    command_str: &str,
    stdin: &str,
    expect: Option<&RunExpectation>,
    config: &Config,
    last_output: &mut String,
) -> Result<String> {
    let cli = parse_command(command_str)?;

    let mut input = stdin.as_bytes();
    let mut output = Vec::new();
    let mut diagnostics = Vec::new();
    let result = {
        let mut console = Console {
            input: &mut input,
            output: &mut output,
            diagnostics: &mut diagnostics,
        };
        cli::dispatch(cli.command, cli.json, config, &mut console)
    };
    *last_output = String::from_utf8_lossy(&output).into_owned();

    let expect_success = expect.and_then(|e| e.success).unwrap_or(true);

    let label = match result {
        Ok(()) if expect_success => command_str.to_string(),
        Ok(()) => {
            return Err(Error::TestAssertion(format!(
                "Command '{}' expected to fail, but it succeeded",
                command_str
            )))
        }
        Err(e) if expect_success => {
            return Err(Error::TestAssertion(format!(
                "Command '{}' failed: {}",
                command_str, e
            )))
        }
        Err(e) => {
            if let Some(expected) = expect.and_then(|x| x.error_contains.as_deref()) {
                let message = e.to_string();
                if !message.contains(expected) {
                    return Err(Error::TestAssertion(format!(
                        "Command '{}' error does not contain '{}'. Got: '{}'",
                        command_str, expected, message
                    )));
                }
            }
            format!("{} (expected failure)", command_str)
        }
    };

    if let Some(exp) = expect {
        check_output(
            last_output,
            exp.output_contains.as_deref(),
            exp.output_equals.as_deref(),
        )?;
    }

    Ok(label)
}

fn check_output(output: &str, contains: Option<&str>, equals: Option<&str>) -> Result<()> {
    if let Some(expected_substr) = contains {
        if !output.contains(expected_substr) {
            return Err(Error::TestAssertion(format!(
                "Output does not contain '{}'. Got: '{}'",
                expected_substr,
                if output.len() > 200 {
                    format!("{}...", output.chars().take(200).collect::<String>())
                } else {
                    output.to_string()
                }
            )));
        }
    }

    if let Some(expected_exact) = equals {
        if output.trim() != expected_exact.trim() {
            return Err(Error::TestAssertion(format!(
                "Output mismatch. Expected: '{}', got: '{}'",
                expected_exact, output
            )));
        }
    }

    Ok(())
}

/// Parse a step's command line with the CLI's own definitions
fn parse_command(s: &str) -> Result<Cli> {
    let words = split_command_line(s);
    if words.is_empty() {
        return Err(Error::Config("Empty command".to_string()));
    }

    let cli = Cli::try_parse_from(std::iter::once("wpf".to_string()).chain(words))
        .map_err(|e| Error::Config(format!("Invalid command '{}': {}", s, e.kind())))?;

    if matches!(cli.command, Commands::Check { .. }) {
        return Err(Error::Config(
            "Scenarios cannot run other scenarios".to_string(),
        ));
    }
    Ok(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert!(matches!(parse_command("fibo").unwrap().command, Commands::Fibo { n: None }));
        assert!(matches!(
            parse_command("fibo 5").unwrap().command,
            Commands::Fibo { n: Some(5) }
        ));
        assert!(parse_command("sort --json 3 1").unwrap().json);
    }

    #[test]
    fn test_parse_rejects_nested_check() {
        assert!(matches!(parse_command("check other.yaml"), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty() {
        assert!(parse_command("frobnicate").is_err());
        assert!(parse_command("   ").is_err());
    }

    #[test]
    fn test_run_step_captures_output() {
        let mut last = String::new();
        let label = execute_run_step("middle 2 1 3", "", None, &Config::default(), &mut last)
            .unwrap();
        assert_eq!(label, "middle 2 1 3");
        assert_eq!(last, "middle: 2\n");
    }

    #[test]
    fn test_run_step_expected_failure() {
        let expect = RunExpectation {
            success: Some(false),
            error_contains: Some("precondition".to_string()),
            ..Default::default()
        };
        let mut last = String::new();
        let label = execute_run_step(
            "dd pair 1 2",
            "",
            Some(&expect),
            &Config::default(),
            &mut last,
        )
        .unwrap();
        assert!(label.ends_with("(expected failure)"));
    }

    #[test]
    fn test_run_step_output_mismatch() {
        let expect = RunExpectation {
            output_equals: Some("middle: 1".to_string()),
            ..Default::default()
        };
        let mut last = String::new();
        let err = execute_run_step("middle 2 1 3", "", Some(&expect), &Config::default(), &mut last)
            .unwrap_err();
        assert!(matches!(err, Error::TestAssertion(_)));
    }

    #[test]
    fn test_run_scenario_file() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.yaml");
        std::fs::write(
            &path,
            r#"
name: sort
steps:
  - action: run
    command: sort --faulty 2 1 3
  - action: check_output
    equals: "3 1 2"
  - action: check_output
    contains: "1 2 3"
"#,
        )
        .unwrap();

        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut diagnostics = Vec::new();
        let mut console = Console {
            input: &mut input,
            output: &mut output,
            diagnostics: &mut diagnostics,
        };
        let result = run_scenario(&path, &Config::default(), &mut console).unwrap();
        assert!(!result.passed);
        assert_eq!(result.steps_run, 3);
        assert_eq!(result.steps_total, 3);
        assert!(result.error.unwrap().contains("does not contain"));
    }
}
