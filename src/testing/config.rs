//! Test scenario configuration types
//!
//! Defines the data structures for deserializing YAML test scenarios.

use serde::Deserialize;

/// A complete test scenario loaded from a YAML file
#[derive(Deserialize, Debug)]
pub struct TestScenario {
    /// Name of the test scenario
    pub name: String,
    /// Optional description of what the test verifies
    pub description: Option<String>,
    /// The sequence of test steps to execute
    pub steps: Vec<TestStep>,
}

/// A single test step in the execution flow
#[derive(Deserialize, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Run an example command (e.g., "middle 2 1 3")
    Run {
        /// The command line, without the program name
        command: String,
        /// Text fed to the command's standard input
        stdin: Option<String>,
        /// Optional expectations for the command result
        expect: Option<RunExpectation>,
    },
    /// Check the output of the most recent run
    CheckOutput {
        /// Expected substring in output
        contains: Option<String>,
        /// Expected exact output
        equals: Option<String>,
    },
}

/// Expectations for a command result
#[derive(Deserialize, Debug, Default)]
pub struct RunExpectation {
    /// Whether the command should succeed
    pub success: Option<bool>,
    /// Substring that should be in the output
    pub output_contains: Option<String>,
    /// Exact output, compared after trimming
    pub output_equals: Option<String>,
    /// Substring of the error message when the command fails
    pub error_contains: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let yaml = r#"
name: middle
description: median of three
steps:
  - action: run
    command: middle 2 1 3
    expect:
      output_equals: "middle: 2"
  - action: run
    command: memleak --size 2
    stdin: "1 2 0"
  - action: check_output
    contains: "end of input"
"#;
        let scenario: TestScenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.name, "middle");
        assert_eq!(scenario.steps.len(), 3);
        match &scenario.steps[1] {
            TestStep::Run { stdin, expect, .. } => {
                assert_eq!(stdin.as_deref(), Some("1 2 0"));
                assert!(expect.is_none());
            }
            other => panic!("Expected Run step, got {:?}", other),
        }
        assert!(matches!(scenario.steps[2], TestStep::CheckOutput { .. }));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let yaml = "name: x\nsteps:\n  - action: await\n";
        assert!(serde_yaml::from_str::<TestScenario>(yaml).is_err());
    }
}
