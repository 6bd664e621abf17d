//! Common utilities shared by the example drivers

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

/// Split a command line into words, honouring double quotes.
///
/// `dd select "<A B>"` yields `["dd", "select", "<A B>"]`.
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_words() {
        assert_eq!(split_command_line("middle 2 1  3"), ["middle", "2", "1", "3"]);
    }

    #[test]
    fn test_split_quoted_word() {
        assert_eq!(
            split_command_line(r#"dd select "<SELECT NAME>" --isolate"#),
            ["dd", "select", "<SELECT NAME>", "--isolate"]
        );
    }

    #[test]
    fn test_split_empty_quotes() {
        assert_eq!(split_command_line(r#"map "" x"#), ["map", "", "x"]);
    }
}
