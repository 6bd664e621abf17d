//! CLI command handling
//!
//! Dispatches parsed commands to the examples and formats their output.
//! All I/O goes through a `Console`, so the scenario runner can drive the
//! same code against in-memory buffers.

mod delta;

use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};

use crate::bigbang::{self, BigbangOptions};
use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::input::TokenReader;
use crate::common::{Error, Result};
use crate::map::{BasicMap, ControlledMap, Map};
use crate::{fibo, memleak, middle, sort, testing};

/// Input and output streams for one command
pub struct Console<'a> {
    pub input: &'a mut dyn BufRead,
    pub output: &'a mut dyn Write,
    /// Receives the map replay log unless a log file is configured
    pub diagnostics: &'a mut dyn Write,
}

/// Dispatch a CLI command
pub fn dispatch(command: Commands, json: bool, config: &Config, console: &mut Console) -> Result<()> {
    tracing::debug!(?command, "dispatching");

    match command {
        Commands::Bigbang {
            capacity,
            ownership,
            peer_first,
        } => {
            let capacity = capacity.unwrap_or(config.bigbang.capacity);
            if capacity > bigbang::MAX_CAPACITY {
                return Err(Error::InvalidArguments(format!(
                    "container capacity {} exceeds the limit of {}",
                    capacity,
                    bigbang::MAX_CAPACITY
                )));
            }
            let options = BigbangOptions {
                capacity,
                ownership: ownership.unwrap_or(config.bigbang.ownership),
                peer_first: peer_first || config.bigbang.peer_first,
            };
            let report = bigbang::run(&options);
            if json {
                return print_json(console, &report);
            }
            writeln!(console.output, "result is: {}", report.result)?;
            Ok(())
        }

        Commands::Fibo { n } => {
            let table = fibo::table(n.unwrap_or(config.fibo.start))?;
            if json {
                let rows: Vec<FibRow> = table.iter().map(|&(n, value)| FibRow { n, value }).collect();
                return print_json(console, &rows);
            }
            for (n, value) in table {
                writeln!(console.output, "fib({})={}", n, value)?;
            }
            Ok(())
        }

        Commands::Middle { x, y, z, faulty } => {
            let m = if faulty {
                middle::middle_faulty(x, y, z)
            } else {
                middle::middle(x, y, z)
            };
            if json {
                return print_json(console, &serde_json::json!({ "middle": m }));
            }
            writeln!(console.output, "middle: {}", m)?;
            Ok(())
        }

        Commands::Memleak { size } => {
            if size == 0 {
                return Err(Error::InvalidArguments(
                    "buffer size must be at least 1".to_string(),
                ));
            }
            let mut reader = TokenReader::new(&mut *console.input);
            let buffers = memleak::read_all(size, &mut reader)?;
            if json {
                return print_json(console, &serde_json::json!({ "buffers": buffers }));
            }
            for (i, buf) in buffers.iter().enumerate() {
                writeln!(console.output, "buffer {}: {}", i + 1, join(buf))?;
            }
            writeln!(console.output, "end of input after {} buffers", buffers.len())?;
            Ok(())
        }

        Commands::Map { log } => match log.or_else(|| config.map.log_path.clone()) {
            Some(path) => {
                let file = File::create(&path).map_err(|e| Error::file_write(&path, &e))?;
                tracing::info!(path = %path.display(), "Writing map replay log");
                price_list(
                    ControlledMap::new(BasicMap::new(), BufWriter::new(file)),
                    &mut *console.input,
                    &mut *console.output,
                )
            }
            None => price_list(
                ControlledMap::new(BasicMap::new(), &mut *console.diagnostics),
                &mut *console.input,
                &mut *console.output,
            ),
        },

        Commands::Sort { values, faulty } => {
            let sorted = if faulty {
                sort::sort_faulty(&values)
            } else {
                sort::sort(&values)
            };
            if json {
                return print_json(console, &sorted);
            }
            writeln!(console.output, "{}", join(&sorted))?;
            Ok(())
        }

        Commands::Dd {
            target,
            isolate,
            input,
        } => {
            let report = delta::run(target, isolate, &input)?;
            if json {
                return print_json(console, &report);
            }
            delta::print_report(&report, console.output)
        }

        Commands::Check { path } => {
            let result = testing::run_scenario(&path, config, console)?;
            if result.passed {
                Ok(())
            } else {
                Err(Error::TestAssertion(format!(
                    "scenario '{}' failed at step {} of {}: {}",
                    result.name,
                    result.steps_run,
                    result.steps_total,
                    result.error.unwrap_or_default()
                )))
            }
        }
    }
}

#[derive(Serialize)]
struct FibRow {
    n: u32,
    value: u64,
}

/// Interactive loop: read name/price pairs until `.`
///
/// The replay log is written as the session goes, so an interrupted
/// session still leaves the calls made so far.
fn price_list<W: Write>(
    mut map: ControlledMap<BasicMap, W>,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<()> {
    let mut reader = TokenReader::new(input);
    writeln!(output, "Add items.  Type `.' to end.")?;

    loop {
        write!(output, "Name: ")?;
        output.flush()?;
        let name = match reader.next_token()? {
            Some(name) if name != "." => name,
            _ => break,
        };

        write!(output, "Price: ")?;
        output.flush()?;
        let Some(price) = reader.next_int()? else {
            break;
        };

        map.add(&name, price);
        let stored = map.lookup(&name);
        match stored {
            Some(stored) => writeln!(output, "Added {} at {}", name, stored)?,
            None => writeln!(output, "Added {} but it is missing", name)?,
        }
    }

    writeln!(output)?;
    map.finish()?;
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(console: &mut Console, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    writeln!(console.output, "{}", text)?;
    Ok(())
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
