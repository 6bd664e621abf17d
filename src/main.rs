//! Why Programs Fail - example driver
//!
//! Runs one example per subcommand and prints its result on stdout.

use clap::Parser;
use std::io;
use wpf::cli::{self, Console};
use wpf::commands::Cli;
use wpf::common::{config::Config, logging};

fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if !config.output.color {
        colored::control::set_override(false);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    let mut diagnostics = stderr.lock();
    let mut console = Console {
        input: &mut input,
        output: &mut output,
        diagnostics: &mut diagnostics,
    };

    if let Err(e) = cli::dispatch(cli.command, cli.json, &config, &mut console) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
