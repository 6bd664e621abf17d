//! Logging and tracing configuration
//!
//! Logs always go to stderr: stdout carries the example output that the
//! scenario runner and the integration tests compare against.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a given `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "wpf=warn,warn",
        1 => "wpf=info,warn",
        2 => "wpf=debug,warn",
        _ => "wpf=trace,info",
    }
}

/// Initialize tracing for the CLI (stderr logging)
///
/// `RUST_LOG` wins over the verbosity flag when set.
pub fn init_cli(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (e.g. from tests) is not an error worth reporting.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
