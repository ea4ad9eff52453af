//! Tracing subscriber setup.

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

/// ctime-style local timestamp, e.g. `Sun Oct 18 14:03:27 2026`.
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Log lines are the program's primary output.
    Stdout,
    /// Keep stdout free for reports.
    Stderr,
}

/// Install the global subscriber. `RUST_LOG` overrides the level.
pub fn init(verbose: bool, target: LogTarget) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()));

    match target {
        LogTarget::Stdout => builder.with_writer(io::stdout).init(),
        LogTarget::Stderr => builder.with_writer(io::stderr).init(),
    }
}
