use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Install the stderr subscriber the core's `TracingSink` writes through.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::new(level.as_filter());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
