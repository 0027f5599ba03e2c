//! Logging initialization
//!
//! Diagnostics go to stderr through `tracing` so that stdout carries only
//! the scan report.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable selecting the log format (`json` or `text`)
pub const LOG_FORMAT_ENV: &str = "LOCKDIFF_LOG_FORMAT";

/// Maps the `-v` count to a log level; `None` keeps the default filter
pub fn level_for(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

/// Returns true when `LOCKDIFF_LOG_FORMAT` asks for JSON
pub fn json_from_env() -> bool {
    std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"))
}

/// Initialize the tracing subscriber
///
/// # Arguments
/// * `verbosity` - 0 = `RUST_LOG` or warn, 1 = DEBUG, 2+ = TRACE
/// * `json` - If true, output JSON lines to stderr
///
/// Calling this more than once is a no-op.
pub fn init(verbosity: u8, json: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Some(level) = level_for(verbosity) {
        filter = filter.add_directive(level.into());
    }

    let subscriber = tracing_subscriber::registry().with(filter);

    // try_init fails only if a global subscriber is already installed
    if json {
        let _ = subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init();
    } else {
        let _ = subscriber
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init();
    }
}
