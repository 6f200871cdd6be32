use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// One JSON object per event, fields flattened.
    Json,
    /// Human-readable lines.
    Pretty,
}

/// Pretty when a person is watching stderr, JSON otherwise.
pub fn default_log_mode() -> LogMode {
    if io::stderr().is_terminal() {
        LogMode::Pretty
    } else {
        LogMode::Json
    }
}

/// Install the global subscriber.
///
/// Diagnostics always go to stderr; stdout carries the mirrored log stream and
/// nothing else. `RUST_LOG` controls filtering (default `info`). When
/// `TOKIO_CONSOLE` is set the tokio-console subscriber is installed instead.
pub fn init_logging(mode: LogMode) {
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        init_console_logging();
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);

    // A subscriber installed earlier (tests, embedding) wins.
    let _ = match mode {
        LogMode::Json => builder.json().flatten_event(true).try_init(),
        LogMode::Pretty => builder.with_target(false).try_init(),
    };
}

fn init_console_logging() {
    console_subscriber::init();
}
