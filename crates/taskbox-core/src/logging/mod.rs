//! Structured logging with `tracing`.
//!
//! Library code logs through the `tracing` macros with structured fields
//! (`task_id`, `key`, `error`, ...). Binaries and embedding applications call
//! [`init_subscriber`] once; tests use [`capture_logs`] to assert on events.

pub mod test_utils;

pub use test_utils::{CapturedEvent, CapturedLogs, capture_logs};

/// Initialize the global tracing subscriber with compact stderr output.
///
/// `RUST_LOG` takes precedence over `level` when set. Subsequent calls are
/// no-ops.
pub fn init_subscriber(level: &str) {
    init_subscriber_with_format(level, LogFormat::Compact);
}

/// Output format for [`init_subscriber_with_format`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human-readable events.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Initialize the global tracing subscriber with stderr output in `format`.
pub fn init_subscriber_with_format(level: &str, format: LogFormat) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    // try_init fails only when a global subscriber is already installed
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
