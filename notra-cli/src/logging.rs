//! Tracing setup shared by both binaries

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Log levels
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Initialize tracing from the `--log-level` flag
///
/// Logs go to stderr; stdout is reserved for user-facing output.
pub fn initialize_tracing(log_level: LogLevel) {
    let filter = EnvFilter::new(log_level.to_filter_directive());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
