//! Diagnostic logging setup.
//!
//! Operator output goes through [crate::ui]; this only configures the
//! `tracing` subscriber that records command execution and stage changes.

use tracing::Level;
use tracing_subscriber::filter::EnvFilter;

/// Log level options for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    /// Every command and its captured output
    Trace,
    /// Every command with its working directory
    Debug,
    /// Stage transitions
    Info,
    /// Warnings only (default)
    #[default]
    Warn,
    /// Errors only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Filter directive for `level`, scoped to this crate
pub fn filter_directive(level: LogLevel) -> String {
    let level = Level::from(level).to_string().to_lowercase();
    format!("app_release={},release={}", level, level)
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(level: LogLevel) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(level)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
