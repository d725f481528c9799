//! Logging configuration using the tracing ecosystem.
//!
//! The viewer owns the terminal, so logs go to a daily-rotated file instead
//! of stderr. The level is taken from `RUST_LOG`.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "taskgrid=info,warn";

/// Initialize file logging under the platform data directory.
///
/// - Linux: `~/.local/share/taskgrid/logs/`
/// - macOS: `~/Library/Application Support/taskgrid/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\taskgrid\logs\`
///
/// `RUST_LOG=taskgrid=trace` logs every pipeline recomputation.
///
/// # Errors
///
/// Fails if the log directory cannot be created or a global subscriber is
/// already installed.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "taskgrid.log");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "taskgrid starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("taskgrid").join("logs"))
}

/// Where log files are written, for display to users.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log a clean shutdown.
pub fn shutdown() {
    tracing::info!("taskgrid shutting down");
}
