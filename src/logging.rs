//! Logging configuration for sqlgate.
//!
//! Logs go to stderr by default, or to a file when `--log-file` is given.

use std::fs::{self, File};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, SqlgateError};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes logging to stderr.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

/// Initializes logging to the given file.
///
/// The parent directory is created if needed and the file is appended to,
/// so restarts keep earlier entries.
pub fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SqlgateError::config(format!(
                "Could not create log directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let log_file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false) // No ANSI colors in file output
        .init();

    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            SqlgateError::config(format!("Could not open log file {}: {e}", path.display()))
        })
}
