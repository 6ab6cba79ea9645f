//! Tracing subscriber set-up.
//!
//! The TUI owns the terminal, so interactive sessions only log when a
//! file is given. Headless commands log to stderr.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Do not install a subscriber at all.
    Disabled,
    Stderr,
    /// Append to this file, creating it if needed.
    File(PathBuf),
}

#[derive(Debug)]
pub enum LoggingError {
    /// Log file could not be opened.
    OpenFailed { path: PathBuf, reason: String },
    /// A global subscriber is already installed.
    AlreadyInitialized,
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::OpenFailed { path, reason } => {
                write!(f, "Cannot open log file {}: {}", path.display(), reason)
            }
            LoggingError::AlreadyInitialized => write!(f, "Logging already initialized"),
        }
    }
}

impl std::error::Error for LoggingError {}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Open the log file in append mode.
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggingError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Install the global subscriber for `target`.
pub fn init(target: &LogTarget) -> Result<(), LoggingError> {
    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(env_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
                .map_err(|_| LoggingError::AlreadyInitialized)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
