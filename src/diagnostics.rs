//! Diagnostic logging to a file.
//!
//! The terminal belongs to the UI, so `tracing` output goes to
//! `<data_dir>/birthcert/birthcert.log` instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Filter used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "info";

/// Errors that can occur while setting up diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticsError {
    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,

    /// The log file or its directory could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The fallback filter could not be parsed.
    #[error("invalid log filter '{value}': {source}")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },

    /// A global subscriber was already installed.
    #[error("could not install log subscriber: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Returns the default log file path under the XDG data directory.
pub fn default_log_path() -> Result<PathBuf, DiagnosticsError> {
    let data_dir = dirs::data_dir().ok_or(DiagnosticsError::NoDataDir)?;
    Ok(data_dir.join("birthcert").join("birthcert.log"))
}

/// Opens `path` for appending, creating it and its parent directories.
pub fn open_log_file(path: &Path) -> Result<File, DiagnosticsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Builds the event filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> Result<EnvFilter, DiagnosticsError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(DEFAULT_FILTER).map_err(|source| DiagnosticsError::Filter {
            value: DEFAULT_FILTER.to_string(),
            source,
        }),
    }
}

/// Installs the global subscriber, writing plain-text lines to `path`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init(path: &Path) -> Result<(), DiagnosticsError> {
    let file = open_log_file(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(DiagnosticsError::Subscriber)
}
