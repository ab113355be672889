//! Error types for help discovery.
//!
//! [`ProbeError`] is absorbed per node by the walker; the other types are
//! fatal and surface to the caller.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// A single `--help` invocation failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The process could not be started.
    #[error("spawn failed: {0}")]
    Spawn(#[source] std::io::Error),

    /// Waiting on the process or reading its output failed.
    #[error("wait failed: {0}")]
    Wait(#[source] std::io::Error),

    /// The process did not exit within the configured timeout.
    #[error("timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Standard output was not valid UTF-8.
    #[error("output is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

/// Writing the catalog artifact failed.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Filesystem I/O failure.
    #[error("I/O error writing '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The temporary file could not be moved over the destination.
    #[error("failed to persist '{}': {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// Invalid walk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("program name cannot be empty")]
    EmptyProgram,
    #[error("concurrency limit must be at least 1")]
    ZeroConcurrency,
    #[error("concurrency limit {0} exceeds the supported maximum")]
    ConcurrencyTooLarge(usize),
    #[error("help timeout must be greater than zero")]
    ZeroTimeout,
}
