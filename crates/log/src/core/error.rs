//! Error handling for teelog

use std::io;
use std::path::PathBuf;

/// Type alias for results of logging operations
pub type LogResult<T> = Result<T, LogError>;

/// Errors produced while building, flushing or configuring sinks
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// A configured log file could not be opened. Setup is aborted and the
    /// previously installed logger stays active.
    #[error("failed to open log file {path:?}: {source}")]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The destination was already closed by an earlier flush
    #[error("log destination '{target}' is already closed")]
    Closed {
        /// Destination label (`stdout`, or the file path)
        target: String,
    },

    /// Flushing or closing a destination failed
    #[error("failed to flush log destination '{target}': {source}")]
    Flush {
        /// Destination label
        target: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Unknown level name
    #[error("invalid log level '{0}', expected one of debug, info, warn, error")]
    InvalidLevel(String),

    /// Unknown mode name
    #[error("invalid log mode '{0}', expected development or production")]
    InvalidMode(String),
}

impl LogError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn flush(target: impl Into<String>, source: io::Error) -> Self {
        Self::Flush {
            target: target.into(),
            source,
        }
    }

    /// Whether this error means setup could not open a destination
    pub fn is_open_error(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}
