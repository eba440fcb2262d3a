//! Error types for file-based logging

use std::io;
use std::path::PathBuf;

/// Result type for file logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during file logging
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A process-wide instance was initialized twice
    #[error("{0} logger already initialized")]
    AlreadyInitialized(&'static str),

    /// The writer queue is gone
    #[error("Failed to send log message: channel closed")]
    ChannelClosed,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The directory resolver could not produce a directory
    #[error("Failed to resolve log directory: {0}")]
    Resolution(String),

    /// The writer thread or its runtime could not be started
    #[error("Failed to start log writer: {0}")]
    Runtime(#[source] io::Error),

    /// A write was attempted before the log file path was resolved
    #[error("Log file path is not resolved yet")]
    Unresolved,

    /// A write was attempted before the log file path was resolved while
    /// strict resolution is enabled
    #[error("Log write attempted before the log file path was resolved")]
    WriteBeforeResolution,

    /// Appending to the log file failed
    #[error("Failed to append to {path}: {source}")]
    Write {
        /// The file that could not be appended to
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },
}
