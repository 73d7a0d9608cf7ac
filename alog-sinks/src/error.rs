//! Sink error types.

use thiserror::Error;

/// Convenience alias for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Errors surfaced by event sinks.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Filesystem failure while writing or reading a log file.
    #[error("log file I/O failed: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: std::io::Error,
    },
    /// An event could not be serialized to JSON.
    #[error("event serialization failed: {source}")]
    Serialization {
        /// Underlying serde error.
        #[from]
        source: serde_json::Error,
    },
    /// The export queue was full and the span was dropped.
    #[error("span export queue is full")]
    QueueFull,
    /// The exporter backend rejected or failed a batch.
    #[error("span export failed: {reason}")]
    Export {
        /// Backend-provided failure description.
        reason: String,
    },
}
