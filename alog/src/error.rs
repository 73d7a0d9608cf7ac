//! Facade error types.

use thiserror::Error;

use alog_router::RouterError;
use alog_sinks::SinkError;

/// Convenience alias for engine operations.
pub type AlogResult<T> = Result<T, AlogError>;

/// Errors surfaced while setting up or maintaining the engine.
#[derive(Debug, Error)]
pub enum AlogError {
    /// The router could not open or maintain its log files.
    #[error(transparent)]
    Router(#[from] RouterError),
    /// The OTLP exporter could not be installed.
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// Console logging was already initialized by another subscriber.
    #[error("console logging init failed: {0}")]
    Console(String),
}
