//! Router error types.

use thiserror::Error;

use alog_sinks::SinkError;

/// Convenience alias for router operations.
pub type RouterResult<T> = Result<T, RouterError>;

/// Errors surfaced while setting up or maintaining the router.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A sink failed while being opened, read, or cleared.
    #[error(transparent)]
    Sink(#[from] SinkError),
}
