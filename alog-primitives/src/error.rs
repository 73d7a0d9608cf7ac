//! Error type for primitive parsing failures.

use thiserror::Error;

/// Errors produced while parsing primitive values from text.
#[derive(Debug, Error)]
pub enum Error {
    /// An identifier string was not a valid UUID.
    #[error("invalid identifier: {source}")]
    InvalidId {
        /// Source [`uuid::Error`].
        #[from]
        source: uuid::Error,
    },
    /// A level string did not name a known severity.
    #[error("unknown level `{0}`")]
    UnknownLevel(String),
    /// A surface string did not name a known surface.
    #[error("unknown surface `{0}`")]
    UnknownSurface(String),
}
