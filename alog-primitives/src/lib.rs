//! Core shared types for the ALOG instrumentation engine.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod level;
mod surface;

/// Error type shared by identifier and level parsing.
pub use error::Error;
/// Unique identifiers for events, traces, and spans.
pub use ids::{EventId, SpanId, TraceId};
/// Severity level attached to every recorded event.
pub use level::Level;
/// The three logging surfaces an event can belong to.
pub use surface::Surface;
