//! Event sinks: JSONL files and OTLP span export.
//!
//! A sink accepts fully formed events and persists or forwards them. The
//! router treats every sink uniformly through [`EventSink`]; sink failures
//! surface as [`SinkError`] values the router logs without propagating to
//! instrumented callers.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod jsonl;
mod otlp;
mod sink;
mod span;

pub use error::{SinkError, SinkResult};
pub use jsonl::JsonlSink;
pub use otlp::{OtlpGrpcExporter, OtlpSpanSink, RecordingExporter, SpanExporter};
pub use sink::EventSink;
pub use span::SpanRecord;
