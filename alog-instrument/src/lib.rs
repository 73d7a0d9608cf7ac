//! Method interception and reasoning extraction.
//!
//! [`InstrumentedAgent`] wraps an [`Instrumentable`] target and records the
//! lifecycle of every wrapped method call: a start event before invocation,
//! a complete or error event after, and a cognitive event whenever the
//! method's output embeds a reasoning trace between the well-known markers.
//! Callers observe the same results and errors they would without
//! instrumentation, with reasoning blocks stripped from string output.

#![warn(missing_docs, clippy::pedantic)]

mod extract;
mod facade;
mod method;

pub use extract::{Extraction, REASONING_END, REASONING_START, extract_reasoning};
pub use facade::InstrumentedAgent;
pub use method::{AgentMethod, Instrumentable, MethodBinding, MethodError};
