//! Agent instrumentation engine facade.
//!
//! Depend on this crate via `cargo add alog`. It bundles the engine crates
//! and exposes the one-call entry points: [`init`] builds an [`Alog`]
//! handle from a [`Config`], and [`Alog::instrument`] wraps an agent so
//! every method call is recorded to per-surface JSONL files and, when
//! enabled, exported as OTLP spans.
//!
//! ```no_run
//! use alog::{Config, Instrumentable, MethodBinding};
//! use serde_json::{Value, json};
//!
//! struct Assistant;
//!
//! impl Instrumentable for Assistant {
//!     fn agent_methods(&self) -> Vec<MethodBinding> {
//!         vec![MethodBinding::new("run", |input: Value| async move {
//!             Ok(json!(format!("Done: {}", input.as_str().unwrap_or_default())))
//!         })]
//!     }
//! }
//!
//! # async fn demo() -> alog::AlogResult<()> {
//! let engine = alog::init(Config::builder().output_dir("logs").build()).await?;
//! let agent = engine.instrument(&Assistant, "assistant");
//! let answer = agent.call("run", json!("X")).await;
//! # let _ = answer;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, clippy::pedantic)]

mod engine;
mod error;
mod logging;

pub mod global;

/// Trace context propagation for spawned tasks.
pub use alog_context as context;
/// Event envelope and payload types.
pub use alog_events as events;
/// Shared identifiers, levels, and surfaces.
pub use alog_primitives as primitives;
/// Sink implementations, including the in-memory recording exporter.
pub use alog_sinks as sinks;

pub use alog_context::{TraceHandoff, capture, root_scope, scope_seeded};
pub use alog_events::{
    CognitivePayload, ContextOperation, ContextualPayload, Event, OperationalPayload,
    OperationalStatus, Payload,
};
pub use alog_instrument::{
    AgentMethod, Instrumentable, InstrumentedAgent, MethodBinding, MethodError, REASONING_END,
    REASONING_START,
};
pub use alog_primitives::{EventId, Level, SpanId, Surface, TraceId};
pub use alog_router::{
    Config, ConfigBuilder, ENV_ENABLE_OTEL, ENV_OTEL_ENDPOINT, EventRouter, MethodSelection,
    RouterStats,
};

pub use engine::{Alog, init};
pub use error::{AlogError, AlogResult};
pub use global::{current, install, reset};
pub use logging::init_console_logging;
