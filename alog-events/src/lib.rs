//! Event envelope and surface-specific payloads.
//!
//! Every record produced by the instrumentation engine is an [`Event`]: a
//! common envelope (identifier, timestamp, agent label, trace linkage)
//! wrapping one surface-specific [`Payload`]. Events serialize to a single
//! JSON object per line so sink files stay independently parseable.

#![warn(missing_docs, clippy::pedantic)]

mod envelope;
mod payload;
mod summary;

pub use envelope::{Event, EventBuilder};
pub use payload::{
    CognitivePayload, ContextOperation, ContextualPayload, OperationalPayload, OperationalStatus,
    Payload,
};
pub use summary::{summarize_result, truncate_thought};
