//! Task-scoped trace context propagation.
//!
//! Each instrumented call runs inside a [`SpanFrame`]. Frames form a stack
//! stored in a Tokio task-local, so nested calls within one task inherit
//! the ambient trace while concurrent tasks stay fully isolated without any
//! global synchronization.
//!
//! A fresh trace is minted only when a call starts with no ambient frame;
//! every nested call becomes a child span within the existing trace.

#![warn(missing_docs, clippy::pedantic)]

mod frame;
mod stack;

pub use frame::{SpanFrame, TraceHandoff};
pub use stack::{capture, current, root_scope, scope_seeded, with_frame};
