//! Configuration and event routing.
//!
//! The [`EventRouter`] owns every sink and applies a fixed routing table:
//! operational and cognitive events always reach their JSONL file,
//! contextual events only when persistence is enabled, and every surface
//! reaches the span exporter when one is attached. Routing never fails from
//! the caller's perspective; sink errors are logged and swallowed.

#![warn(missing_docs, clippy::pedantic)]

mod config;
mod error;
mod router;

pub use config::{Config, ConfigBuilder, ENV_ENABLE_OTEL, ENV_OTEL_ENDPOINT, MethodSelection};
pub use error::{RouterError, RouterResult};
pub use router::{EventRouter, RouterStats};
