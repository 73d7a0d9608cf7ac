//! The sink trait.

use async_trait::async_trait;

use alog_events::Event;

use crate::SinkResult;

/// Destination for recorded events.
///
/// Implementations must be safe to share across tasks; the router calls
/// `accept` concurrently from every instrumented call path.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Accepts one event for persistence or forwarding.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`](crate::SinkError) when the event could not be
    /// recorded. The router logs the failure and keeps going.
    async fn accept(&self, event: &Event) -> SinkResult<()>;
}
