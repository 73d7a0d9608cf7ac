//! The common event envelope.

use alog_primitives::{EventId, Level, SpanId, Surface, TraceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Payload;

/// One recorded instrumentation event.
///
/// The envelope fields are shared by every surface; the payload carries the
/// surface-specific body. An event's surface always matches its payload
/// variant, which the builder enforces by deriving one from the other.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    timestamp: DateTime<Utc>,
    agent: String,
    surface: Surface,
    level: Level,
    trace_id: TraceId,
    span_id: SpanId,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_span_id: Option<SpanId>,
    payload: Payload,
}

impl Event {
    /// Creates a builder for a new event.
    ///
    /// The surface is derived from the payload variant; the identifier and
    /// timestamp are minted immediately and can be overridden.
    #[must_use]
    pub fn builder(
        agent: impl Into<String>,
        trace_id: TraceId,
        span_id: SpanId,
        payload: impl Into<Payload>,
    ) -> EventBuilder {
        let payload = payload.into();
        let surface = match &payload {
            Payload::Operational(_) => Surface::Operational,
            Payload::Cognitive(_) => Surface::Cognitive,
            Payload::Contextual(_) => Surface::Contextual,
        };
        EventBuilder {
            id: EventId::random(),
            timestamp: Utc::now(),
            agent: agent.into(),
            surface,
            level: Level::Info,
            trace_id,
            span_id,
            parent_span_id: None,
            payload,
        }
    }

    /// Returns the unique event identifier.
    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Returns the UTC timestamp at which the event was recorded.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the agent label assigned at wrap time.
    #[must_use]
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Returns the surface this event belongs to.
    #[must_use]
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Returns the severity level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the trace this event belongs to.
    #[must_use]
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// Returns the span this event was recorded under.
    #[must_use]
    pub fn span_id(&self) -> SpanId {
        self.span_id
    }

    /// Returns the parent span, absent for root spans.
    #[must_use]
    pub fn parent_span_id(&self) -> Option<SpanId> {
        self.parent_span_id
    }

    /// Returns the surface-specific payload.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

/// Builder for [`Event`] instances.
#[derive(Debug)]
pub struct EventBuilder {
    id: EventId,
    timestamp: DateTime<Utc>,
    agent: String,
    surface: Surface,
    level: Level,
    trace_id: TraceId,
    span_id: SpanId,
    parent_span_id: Option<SpanId>,
    payload: Payload,
}

impl EventBuilder {
    /// Overrides the minted event identifier.
    #[must_use]
    pub fn id(mut self, id: EventId) -> Self {
        self.id = id;
        self
    }

    /// Overrides the minted timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the parent span identifier.
    #[must_use]
    pub fn parent_span_id(mut self, parent: SpanId) -> Self {
        self.parent_span_id = Some(parent);
        self
    }

    /// Finalizes the builder.
    #[must_use]
    pub fn build(self) -> Event {
        Event {
            id: self.id,
            timestamp: self.timestamp,
            agent: self.agent,
            surface: self.surface,
            level: self.level,
            trace_id: self.trace_id,
            span_id: self.span_id,
            parent_span_id: self.parent_span_id,
            payload: self.payload,
        }
    }
}
