//! Span frames and cross-task handoff.

use alog_primitives::{SpanId, TraceId};

/// One active call frame within a trace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpanFrame {
    trace_id: TraceId,
    span_id: SpanId,
    parent_span_id: Option<SpanId>,
}

impl SpanFrame {
    /// Mints a root frame with a fresh trace and span.
    #[must_use]
    pub fn root() -> Self {
        Self {
            trace_id: TraceId::random(),
            span_id: SpanId::random(),
            parent_span_id: None,
        }
    }

    /// Mints a child frame within this frame's trace.
    #[must_use]
    pub fn child(self) -> Self {
        Self {
            trace_id: self.trace_id,
            span_id: SpanId::random(),
            parent_span_id: Some(self.span_id),
        }
    }

    /// Returns the trace identifier.
    #[must_use]
    pub fn trace_id(self) -> TraceId {
        self.trace_id
    }

    /// Returns the span identifier.
    #[must_use]
    pub fn span_id(self) -> SpanId {
        self.span_id
    }

    /// Returns the parent span, absent for root frames.
    #[must_use]
    pub fn parent_span_id(self) -> Option<SpanId> {
        self.parent_span_id
    }
}

/// A snapshot of the ambient frame, suitable for carrying into a spawned
/// task so its spans join the originating trace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TraceHandoff {
    trace_id: TraceId,
    span_id: SpanId,
}

impl TraceHandoff {
    pub(crate) fn from_frame(frame: SpanFrame) -> Self {
        Self {
            trace_id: frame.trace_id,
            span_id: frame.span_id,
        }
    }

    pub(crate) fn into_frame(self) -> SpanFrame {
        SpanFrame {
            trace_id: self.trace_id,
            span_id: self.span_id,
            parent_span_id: None,
        }
    }

    /// Returns the trace identifier being handed off.
    #[must_use]
    pub fn trace_id(self) -> TraceId {
        self.trace_id
    }

    /// Returns the span the spawned work should parent under.
    #[must_use]
    pub fn span_id(self) -> SpanId {
        self.span_id
    }
}
