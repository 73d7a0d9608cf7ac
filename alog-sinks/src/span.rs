//! Exporter-facing span records derived from events.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use alog_events::{Event, OperationalStatus, Payload};
use alog_primitives::{SpanId, TraceId};

/// One finished span ready for export.
///
/// Records are derived from closed events only: operational `start` events
/// carry no span because the span is exported once with its full duration
/// when the call closes.
#[derive(Clone, Debug)]
pub struct SpanRecord {
    trace_id: TraceId,
    span_id: SpanId,
    parent_span_id: Option<SpanId>,
    name: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    error: Option<String>,
    attributes: Vec<(String, Value)>,
}

impl SpanRecord {
    /// Derives a span record from an event, when the event closes a span.
    ///
    /// Operational `complete` and `error` events produce the call span,
    /// with its start reconstructed from the recorded duration. Cognitive
    /// and contextual events produce instantaneous child spans under the
    /// envelope span, each with a freshly minted span id.
    #[must_use]
    pub fn from_event(event: &Event) -> Option<Self> {
        match event.payload() {
            Payload::Operational(op) => {
                if op.status() == OperationalStatus::Start {
                    return None;
                }
                let elapsed = op
                    .duration_sec()
                    .map(std::time::Duration::from_secs_f64)
                    .and_then(|d| Duration::from_std(d).ok())
                    .unwrap_or_else(Duration::zero);
                let mut attributes = vec![
                    ("method".to_owned(), Value::from(op.method())),
                    ("status".to_owned(), Value::from(op.status().as_str())),
                ];
                push_opt(&mut attributes, "duration_sec", op.duration_sec());
                push_opt(&mut attributes, "result_summary", op.result_summary());
                push_opt(&mut attributes, "error_kind", op.error_kind());
                push_opt(&mut attributes, "error_message", op.error_message());
                let error = (op.status() == OperationalStatus::Error).then(|| {
                    op.error_message()
                        .or(op.error_kind())
                        .unwrap_or("method failed")
                        .to_owned()
                });
                Some(Self {
                    trace_id: event.trace_id(),
                    span_id: event.span_id(),
                    parent_span_id: event.parent_span_id(),
                    name: op.method().to_owned(),
                    start: event.timestamp() - elapsed,
                    end: event.timestamp(),
                    error,
                    attributes,
                })
            }
            Payload::Cognitive(cog) => {
                let mut attributes = vec![
                    ("thought".to_owned(), Value::from(cog.thought())),
                    ("goal".to_owned(), Value::from(cog.goal())),
                ];
                push_opt(&mut attributes, "plan", cog.plan());
                push_opt(&mut attributes, "reflection", cog.reflection());
                push_opt(&mut attributes, "confidence", cog.confidence());
                push_opt(&mut attributes, "model", cog.model());
                push_opt(&mut attributes, "reasoning_step", cog.reasoning_step());
                Some(Self {
                    trace_id: event.trace_id(),
                    // The envelope span is the call that produced the
                    // thought; the thought gets its own child span.
                    span_id: SpanId::random(),
                    parent_span_id: Some(event.span_id()),
                    name: "thought".to_owned(),
                    start: event.timestamp(),
                    end: event.timestamp(),
                    error: None,
                    attributes,
                })
            }
            Payload::Contextual(ctx) => {
                let mut attributes = vec![
                    ("operation".to_owned(), Value::from(ctx.operation().as_str())),
                    ("source_type".to_owned(), Value::from(ctx.source_type())),
                    ("source_name".to_owned(), Value::from(ctx.source_name())),
                ];
                push_opt(&mut attributes, "query", ctx.query());
                push_opt(&mut attributes, "retrieved_count", ctx.retrieved_count());
                push_opt(&mut attributes, "provenance", ctx.provenance());
                push_opt(&mut attributes, "cache_hit", ctx.cache_hit());
                Some(Self {
                    trace_id: event.trace_id(),
                    // The envelope span is the call (or minted root) the
                    // interaction happened under; the interaction gets
                    // its own child span so ids stay unique per trace.
                    span_id: SpanId::random(),
                    parent_span_id: Some(event.span_id()),
                    name: format!("context.{}", ctx.operation()),
                    start: event.timestamp(),
                    end: event.timestamp(),
                    error: None,
                    attributes,
                })
            }
        }
    }

    /// Returns the trace identifier.
    #[must_use]
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// Returns the span identifier.
    #[must_use]
    pub fn span_id(&self) -> SpanId {
        self.span_id
    }

    /// Returns the parent span, when present.
    #[must_use]
    pub fn parent_span_id(&self) -> Option<SpanId> {
        self.parent_span_id
    }

    /// Returns the span name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the span start time.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the span end time.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the error description for failed spans.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the exported attributes, keyed by payload field name.
    #[must_use]
    pub fn attributes(&self) -> &[(String, Value)] {
        &self.attributes
    }
}

fn push_opt<V: Into<Value>>(attributes: &mut Vec<(String, Value)>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        attributes.push((key.to_owned(), value.into()));
    }
}
