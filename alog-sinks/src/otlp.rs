//! OTLP span export.
//!
//! [`OtlpSpanSink`] turns events into [`SpanRecord`]s and hands them to a
//! background worker over a bounded queue, so instrumented calls never
//! block on the network. The worker drains the queue in small batches and
//! forwards them through a [`SpanExporter`]; [`OtlpGrpcExporter`] is the
//! production implementation backed by the OpenTelemetry OTLP pipeline.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use async_trait::async_trait;
use opentelemetry::trace::{
    Span, SpanBuilder, SpanContext, SpanKind, Status, TraceContextExt, TraceFlags, TraceState,
    Tracer,
};
use opentelemetry::{Context, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use alog_events::Event;
use alog_primitives::{SpanId, TraceId};

use crate::{EventSink, SinkError, SinkResult, SpanRecord};

const DEFAULT_QUEUE_CAPACITY: usize = 1024;
const EXPORT_BATCH: usize = 64;

/// Backend that ships finished spans somewhere.
#[async_trait]
pub trait SpanExporter: Send + Sync {
    /// Exports a batch of finished spans.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Export`] when the backend rejects the batch.
    async fn export(&self, spans: Vec<SpanRecord>) -> SinkResult<()>;
}

/// Queueing sink that forwards closed spans to a [`SpanExporter`].
///
/// Must be created inside a Tokio runtime; the export worker runs as a
/// spawned task and stops once the sink is dropped.
pub struct OtlpSpanSink {
    queue: mpsc::Sender<SpanRecord>,
}

impl OtlpSpanSink {
    /// Creates a sink with the default queue capacity.
    #[must_use]
    pub fn new(exporter: Arc<dyn SpanExporter>) -> Self {
        Self::with_capacity(exporter, DEFAULT_QUEUE_CAPACITY)
    }

    /// Creates a sink with an explicit queue capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, mirroring the underlying channel.
    #[must_use]
    pub fn with_capacity(exporter: Arc<dyn SpanExporter>, capacity: usize) -> Self {
        let (queue, mut pending) = mpsc::channel(capacity);
        tokio::spawn(async move {
            let mut batch = Vec::with_capacity(EXPORT_BATCH);
            while pending.recv_many(&mut batch, EXPORT_BATCH).await > 0 {
                if let Err(error) = exporter.export(std::mem::take(&mut batch)).await {
                    tracing::warn!(error = %error, "span export failed");
                }
            }
        });
        Self { queue }
    }
}

#[async_trait]
impl EventSink for OtlpSpanSink {
    async fn accept(&self, event: &Event) -> SinkResult<()> {
        let Some(record) = SpanRecord::from_event(event) else {
            return Ok(());
        };
        match self.queue.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SinkError::QueueFull),
            Err(TrySendError::Closed(_)) => Err(SinkError::Export {
                reason: "export worker stopped".to_owned(),
            }),
        }
    }
}

/// Exporter backed by the OpenTelemetry OTLP gRPC pipeline.
pub struct OtlpGrpcExporter {
    tracer: opentelemetry_sdk::trace::Tracer,
}

impl OtlpGrpcExporter {
    /// Installs a batching OTLP pipeline targeting the given endpoint.
    ///
    /// Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Export`] when the pipeline cannot be installed.
    pub fn connect(endpoint: &str, service_name: &str) -> SinkResult<Self> {
        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(
                opentelemetry_otlp::new_exporter()
                    .tonic()
                    .with_endpoint(endpoint.to_owned()),
            )
            .with_trace_config(opentelemetry_sdk::trace::config().with_resource(Resource::new(
                vec![KeyValue::new("service.name", service_name.to_owned())],
            )))
            .install_batch(opentelemetry_sdk::runtime::Tokio)
            .map_err(|error| SinkError::Export {
                reason: error.to_string(),
            })?;
        Ok(Self { tracer })
    }

    fn build_span(&self, record: &SpanRecord) {
        let trace_id = otel_trace_id(record.trace_id());
        let mut builder = SpanBuilder::from_name(record.name().to_owned())
            .with_trace_id(trace_id)
            .with_span_id(otel_span_id(record.span_id()))
            .with_kind(SpanKind::Internal)
            .with_start_time(SystemTime::from(record.start()))
            .with_attributes(otel_attributes(record));
        if let Some(error) = record.error() {
            builder = builder.with_status(Status::error(error.to_owned()));
        }

        let parent = match record.parent_span_id() {
            Some(parent) => Context::new().with_remote_span_context(SpanContext::new(
                trace_id,
                otel_span_id(parent),
                TraceFlags::SAMPLED,
                true,
                TraceState::default(),
            )),
            None => Context::new(),
        };

        let mut span = self.tracer.build_with_context(builder, &parent);
        span.end_with_timestamp(SystemTime::from(record.end()));
    }
}

#[async_trait]
impl SpanExporter for OtlpGrpcExporter {
    async fn export(&self, spans: Vec<SpanRecord>) -> SinkResult<()> {
        for record in &spans {
            self.build_span(record);
        }
        Ok(())
    }
}

/// In-memory exporter that records every span it receives.
///
/// Useful for asserting on exported spans in tests and local debugging.
#[derive(Default)]
pub struct RecordingExporter {
    spans: Mutex<Vec<SpanRecord>>,
}

impl RecordingExporter {
    /// Creates an empty recording exporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every span exported so far.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SpanExporter for RecordingExporter {
    async fn export(&self, spans: Vec<SpanRecord>) -> SinkResult<()> {
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(spans);
        Ok(())
    }
}

fn otel_trace_id(id: TraceId) -> opentelemetry::trace::TraceId {
    opentelemetry::trace::TraceId::from_bytes(id.as_uuid().into_bytes())
}

// Span identifiers are 16 bytes internally but OTLP span ids are 8; the
// projection keeps the leading bytes, which are random under UUIDv4.
fn otel_span_id(id: SpanId) -> opentelemetry::trace::SpanId {
    let bytes = id.as_uuid().into_bytes();
    let mut eight = [0_u8; 8];
    eight.copy_from_slice(&bytes[..8]);
    opentelemetry::trace::SpanId::from_bytes(eight)
}

fn otel_attributes(record: &SpanRecord) -> Vec<KeyValue> {
    record
        .attributes()
        .iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(text) => opentelemetry::Value::from(text.clone()),
                serde_json::Value::Bool(flag) => opentelemetry::Value::from(*flag),
                serde_json::Value::Number(number) => number.as_i64().map_or_else(
                    || opentelemetry::Value::from(number.as_f64().unwrap_or_default()),
                    opentelemetry::Value::from,
                ),
                other => opentelemetry::Value::from(other.to_string()),
            };
            KeyValue::new(key.clone(), value)
        })
        .collect()
}
