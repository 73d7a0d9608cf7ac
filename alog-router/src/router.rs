//! The dual-sink event router.

use alog_context::SpanFrame;
use alog_events::{ContextualPayload, Event, Payload};
use alog_primitives::{Level, Surface};
use alog_sinks::{EventSink, JsonlSink};

use crate::{Config, RouterResult};

/// Routes recorded events to their sinks.
///
/// Owns one JSONL sink per surface plus an optional span exporter.
/// [`record`](EventRouter::record) never returns an error: a failing sink
/// is logged and the remaining sinks still run, so instrumentation can
/// never break the instrumented call.
pub struct EventRouter {
    min_level: Level,
    persist_contextual: bool,
    console_echo: bool,
    operational: JsonlSink,
    cognitive: JsonlSink,
    contextual: JsonlSink,
    exporter: Option<Box<dyn EventSink>>,
}

impl EventRouter {
    /// Opens the per-surface log files under the configured output
    /// directory.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from opening the log files.
    pub async fn new(config: &Config) -> RouterResult<Self> {
        let dir = config.output_dir();
        Ok(Self {
            min_level: config.min_level(),
            persist_contextual: config.persist_contextual_to_file(),
            console_echo: config.console_echo(),
            operational: JsonlSink::open(dir.join(Surface::Operational.file_name())).await?,
            cognitive: JsonlSink::open(dir.join(Surface::Cognitive.file_name())).await?,
            contextual: JsonlSink::open(dir.join(Surface::Contextual.file_name())).await?,
            exporter: None,
        })
    }

    /// Attaches a span exporter sink.
    #[must_use]
    pub fn with_exporter(mut self, sink: impl EventSink + 'static) -> Self {
        self.exporter = Some(Box::new(sink));
        self
    }

    /// Records one event.
    ///
    /// Events below the configured minimum level are dropped. Operational
    /// and cognitive events always reach their file; contextual events
    /// only when persistence is enabled. Every surface reaches the
    /// exporter when one is attached.
    pub async fn record(&self, event: &Event) {
        if event.level() < self.min_level {
            return;
        }

        let to_file = match event.surface() {
            Surface::Operational | Surface::Cognitive => true,
            Surface::Contextual => self.persist_contextual,
        };
        if to_file {
            let sink = self.file_sink(event.surface());
            if let Err(error) = sink.accept(event).await {
                tracing::warn!(
                    error = %error,
                    surface = %event.surface(),
                    "file sink rejected event"
                );
            }
        }

        if let Some(exporter) = &self.exporter {
            if let Err(error) = exporter.accept(event).await {
                tracing::warn!(
                    error = %error,
                    surface = %event.surface(),
                    "span exporter rejected event"
                );
            }
        }

        if self.console_echo {
            if let Payload::Operational(op) = event.payload() {
                tracing::info!(
                    agent = event.agent(),
                    method = op.method(),
                    status = %op.status(),
                    "agent call"
                );
            }
        }
    }

    /// Records a contextual event under the ambient span, minting a fresh
    /// trace when no instrumented call is active.
    pub async fn record_contextual(
        &self,
        agent: &str,
        payload: ContextualPayload,
        level: Level,
    ) {
        let frame = alog_context::current().unwrap_or_else(SpanFrame::root);
        let mut builder =
            Event::builder(agent, frame.trace_id(), frame.span_id(), payload).level(level);
        if let Some(parent) = frame.parent_span_id() {
            builder = builder.parent_span_id(parent);
        }
        self.record(&builder.build()).await;
    }

    /// Reads back every persisted event for one surface, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates I/O and deserialization errors from the backing file.
    pub async fn read(&self, surface: Surface) -> RouterResult<Vec<Event>> {
        Ok(self.file_sink(surface).read_all().await?)
    }

    /// Counts persisted events per surface.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the backing files.
    pub async fn stats(&self) -> RouterResult<RouterStats> {
        Ok(RouterStats {
            operational: self.read(Surface::Operational).await?.len(),
            cognitive: self.read(Surface::Cognitive).await?.len(),
            contextual: self.read(Surface::Contextual).await?.len(),
        })
    }

    /// Truncates every surface's log file.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the backing files.
    pub async fn clear(&self) -> RouterResult<()> {
        self.operational.clear().await?;
        self.cognitive.clear().await?;
        self.contextual.clear().await?;
        Ok(())
    }

    fn file_sink(&self, surface: Surface) -> &JsonlSink {
        match surface {
            Surface::Operational => &self.operational,
            Surface::Cognitive => &self.cognitive,
            Surface::Contextual => &self.contextual,
        }
    }
}

/// Per-surface counts of persisted events.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RouterStats {
    operational: usize,
    cognitive: usize,
    contextual: usize,
}

impl RouterStats {
    /// Returns the number of persisted operational events.
    #[must_use]
    pub fn operational(&self) -> usize {
        self.operational
    }

    /// Returns the number of persisted cognitive events.
    #[must_use]
    pub fn cognitive(&self) -> usize {
        self.cognitive
    }

    /// Returns the number of persisted contextual events.
    #[must_use]
    pub fn contextual(&self) -> usize {
        self.contextual
    }

    /// Returns the total across all surfaces.
    #[must_use]
    pub fn total(&self) -> usize {
        self.operational + self.cognitive + self.contextual
    }
}
