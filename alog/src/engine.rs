//! Engine construction and the instrumentation handle.

use std::sync::Arc;

use alog_events::ContextualPayload;
use alog_instrument::{Instrumentable, InstrumentedAgent};
use alog_primitives::Level;
use alog_router::{Config, EventRouter, MethodSelection, RouterStats};
use alog_sinks::{OtlpGrpcExporter, OtlpSpanSink};

use crate::AlogResult;

/// Builds the engine from a resolved configuration.
///
/// Opens the per-surface log files and, when OTLP export is enabled,
/// installs the gRPC exporter pipeline. Must be called inside a Tokio
/// runtime.
///
/// # Errors
///
/// Returns [`AlogError`](crate::AlogError) when a log file cannot be
/// opened or the exporter pipeline cannot be installed.
pub async fn init(config: Config) -> AlogResult<Alog> {
    let mut router = EventRouter::new(&config).await?;
    if config.enable_otel() {
        let exporter = OtlpGrpcExporter::connect(config.otel_endpoint(), config.service_name())?;
        router = router.with_exporter(OtlpSpanSink::new(Arc::new(exporter)));
        tracing::info!(endpoint = config.otel_endpoint(), "OTLP span export enabled");
    }
    Ok(Alog {
        config,
        router: Arc::new(router),
    })
}

/// Handle to a running instrumentation engine.
///
/// Cheap to clone; every clone shares the same router and sinks.
#[derive(Clone)]
pub struct Alog {
    config: Config,
    router: Arc<EventRouter>,
}

impl Alog {
    /// Returns the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the shared event router.
    #[must_use]
    pub fn router(&self) -> Arc<EventRouter> {
        self.router.clone()
    }

    /// Wraps every method the target exposes.
    ///
    /// When auto-instrumentation is disabled in the configuration, the
    /// returned agent wraps nothing and every call reports an unknown
    /// method; use [`instrument_methods`](Self::instrument_methods) to
    /// opt methods in explicitly.
    #[must_use]
    pub fn instrument(&self, target: &dyn Instrumentable, name: impl Into<String>) -> InstrumentedAgent {
        let selection = if self.config.auto_instrument() {
            MethodSelection::AllPublic
        } else {
            MethodSelection::Named(Vec::new())
        };
        InstrumentedAgent::wrap(self.router.clone(), target, name, &selection)
    }

    /// Wraps only the named methods of the target.
    #[must_use]
    pub fn instrument_methods(
        &self,
        target: &dyn Instrumentable,
        name: impl Into<String>,
        methods: Vec<String>,
    ) -> InstrumentedAgent {
        InstrumentedAgent::wrap(
            self.router.clone(),
            target,
            name,
            &MethodSelection::Named(methods),
        )
    }

    /// Records a contextual event under the ambient span.
    pub async fn record_contextual(&self, agent: &str, payload: ContextualPayload, level: Level) {
        self.router.record_contextual(agent, payload, level).await;
    }

    /// Counts persisted events per surface.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the backing files.
    pub async fn stats(&self) -> AlogResult<RouterStats> {
        Ok(self.router.stats().await?)
    }

    /// Truncates every surface's log file.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the backing files.
    pub async fn clear_logs(&self) -> AlogResult<()> {
        Ok(self.router.clear().await?)
    }
}

impl std::fmt::Debug for Alog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alog")
            .field("output_dir", &self.config.output_dir())
            .field("enable_otel", &self.config.enable_otel())
            .finish_non_exhaustive()
    }
}
