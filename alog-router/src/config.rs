//! Engine configuration.

use std::path::{Path, PathBuf};

use alog_primitives::Level;

/// Environment variable enabling OTLP export when no explicit setting is
/// given.
pub const ENV_ENABLE_OTEL: &str = "ALOG_ENABLE_OTEL";

/// Environment variable overriding the OTLP endpoint. Takes precedence
/// over any explicitly configured endpoint.
pub const ENV_OTEL_ENDPOINT: &str = "ALOG_OTEL_ENDPOINT";

const DEFAULT_OUTPUT_DIR: &str = "logs";
const DEFAULT_OTEL_ENDPOINT: &str = "http://localhost:4317";
const DEFAULT_SERVICE_NAME: &str = "alog-agent";

/// Which methods of an agent get instrumented.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum MethodSelection {
    /// Wrap every method the agent exposes.
    #[default]
    AllPublic,
    /// Wrap only the named methods; unknown names are skipped with a
    /// warning.
    Named(Vec<String>),
}

/// Resolved engine configuration.
///
/// Built through [`Config::builder`]; environment overrides are applied at
/// build time so the resolved value never consults the environment again.
#[derive(Clone, Debug)]
pub struct Config {
    output_dir: PathBuf,
    min_level: Level,
    enable_otel: bool,
    otel_endpoint: String,
    service_name: String,
    persist_contextual_to_file: bool,
    auto_instrument: bool,
    console_echo: bool,
}

impl Config {
    /// Creates a builder seeded with defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Returns the directory JSONL log files are written under.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the minimum severity the router records.
    #[must_use]
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Returns whether spans are exported over OTLP.
    #[must_use]
    pub fn enable_otel(&self) -> bool {
        self.enable_otel
    }

    /// Returns the OTLP gRPC endpoint.
    #[must_use]
    pub fn otel_endpoint(&self) -> &str {
        &self.otel_endpoint
    }

    /// Returns the service name stamped on exported spans.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns whether contextual events are persisted to file.
    #[must_use]
    pub fn persist_contextual_to_file(&self) -> bool {
        self.persist_contextual_to_file
    }

    /// Returns whether wrapping instruments all public methods by default.
    #[must_use]
    pub fn auto_instrument(&self) -> bool {
        self.auto_instrument
    }

    /// Returns whether operational statuses are echoed to the console log.
    #[must_use]
    pub fn console_echo(&self) -> bool {
        self.console_echo
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    output_dir: Option<PathBuf>,
    min_level: Option<Level>,
    enable_otel: Option<bool>,
    otel_endpoint: Option<String>,
    service_name: Option<String>,
    persist_contextual_to_file: Option<bool>,
    auto_instrument: Option<bool>,
    console_echo: Option<bool>,
}

impl ConfigBuilder {
    /// Sets the directory JSONL log files are written under.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the minimum severity the router records.
    #[must_use]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Explicitly enables or disables OTLP export.
    ///
    /// When not called, `ALOG_ENABLE_OTEL` decides (default off).
    #[must_use]
    pub fn enable_otel(mut self, enable: bool) -> Self {
        self.enable_otel = Some(enable);
        self
    }

    /// Sets the OTLP gRPC endpoint. `ALOG_OTEL_ENDPOINT` still wins when
    /// set.
    #[must_use]
    pub fn otel_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otel_endpoint = Some(endpoint.into());
        self
    }

    /// Sets the service name stamped on exported spans.
    #[must_use]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Controls whether contextual events are persisted to file.
    #[must_use]
    pub fn persist_contextual_to_file(mut self, persist: bool) -> Self {
        self.persist_contextual_to_file = Some(persist);
        self
    }

    /// Controls whether wrapping instruments all public methods by
    /// default.
    #[must_use]
    pub fn auto_instrument(mut self, auto: bool) -> Self {
        self.auto_instrument = Some(auto);
        self
    }

    /// Controls whether operational statuses are echoed to the console
    /// log.
    #[must_use]
    pub fn console_echo(mut self, echo: bool) -> Self {
        self.console_echo = Some(echo);
        self
    }

    /// Resolves the configuration, applying environment overrides.
    #[must_use]
    pub fn build(self) -> Config {
        let enable_otel = self
            .enable_otel
            .unwrap_or_else(|| env_flag(ENV_ENABLE_OTEL));
        let otel_endpoint = env_value(ENV_OTEL_ENDPOINT)
            .or(self.otel_endpoint)
            .unwrap_or_else(|| DEFAULT_OTEL_ENDPOINT.to_owned());
        Config {
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            min_level: self.min_level.unwrap_or_default(),
            enable_otel,
            otel_endpoint,
            service_name: self
                .service_name
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_owned()),
            persist_contextual_to_file: self.persist_contextual_to_file.unwrap_or(true),
            auto_instrument: self.auto_instrument.unwrap_or(true),
            console_echo: self.console_echo.unwrap_or(true),
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_flag(key: &str) -> bool {
    env_value(key).is_some_and(|value| {
        matches!(
            value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}
