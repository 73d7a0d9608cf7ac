//! Surface-specific payload bodies.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status carried by operational events.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalStatus {
    /// A wrapped method began executing.
    Start,
    /// A wrapped method returned successfully.
    Complete,
    /// A wrapped method returned an error.
    Error,
}

impl OperationalStatus {
    /// Returns the lowercase name used in serialized payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }
}

impl Display for OperationalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of external interaction captured by contextual events.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextOperation {
    /// Data was fetched from an external source.
    Retrieve,
    /// Data was written to an external source.
    Store,
    /// Existing external data was modified.
    Update,
    /// External data was removed.
    Delete,
}

impl ContextOperation {
    /// Returns the lowercase name used in serialized payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retrieve => "retrieve",
            Self::Store => "store",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl Display for ContextOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload for method lifecycle events.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OperationalPayload {
    method: String,
    status: OperationalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_sec: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
}

impl OperationalPayload {
    /// Creates a payload for the given method and status.
    #[must_use]
    pub fn new(method: impl Into<String>, status: OperationalStatus) -> Self {
        Self {
            method: method.into(),
            status,
            duration_sec: None,
            result_summary: None,
            error_kind: None,
            error_message: None,
            metadata: None,
        }
    }

    /// Records the wall-clock duration of the call in seconds.
    #[must_use]
    pub fn with_duration_sec(mut self, duration_sec: f64) -> Self {
        self.duration_sec = Some(duration_sec);
        self
    }

    /// Attaches a bounded textual summary of the return value.
    #[must_use]
    pub fn with_result_summary(mut self, summary: impl Into<String>) -> Self {
        self.result_summary = Some(summary.into());
        self
    }

    /// Records the kind and message of a failed call.
    #[must_use]
    pub fn with_error(mut self, kind: impl Into<String>, message: impl Into<String>) -> Self {
        self.error_kind = Some(kind.into());
        self.error_message = Some(message.into());
        self
    }

    /// Attaches free-form metadata about the call.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the instrumented method name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> OperationalStatus {
        self.status
    }

    /// Returns the recorded duration, when present.
    #[must_use]
    pub fn duration_sec(&self) -> Option<f64> {
        self.duration_sec
    }

    /// Returns the result summary, when present.
    #[must_use]
    pub fn result_summary(&self) -> Option<&str> {
        self.result_summary.as_deref()
    }

    /// Returns the recorded error kind, when present.
    #[must_use]
    pub fn error_kind(&self) -> Option<&str> {
        self.error_kind.as_deref()
    }

    /// Returns the recorded error message, when present.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns attached metadata, when present.
    #[must_use]
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }
}

/// Payload for reasoning traces extracted from method output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CognitivePayload {
    thought: String,
    goal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reflection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_step: Option<u32>,
}

impl CognitivePayload {
    /// Creates a payload from a reasoning trace and the goal it serves.
    ///
    /// The thought is truncated to the bound applied by
    /// [`truncate_thought`](crate::truncate_thought).
    #[must_use]
    pub fn new(thought: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            thought: crate::truncate_thought(&thought.into()),
            goal: goal.into(),
            plan: None,
            reflection: None,
            confidence: None,
            model: None,
            reasoning_step: None,
        }
    }

    /// Attaches a plan description.
    #[must_use]
    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    /// Attaches a reflection on a prior step.
    #[must_use]
    pub fn with_reflection(mut self, reflection: impl Into<String>) -> Self {
        self.reflection = Some(reflection.into());
        self
    }

    /// Records the model's stated confidence.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Records the model that produced the reasoning.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Records the position of this thought within a reasoning chain.
    #[must_use]
    pub fn with_reasoning_step(mut self, step: u32) -> Self {
        self.reasoning_step = Some(step);
        self
    }

    /// Returns the captured thought.
    #[must_use]
    pub fn thought(&self) -> &str {
        &self.thought
    }

    /// Returns the goal the reasoning serves.
    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Returns the plan, when present.
    #[must_use]
    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    /// Returns the reflection, when present.
    #[must_use]
    pub fn reflection(&self) -> Option<&str> {
        self.reflection.as_deref()
    }

    /// Returns the confidence, when present.
    #[must_use]
    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    /// Returns the model name, when present.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the reasoning step index, when present.
    #[must_use]
    pub fn reasoning_step(&self) -> Option<u32> {
        self.reasoning_step
    }
}

/// Payload for external-interaction events.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContextualPayload {
    operation: ContextOperation,
    source_type: String,
    source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retrieved_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retrieved_items: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provenance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache_hit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    write_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
}

impl ContextualPayload {
    /// Creates a payload describing an interaction with a named source.
    #[must_use]
    pub fn new(
        operation: ContextOperation,
        source_type: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            source_type: source_type.into(),
            source_name: source_name.into(),
            query: None,
            retrieved_count: None,
            retrieved_items: None,
            provenance: None,
            cache_hit: None,
            write_value: None,
            metadata: None,
        }
    }

    /// Records the query sent to the source.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Records how many items the source returned.
    #[must_use]
    pub fn with_retrieved_count(mut self, count: u64) -> Self {
        self.retrieved_count = Some(count);
        self
    }

    /// Attaches the retrieved items themselves.
    #[must_use]
    pub fn with_retrieved_items(mut self, items: Value) -> Self {
        self.retrieved_items = Some(items);
        self
    }

    /// Records where the retrieved data originated.
    #[must_use]
    pub fn with_provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = Some(provenance.into());
        self
    }

    /// Records whether the interaction was served from a cache.
    #[must_use]
    pub fn with_cache_hit(mut self, cache_hit: bool) -> Self {
        self.cache_hit = Some(cache_hit);
        self
    }

    /// Records the value written by a store or update operation.
    #[must_use]
    pub fn with_write_value(mut self, value: Value) -> Self {
        self.write_value = Some(value);
        self
    }

    /// Attaches free-form metadata about the interaction.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the operation kind.
    #[must_use]
    pub fn operation(&self) -> ContextOperation {
        self.operation
    }

    /// Returns the source type label.
    #[must_use]
    pub fn source_type(&self) -> &str {
        &self.source_type
    }

    /// Returns the source name.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Returns the query, when present.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the retrieved-item count, when present.
    #[must_use]
    pub fn retrieved_count(&self) -> Option<u64> {
        self.retrieved_count
    }

    /// Returns the retrieved items, when present.
    #[must_use]
    pub fn retrieved_items(&self) -> Option<&Value> {
        self.retrieved_items.as_ref()
    }

    /// Returns the provenance label, when present.
    #[must_use]
    pub fn provenance(&self) -> Option<&str> {
        self.provenance.as_deref()
    }

    /// Returns the cache-hit flag, when present.
    #[must_use]
    pub fn cache_hit(&self) -> Option<bool> {
        self.cache_hit
    }

    /// Returns the written value, when present.
    #[must_use]
    pub fn write_value(&self) -> Option<&Value> {
        self.write_value.as_ref()
    }

    /// Returns attached metadata, when present.
    #[must_use]
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }
}

/// Surface-specific payload carried by an event envelope.
///
/// Serialized untagged: the envelope's `surface` field already names the
/// variant, so payload objects stay flat in the JSONL output.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// Method lifecycle payload.
    Operational(OperationalPayload),
    /// Reasoning payload.
    Cognitive(CognitivePayload),
    /// External-interaction payload.
    Contextual(ContextualPayload),
}

impl From<OperationalPayload> for Payload {
    fn from(value: OperationalPayload) -> Self {
        Self::Operational(value)
    }
}

impl From<CognitivePayload> for Payload {
    fn from(value: CognitivePayload) -> Self {
        Self::Cognitive(value)
    }
}

impl From<ContextualPayload> for Payload {
    fn from(value: ContextualPayload) -> Self {
        Self::Contextual(value)
    }
}
