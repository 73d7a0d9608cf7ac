//! The instrumented agent wrapper.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde_json::{Value, json};

use alog_context::SpanFrame;
use alog_events::{
    CognitivePayload, Event, OperationalPayload, OperationalStatus, Payload, summarize_result,
};
use alog_primitives::Level;
use alog_router::{EventRouter, MethodSelection};

use crate::method::{AgentMethod, Instrumentable, MethodBinding, MethodError};

/// An agent whose method calls are recorded.
///
/// Wrapping is transparent: [`call`](InstrumentedAgent::call) returns
/// exactly what the underlying method returns, except that a reasoning
/// block embedded in string output is stripped before the caller sees it.
/// Errors pass through unchanged.
pub struct InstrumentedAgent {
    name: String,
    router: Arc<EventRouter>,
    methods: HashMap<String, Arc<dyn AgentMethod>>,
}

impl InstrumentedAgent {
    /// Wraps the target's methods under the given agent name.
    ///
    /// With [`MethodSelection::Named`], selected names the target does not
    /// expose are skipped with a warning. Wrapping an already-instrumented
    /// target reuses its underlying handlers, so repeated wrapping never
    /// stacks a second layer of events.
    #[must_use]
    pub fn wrap(
        router: Arc<EventRouter>,
        target: &dyn Instrumentable,
        name: impl Into<String>,
        selection: &MethodSelection,
    ) -> Self {
        let name = name.into();
        if target.already_instrumented() {
            tracing::debug!(agent = %name, "target already instrumented; rewrapping in place");
        }

        let available: HashMap<String, Arc<dyn AgentMethod>> = target
            .agent_methods()
            .into_iter()
            .map(|binding| (binding.name().to_owned(), binding.handler()))
            .collect();

        let methods = match selection {
            MethodSelection::AllPublic => available,
            MethodSelection::Named(names) => {
                let mut selected = HashMap::new();
                for method in names {
                    match available.get(method) {
                        Some(handler) => {
                            selected.insert(method.clone(), handler.clone());
                        }
                        None => {
                            tracing::warn!(
                                agent = %name,
                                method = %method,
                                "selected method not found; skipping"
                            );
                        }
                    }
                }
                selected
            }
        };

        Self {
            name,
            router,
            methods,
        }
    }

    /// Returns the agent name assigned at wrap time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the wrapped method names, sorted.
    #[must_use]
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Invokes a wrapped method, recording its lifecycle.
    ///
    /// The call runs inside a span frame: a fresh trace when no
    /// instrumented call is active on this task, a child span otherwise.
    ///
    /// # Errors
    ///
    /// Returns the method's own error unchanged, or
    /// [`MethodError::unknown_method`] for names that were not wrapped.
    pub async fn call(&self, method: &str, input: Value) -> Result<Value, MethodError> {
        let Some(handler) = self.methods.get(method).cloned() else {
            return Err(MethodError::unknown_method(method));
        };

        alog_context::with_frame(|frame| async move {
            let start_payload = OperationalPayload::new(method, OperationalStatus::Start)
                .with_metadata(json!({ "input_type": json_type_name(&input) }));
            self.emit(frame, start_payload, Level::Info).await;

            let started = Instant::now();
            match handler.invoke(input).await {
                Ok(value) => {
                    let duration = started.elapsed().as_secs_f64();
                    // The summary reflects the raw output, reasoning
                    // markers included.
                    let summary = summarize_result(&value);
                    let value = self.strip_reasoning(frame, method, value).await;

                    let complete = OperationalPayload::new(method, OperationalStatus::Complete)
                        .with_duration_sec(duration)
                        .with_result_summary(summary)
                        .with_metadata(json!({ "result_type": json_type_name(&value) }));
                    self.emit(frame, complete, Level::Info).await;
                    Ok(value)
                }
                Err(error) => {
                    let failed = OperationalPayload::new(method, OperationalStatus::Error)
                        .with_duration_sec(started.elapsed().as_secs_f64())
                        .with_error(error.kind(), error.message());
                    self.emit(frame, failed, Level::Error).await;
                    Err(error)
                }
            }
        })
        .await
    }

    async fn strip_reasoning(&self, frame: SpanFrame, method: &str, value: Value) -> Value {
        let Value::String(text) = &value else {
            return value;
        };
        let Some(extraction) = crate::extract_reasoning(text) else {
            return value;
        };
        let thought = CognitivePayload::new(extraction.reasoning(), format!("execute {method}"));
        self.emit(frame, thought, Level::Info).await;
        Value::String(extraction.clean_text().to_owned())
    }

    async fn emit(&self, frame: SpanFrame, payload: impl Into<Payload>, level: Level) {
        let mut builder =
            Event::builder(&self.name, frame.trace_id(), frame.span_id(), payload).level(level);
        if let Some(parent) = frame.parent_span_id() {
            builder = builder.parent_span_id(parent);
        }
        self.router.record(&builder.build()).await;
    }
}

impl Instrumentable for InstrumentedAgent {
    fn agent_methods(&self) -> Vec<MethodBinding> {
        self.methods
            .iter()
            .map(|(name, handler)| MethodBinding::new(name.clone(), handler.clone()))
            .collect()
    }

    fn already_instrumented(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for InstrumentedAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstrumentedAgent")
            .field("name", &self.name)
            .field("methods", &self.method_names())
            .finish_non_exhaustive()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use alog_primitives::Surface;
    use alog_router::Config;
    use uuid::Uuid;

    struct EchoAgent;

    impl Instrumentable for EchoAgent {
        fn agent_methods(&self) -> Vec<MethodBinding> {
            vec![
                MethodBinding::new("run", |input: Value| async move {
                    let task = input.as_str().unwrap_or_default().to_owned();
                    Ok(Value::String(format!("Done: {task}")))
                }),
                MethodBinding::new("think", |_: Value| async move {
                    Ok(Value::String(
                        "Hello ===REASONING_TRACE_START===plan X===REASONING_TRACE_END=== World"
                            .to_owned(),
                    ))
                }),
                MethodBinding::new("fail", |_: Value| async move {
                    Err::<Value, _>(MethodError::new("Timeout", "deadline exceeded"))
                }),
            ]
        }
    }

    fn temp_dir() -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("alog-instrument-{}", Uuid::new_v4()));
        path
    }

    async fn test_router(dir: &PathBuf) -> Arc<EventRouter> {
        let config = Config::builder().output_dir(dir).console_echo(false).build();
        Arc::new(EventRouter::new(&config).await.unwrap())
    }

    #[tokio::test]
    async fn calls_are_transparent() {
        let dir = temp_dir();
        let router = test_router(&dir).await;
        let agent =
            InstrumentedAgent::wrap(router.clone(), &EchoAgent, "echo", &MethodSelection::AllPublic);

        let result = agent.call("run", json!("X")).await.unwrap();
        assert_eq!(result, json!("Done: X"));

        let events = router.read(Surface::Operational).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].trace_id(), events[1].trace_id());
        assert_eq!(events[0].span_id(), events[1].span_id());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn reasoning_is_stripped_and_recorded() {
        let dir = temp_dir();
        let router = test_router(&dir).await;
        let agent =
            InstrumentedAgent::wrap(router.clone(), &EchoAgent, "echo", &MethodSelection::AllPublic);

        let result = agent.call("think", json!(null)).await.unwrap();
        assert_eq!(result, json!("Hello  World"));

        let thoughts = router.read(Surface::Cognitive).await.unwrap();
        assert_eq!(thoughts.len(), 1);
        match thoughts[0].payload() {
            Payload::Cognitive(cog) => {
                assert_eq!(cog.thought(), "plan X");
                assert_eq!(cog.goal(), "execute think");
            }
            other => panic!("unexpected payload: {other:?}"),
        }

        let operational = router.read(Surface::Operational).await.unwrap();
        let Payload::Operational(complete) = operational[1].payload() else {
            panic!("expected an operational payload");
        };
        // The summary keeps the raw output, markers included.
        assert!(
            complete
                .result_summary()
                .unwrap()
                .contains("===REASONING_TRACE_START===")
        );

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn errors_pass_through_unchanged() {
        let dir = temp_dir();
        let router = test_router(&dir).await;
        let agent =
            InstrumentedAgent::wrap(router.clone(), &EchoAgent, "echo", &MethodSelection::AllPublic);

        let err = agent.call("fail", json!(null)).await.unwrap_err();
        assert_eq!(err, MethodError::new("Timeout", "deadline exceeded"));

        let events = router.read(Surface::Operational).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].level(), Level::Error);
        let Payload::Operational(failed) = events[1].payload() else {
            panic!("expected an operational payload");
        };
        assert_eq!(failed.status(), OperationalStatus::Error);
        assert_eq!(failed.error_kind(), Some("Timeout"));
        assert_eq!(failed.error_message(), Some("deadline exceeded"));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn unknown_selected_methods_are_skipped() {
        let dir = temp_dir();
        let router = test_router(&dir).await;
        let selection =
            MethodSelection::Named(vec!["run".to_owned(), "teleport".to_owned()]);
        let agent = InstrumentedAgent::wrap(router.clone(), &EchoAgent, "echo", &selection);

        assert_eq!(agent.method_names(), ["run"]);
        let err = agent.call("teleport", json!(null)).await.unwrap_err();
        assert_eq!(err.kind(), "UnknownMethod");

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn rewrapping_does_not_stack_events() {
        let dir = temp_dir();
        let router = test_router(&dir).await;
        let inner =
            InstrumentedAgent::wrap(router.clone(), &EchoAgent, "echo", &MethodSelection::AllPublic);
        let outer =
            InstrumentedAgent::wrap(router.clone(), &inner, "echo", &MethodSelection::AllPublic);

        outer.call("run", json!("X")).await.unwrap();

        // One start and one complete, not two of each.
        let events = router.read(Surface::Operational).await.unwrap();
        assert_eq!(events.len(), 2);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn nested_calls_share_a_trace() {
        let dir = temp_dir();
        let router = test_router(&dir).await;
        let agent = Arc::new(InstrumentedAgent::wrap(
            router.clone(),
            &EchoAgent,
            "echo",
            &MethodSelection::AllPublic,
        ));

        let agent_ref = &agent;
        let router_ref = &router;
        alog_context::with_frame(|outer| async move {
            agent_ref.call("run", json!("X")).await.unwrap();
            let events = router_ref.read(Surface::Operational).await.unwrap();
            assert_eq!(events[0].trace_id(), outer.trace_id());
            assert_eq!(events[0].parent_span_id(), Some(outer.span_id()));
        })
        .await;

        let _ = std::fs::remove_dir_all(dir);
    }
}
