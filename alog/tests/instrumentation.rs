//! End-to-end scenarios through the facade.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Value, json};
use uuid::Uuid;

use alog::sinks::{OtlpSpanSink, RecordingExporter};
use alog::{
    Config, ContextOperation, ContextualPayload, EventRouter, Instrumentable, InstrumentedAgent,
    Level, MethodBinding, MethodError, MethodSelection, OperationalStatus, Payload, Surface,
};

struct Assistant;

impl Instrumentable for Assistant {
    fn agent_methods(&self) -> Vec<MethodBinding> {
        vec![
            MethodBinding::new("run", |input: Value| async move {
                let task = input.as_str().unwrap_or_default().to_owned();
                Ok(Value::String(format!("Done: {task}")))
            }),
            MethodBinding::new("think", |_: Value| async move {
                Ok(Value::String(
                    "Answer ===REASONING_TRACE_START===check the cache first===REASONING_TRACE_END==="
                        .to_owned(),
                ))
            }),
            MethodBinding::new("fail", |_: Value| async move {
                Err::<Value, _>(MethodError::new("Unavailable", "backend offline"))
            }),
        ]
    }
}

fn temp_dir() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("alog-e2e-{}", Uuid::new_v4()));
    path
}

fn test_config(dir: &PathBuf) -> Config {
    Config::builder().output_dir(dir).console_echo(false).build()
}

#[tokio::test]
async fn run_records_start_and_complete() {
    let dir = temp_dir();
    let engine = alog::init(test_config(&dir)).await.unwrap();
    let agent = engine.instrument(&Assistant, "assistant");

    let result = agent.call("run", json!("X")).await.unwrap();
    assert_eq!(result, json!("Done: X"));

    let events = engine.router().read(Surface::Operational).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].trace_id(), events[1].trace_id());
    assert_eq!(events[0].span_id(), events[1].span_id());

    let statuses: Vec<OperationalStatus> = events
        .iter()
        .map(|event| match event.payload() {
            Payload::Operational(op) => {
                assert_eq!(op.method(), "run");
                op.status()
            }
            other => panic!("unexpected payload: {other:?}"),
        })
        .collect();
    assert_eq!(
        statuses,
        [OperationalStatus::Start, OperationalStatus::Complete]
    );

    let Payload::Operational(complete) = events[1].payload() else {
        unreachable!();
    };
    assert!(complete.duration_sec().unwrap() >= 0.0);
    assert_eq!(complete.result_summary(), Some("Done: X"));
    assert!(events[0].timestamp() <= events[1].timestamp());

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_tasks_keep_traces_isolated() {
    let dir = temp_dir();
    let engine = alog::init(test_config(&dir)).await.unwrap();
    let agent = Arc::new(engine.instrument(&Assistant, "assistant"));

    let mut handles = Vec::new();
    for _ in 0..2 {
        let agent = agent.clone();
        handles.push(tokio::spawn(alog::root_scope(async move {
            for _ in 0..100 {
                agent.call("run", json!("X")).await.unwrap();
            }
        })));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let events = engine.router().read(Surface::Operational).await.unwrap();
    assert_eq!(events.len(), 400);

    let traces: HashSet<String> = events
        .iter()
        .map(|event| event.trace_id().to_string())
        .collect();
    assert_eq!(traces.len(), 2);

    // Within each trace, read-back order is append order and timestamps
    // never go backwards.
    let mut latest = std::collections::HashMap::new();
    for event in &events {
        if let Some(previous) = latest.insert(event.trace_id(), event.timestamp()) {
            assert!(previous <= event.timestamp());
        }
    }

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn min_level_suppresses_all_output() {
    let dir = temp_dir();
    let config = Config::builder()
        .output_dir(&dir)
        .min_level(Level::Critical)
        .console_echo(false)
        .build();
    let engine = alog::init(config).await.unwrap();
    let agent = engine.instrument(&Assistant, "assistant");

    agent.call("run", json!("X")).await.unwrap();
    agent.call("fail", json!(null)).await.unwrap_err();

    assert_eq!(engine.stats().await.unwrap().total(), 0);

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn exported_spans_mirror_the_jsonl_trace() {
    let dir = temp_dir();
    let exporter = Arc::new(RecordingExporter::new());
    let router = Arc::new(
        EventRouter::new(&test_config(&dir))
            .await
            .unwrap()
            .with_exporter(OtlpSpanSink::new(exporter.clone())),
    );
    let agent =
        InstrumentedAgent::wrap(router.clone(), &Assistant, "assistant", &MethodSelection::AllPublic);

    let result = agent.call("think", json!(null)).await.unwrap();
    assert_eq!(result, json!("Answer"));

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    let spans = exporter.spans();
    assert_eq!(spans.len(), 2);

    let thought = spans.iter().find(|span| span.name() == "thought").unwrap();
    let call = spans.iter().find(|span| span.name() == "think").unwrap();
    assert_eq!(thought.trace_id(), call.trace_id());
    assert_eq!(thought.parent_span_id(), Some(call.span_id()));

    let events = router.read(Surface::Cognitive).await.unwrap();
    assert_eq!(events.len(), 1);

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn contextual_events_export_as_child_spans() {
    struct Fetcher {
        router: Arc<EventRouter>,
    }

    impl Instrumentable for Fetcher {
        fn agent_methods(&self) -> Vec<MethodBinding> {
            let router = self.router.clone();
            vec![MethodBinding::new("fetch", move |_: Value| {
                let router = router.clone();
                async move {
                    let payload =
                        ContextualPayload::new(ContextOperation::Retrieve, "vector_db", "docs")
                            .with_retrieved_count(1);
                    router
                        .record_contextual("assistant", payload, Level::Info)
                        .await;
                    Ok(json!("ok"))
                }
            })]
        }
    }

    let dir = temp_dir();
    let exporter = Arc::new(RecordingExporter::new());
    let router = Arc::new(
        EventRouter::new(&test_config(&dir))
            .await
            .unwrap()
            .with_exporter(OtlpSpanSink::new(exporter.clone())),
    );
    let fetcher = Fetcher {
        router: router.clone(),
    };
    let agent =
        InstrumentedAgent::wrap(router.clone(), &fetcher, "assistant", &MethodSelection::AllPublic);

    agent.call("fetch", json!(null)).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    let spans = exporter.spans();
    let call = spans.iter().find(|span| span.name() == "fetch").unwrap();
    let ctx = spans
        .iter()
        .find(|span| span.name() == "context.retrieve")
        .unwrap();
    assert_eq!(ctx.trace_id(), call.trace_id());
    assert_ne!(ctx.span_id(), call.span_id());
    assert_eq!(ctx.parent_span_id(), Some(call.span_id()));

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn disabling_auto_instrument_wraps_nothing() {
    let dir = temp_dir();
    let config = Config::builder()
        .output_dir(&dir)
        .auto_instrument(false)
        .console_echo(false)
        .build();
    let engine = alog::init(config).await.unwrap();

    let bare = engine.instrument(&Assistant, "assistant");
    assert!(bare.method_names().is_empty());
    let err = bare.call("run", json!("X")).await.unwrap_err();
    assert_eq!(err.kind(), "UnknownMethod");

    let chosen = engine.instrument_methods(&Assistant, "assistant", vec!["run".to_owned()]);
    assert_eq!(chosen.method_names(), ["run"]);
    chosen.call("run", json!("X")).await.unwrap();

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn global_handle_installs_and_resets() {
    let dir = temp_dir();
    let engine = alog::init(test_config(&dir)).await.unwrap();

    assert!(alog::current().is_none());
    alog::install(engine);
    let shared = alog::current().unwrap();
    shared
        .instrument(&Assistant, "assistant")
        .call("run", json!("X"))
        .await
        .unwrap();
    alog::reset();
    assert!(alog::current().is_none());

    let _ = std::fs::remove_dir_all(dir);
}
