//! Append-only JSONL file sink.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

use alog_events::Event;

use crate::{EventSink, SinkResult};

/// File-backed sink writing one JSON event per line.
///
/// Appends are serialized through an internal lock, so concurrent calls
/// never interleave partial lines.
pub struct JsonlSink {
    path: PathBuf,
    file: Mutex<tokio::fs::File>,
}

impl JsonlSink {
    /// Opens (or creates) the log file at the provided path.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors encountered while preparing the file or its
    /// parent directory.
    pub async fn open(path: impl Into<PathBuf>) -> SinkResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Returns the underlying path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads back every event currently in the file, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors and fails if any line is not a valid event.
    pub async fn read_all(&self) -> SinkResult<Vec<Event>> {
        let data = fs::read(&self.path).await?;
        let mut events = Vec::new();
        for chunk in data
            .split(|byte| *byte == b'\n')
            .filter(|chunk| !chunk.is_empty())
        {
            let event: Event = serde_json::from_slice(chunk)?;
            events.push(event);
        }
        Ok(events)
    }

    /// Truncates the log file.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors.
    pub async fn clear(&self) -> SinkResult<()> {
        let mut guard = self.file.lock().await;
        guard.rewind().await?;
        guard.set_len(0).await?;
        guard.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl EventSink for JsonlSink {
    async fn accept(&self, event: &Event) -> SinkResult<()> {
        let line = serde_json::to_vec(event)?;
        let mut guard = self.file.lock().await;
        guard.write_all(&line).await?;
        guard.write_u8(b'\n').await?;
        guard.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alog_events::{OperationalPayload, OperationalStatus};
    use alog_primitives::{SpanId, TraceId};
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("alog-sink-{}.jsonl", Uuid::new_v4()));
        path
    }

    fn sample_event(method: &str, status: OperationalStatus) -> Event {
        Event::builder(
            "assistant",
            TraceId::random(),
            SpanId::random(),
            OperationalPayload::new(method, status),
        )
        .build()
    }

    #[tokio::test]
    async fn append_and_read_back() {
        let path = temp_path();
        let sink = JsonlSink::open(&path).await.unwrap();

        sink.accept(&sample_event("run", OperationalStatus::Start))
            .await
            .unwrap();
        sink.accept(&sample_event("run", OperationalStatus::Complete))
            .await
            .unwrap();

        let events = sink.read_all().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].agent(), "assistant");

        sink.clear().await.unwrap();
        assert!(sink.read_all().await.unwrap().is_empty());

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn concurrent_appends_keep_lines_whole() {
        let path = temp_path();
        let sink = std::sync::Arc::new(JsonlSink::open(&path).await.unwrap());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let sink = sink.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..25 {
                    sink.accept(&sample_event("step", OperationalStatus::Complete))
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let events = sink.read_all().await.unwrap();
        assert_eq!(events.len(), 200);

        let _ = std::fs::remove_file(path);
    }
}
