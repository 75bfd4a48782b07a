//! Test doubles for the ingestion pipeline: an in-memory upload service with
//! call recording, a scripted duration probe, and a recording session sink.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tastecraft_core::{SessionEvent, SessionSink};
use tastecraft_ingest::{CandidateFile, DurationProbe};
use tastecraft_storage::{MediaStore, StorageError, StorageResult};

/// In-memory upload service double. Records every call, can be scripted to
/// fail or delay specific file names.
#[derive(Default)]
pub struct MockStore {
    calls: Mutex<Vec<String>>,
    fail: Mutex<Vec<String>>,
    delays_ms: Mutex<HashMap<String, u64>>,
}

impl MockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_for(&self, file_name: &str) -> &Self {
        self.fail.lock().unwrap().push(file_name.to_string());
        self
    }

    pub fn delay_ms(&self, file_name: &str, millis: u64) -> &Self {
        self.delays_ms
            .lock()
            .unwrap()
            .insert(file_name.to_string(), millis);
        self
    }

    /// File names uploaded, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaStore for MockStore {
    async fn upload(
        &self,
        file_name: &str,
        _content_type: &str,
        _data: Bytes,
        bucket: &str,
    ) -> StorageResult<String> {
        self.calls.lock().unwrap().push(file_name.to_string());

        let delay = self.delays_ms.lock().unwrap().get(file_name).copied();
        if let Some(millis) = delay {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }

        if self.fail.lock().unwrap().iter().any(|f| f == file_name) {
            return Err(StorageError::UploadFailed(format!(
                "storage write failed for {}",
                file_name
            )));
        }
        Ok(format!("https://cdn.example.com/{}/{}", bucket, file_name))
    }
}

/// Duration probe scripted per file name; unknown files fail to decode.
#[derive(Default)]
pub struct ScriptedDurations {
    durations: HashMap<String, f64>,
}

impl ScriptedDurations {
    pub fn new(entries: &[(&str, f64)]) -> Arc<Self> {
        Arc::new(Self {
            durations: entries
                .iter()
                .map(|(name, secs)| (name.to_string(), *secs))
                .collect(),
        })
    }
}

#[async_trait]
impl DurationProbe for ScriptedDurations {
    async fn duration_secs(&self, file: &CandidateFile) -> anyhow::Result<f64> {
        self.durations
            .get(&file.file_name)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no decodable stream in {}", file.file_name))
    }
}

/// Sink that records every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl SessionSink for RecordingSink {
    fn emit(&self, event: SessionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn image(name: &str) -> CandidateFile {
    CandidateFile::new(name, "image/jpeg", vec![0xffu8, 0xd8])
}

pub fn video(name: &str) -> CandidateFile {
    CandidateFile::new(name, "video/mp4", vec![0u8; 16])
}
