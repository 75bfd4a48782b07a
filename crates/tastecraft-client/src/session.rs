//! Submission session
//!
//! Owns the active attachment set and form text for one open submission
//! dialog. Both entry points (file picker, drop zone) funnel into
//! `add_files`; the set is discarded when the session ends, by successful
//! submission or cancel.

use std::sync::{Arc, Mutex};
use uuid::Uuid;

use tastecraft_core::{
    Attachment, AttachmentSet, FileOutcome, IngestConfig, SessionEvent, SessionSink,
};
use tastecraft_ingest::{CandidateFile, DurationProbe, IngestError, IngestionController};
use tastecraft_storage::MediaStore;

use crate::api::SkillShareBackend;
use crate::submit::{SubmissionAssembler, SubmitError};

/// One active skill-share submission.
pub struct SubmissionSession {
    controller: IngestionController,
    assembler: SubmissionAssembler,
    set: AttachmentSet,
    text: String,
    author_id: String,
}

impl SubmissionSession {
    pub fn new(
        config: &IngestConfig,
        store: Arc<dyn MediaStore>,
        durations: Arc<dyn DurationProbe>,
        backend: Arc<dyn SkillShareBackend>,
        sink: Arc<dyn SessionSink>,
        author_id: String,
    ) -> Self {
        Self {
            controller: IngestionController::new(config, store, durations, sink.clone()),
            assembler: SubmissionAssembler::new(backend, sink),
            set: AttachmentSet::new(config.max_attachments),
            text: String::new(),
            author_id,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attachments in insertion order, for rendering.
    pub fn attachments(&self) -> &[Attachment] {
        self.set.items()
    }

    /// Ingest a batch of files from either entry point.
    pub async fn add_files(
        &mut self,
        files: Vec<CandidateFile>,
    ) -> Result<Vec<FileOutcome>, IngestError> {
        let report = self.controller.ingest(&self.set, files).await?;
        self.set = report.set;
        Ok(report.outcomes)
    }

    /// Remove a single attachment before submission. Idempotent.
    pub fn remove_attachment(&mut self, id: Uuid) {
        self.set.remove(id);
    }

    /// Submit the current text and attachment set. On success the session
    /// resets; on failure everything stays in place for a retry.
    pub async fn submit(&mut self) -> Result<Uuid, SubmitError> {
        let id = self
            .assembler
            .submit(&self.text, &self.set, &self.author_id)
            .await?;
        self.set.clear();
        self.text.clear();
        Ok(id)
    }

    /// Abandon the session: the in-progress attachment set is discarded.
    pub fn cancel(&mut self) {
        self.set.clear();
        self.text.clear();
    }
}

/// View-facing session state, updated only through emitted events.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    pub dialog_open: bool,
    pub needs_refresh: bool,
    pub last_message: Option<String>,
}

/// Caller-owned state holder consuming [`SessionEvent`]s.
///
/// This is the only place view state lives; the pipeline and assembler only
/// ever signal into it.
#[derive(Clone, Default)]
pub struct SharedSessionState {
    inner: Arc<Mutex<SessionState>>,
}

impl SharedSessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_dialog(&self) {
        self.inner.lock().unwrap().dialog_open = true;
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.lock().unwrap().clone()
    }

    /// Clear the refresh flag after the caller has re-fetched the list.
    pub fn mark_refreshed(&self) {
        self.inner.lock().unwrap().needs_refresh = false;
    }
}

impl SessionSink for SharedSessionState {
    fn emit(&self, event: SessionEvent) {
        let mut state = self.inner.lock().unwrap();
        match event {
            SessionEvent::BatchSettled {
                accepted,
                rejected,
                failed,
            } => {
                state.last_message = Some(format!(
                    "{} added, {} rejected, {} failed",
                    accepted, rejected, failed
                ));
            }
            SessionEvent::SubmissionSucceeded { .. } => {
                state.dialog_open = false;
                state.needs_refresh = true;
                state.last_message = Some("Skill share published".to_string());
            }
            SessionEvent::SubmissionFailed { reason } => {
                state.last_message = Some(format!("Submission failed: {}", reason));
            }
        }
    }
}
