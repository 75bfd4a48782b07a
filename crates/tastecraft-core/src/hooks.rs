//! Session event hooks
//!
//! The pipeline never touches view state directly. It emits `SessionEvent`s
//! at defined transition points (batch settled, submission succeeded or
//! failed) into a caller-owned sink; the surrounding view layer decides what
//! to do with them (close a dialog, refresh a list, show a message).

use uuid::Uuid;

/// Transition-point signals emitted by the ingestion and submission flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// One `ingest` batch fully reconciled.
    BatchSettled {
        accepted: usize,
        rejected: usize,
        failed: usize,
    },
    /// Skill-share submission persisted; the form should clear, the dialog
    /// close, and the downstream list refresh.
    SubmissionSucceeded { skill_share_id: Uuid },
    /// Skill-share submission failed; local state is preserved for retry.
    SubmissionFailed { reason: String },
}

/// Caller-owned consumer of session events.
pub trait SessionSink: Send + Sync {
    fn emit(&self, event: SessionEvent);
}

/// No-op sink for callers that do not track session state.
pub struct NoOpSessionSink;

impl SessionSink for NoOpSessionSink {
    fn emit(&self, _event: SessionEvent) {}
}
