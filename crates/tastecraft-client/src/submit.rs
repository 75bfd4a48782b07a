//! Submission assembler
//!
//! Reads the current attachment set plus the free-text fields, builds the
//! creation payload, and makes exactly one create call. Validation failures
//! are caught locally and the service is never contacted; persistence
//! failures leave the caller's set and text untouched so a retry does not
//! re-upload media that already succeeded.

use std::sync::Arc;
use uuid::Uuid;

use tastecraft_core::{AttachmentSet, SessionEvent, SessionSink, SkillSharePayload};

use crate::api::SkillShareBackend;

/// Submission failures. Neither variant mutates the attachment set.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Empty text or empty attachment set; the creation service was never
    /// contacted.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The creation service rejected or failed the call.
    #[error("skill share creation failed: {reason}")]
    Persistence { reason: String },
}

/// Builds and submits the skill-share creation payload.
pub struct SubmissionAssembler {
    backend: Arc<dyn SkillShareBackend>,
    sink: Arc<dyn SessionSink>,
}

impl SubmissionAssembler {
    pub fn new(backend: Arc<dyn SkillShareBackend>, sink: Arc<dyn SessionSink>) -> Self {
        Self { backend, sink }
    }

    /// Submit one skill share. The payload's url and kind arrays are
    /// parallel and follow the set's current order.
    pub async fn submit(
        &self,
        text: &str,
        set: &AttachmentSet,
        author_id: &str,
    ) -> Result<Uuid, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::Validation(
                "skill share text must not be blank".to_string(),
            ));
        }
        if set.is_empty() {
            return Err(SubmitError::Validation(
                "at least one media attachment is required".to_string(),
            ));
        }

        let payload = SkillSharePayload::from_set(text.to_string(), author_id.to_string(), set);
        tracing::info!(
            media_count = payload.media_urls.len(),
            "Submitting skill share"
        );

        match self.backend.create_skill_share(&payload).await {
            Ok(skill_share_id) => {
                self.sink
                    .emit(SessionEvent::SubmissionSucceeded { skill_share_id });
                Ok(skill_share_id)
            }
            Err(error) => {
                let reason = error.to_string();
                tracing::warn!(error = %reason, "Skill share creation failed");
                self.sink.emit(SessionEvent::SubmissionFailed {
                    reason: reason.clone(),
                });
                Err(SubmitError::Persistence { reason })
            }
        }
    }
}
