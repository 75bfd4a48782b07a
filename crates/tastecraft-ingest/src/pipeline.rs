//! Ingestion controller
//!
//! Orchestrates one batch-add request: capacity snapshot, concurrent
//! classification, concurrent upload of survivors, and in-order
//! reconciliation into the attachment set. A single-slot admission guard
//! rejects a second batch while one is still in flight; callers are expected
//! to disable the entry points until the batch settles.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use tastecraft_core::{
    Attachment, AttachmentSet, FileOutcome, IngestConfig, IngestResult, MediaKind, SessionEvent,
    SessionSink,
};
use tastecraft_storage::MediaStore;

use crate::coordinator::UploadCoordinator;
use crate::probe::{Classification, DurationProbe, MediaProbe};
use crate::types::CandidateFile;

/// Errors that abort an `ingest` call before any per-file work.
///
/// Per-file problems (bad type, long video, failed upload) are never errors;
/// they are recovered into [`FileOutcome`] entries.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// A previous batch has not settled yet.
    #[error("another batch is still in flight")]
    BatchInFlight,

    /// Invariant violation that should be impossible after the capacity
    /// pre-check; a programming error, not a user-recoverable outcome.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result of one `ingest` call: the updated set and one outcome per input
/// file, in input order.
#[derive(Debug)]
pub struct IngestReport {
    pub set: AttachmentSet,
    pub outcomes: Vec<FileOutcome>,
}

impl IngestReport {
    pub fn accepted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_accepted()).count()
    }
}

/// Orchestrator for batch-add requests from both entry points.
pub struct IngestionController {
    probe: MediaProbe,
    coordinator: UploadCoordinator,
    sink: Arc<dyn SessionSink>,
    guard: Semaphore,
    max_video_duration_secs: f64,
}

impl IngestionController {
    pub fn new(
        config: &IngestConfig,
        store: Arc<dyn MediaStore>,
        durations: Arc<dyn DurationProbe>,
        sink: Arc<dyn SessionSink>,
    ) -> Self {
        Self {
            probe: MediaProbe::new(config.max_video_duration_secs, durations),
            coordinator: UploadCoordinator::new(
                store,
                config.upload_bucket.clone(),
                config.upload_timeout_secs.map(Duration::from_secs),
            ),
            sink,
            guard: Semaphore::new(1),
            max_video_duration_secs: config.max_video_duration_secs,
        }
    }

    /// Run one batch through the pipeline.
    ///
    /// The capacity snapshot happens before any asynchronous work; if the
    /// batch does not fit, every file gets a capacity outcome and nothing is
    /// probed or uploaded. Otherwise probing gates uploading, both phases run
    /// concurrently across the batch, and the emitted outcomes preserve
    /// input order regardless of completion order.
    pub async fn ingest(
        &self,
        current: &AttachmentSet,
        files: Vec<CandidateFile>,
    ) -> Result<IngestReport, IngestError> {
        let _permit = self
            .guard
            .try_acquire()
            .map_err(|_| IngestError::BatchInFlight)?;

        let mut set = current.clone();
        let allowed = set.remaining();
        tracing::info!(batch_size = files.len(), allowed, "Ingesting batch");

        if files.len() > allowed {
            tracing::warn!(
                batch_size = files.len(),
                allowed,
                "Batch rejected: would exceed attachment ceiling"
            );
            let outcomes = files
                .iter()
                .map(|f| FileOutcome {
                    file_name: f.file_name.clone(),
                    result: IngestResult::CapacityExceeded {
                        requested: files.len(),
                        remaining: allowed,
                    },
                })
                .collect::<Vec<_>>();
            self.sink.emit(SessionEvent::BatchSettled {
                accepted: 0,
                rejected: outcomes.len(),
                failed: 0,
            });
            return Ok(IngestReport { set, outcomes });
        }

        // Classify the whole batch concurrently.
        let classifications = join_all(files.iter().map(|f| self.probe.classify(f))).await;

        let mut results: Vec<Option<IngestResult>> = vec![None; files.len()];
        let mut survivors: Vec<(usize, MediaKind)> = Vec::new();
        for (index, classification) in classifications.iter().enumerate() {
            match classification {
                Classification::ImageAccepted => survivors.push((index, MediaKind::Image)),
                Classification::VideoAccepted { .. } => survivors.push((index, MediaKind::Video)),
                Classification::VideoRejectedDuration { duration_secs } => {
                    results[index] = Some(IngestResult::RejectedDuration {
                        duration_secs: *duration_secs,
                        max_secs: self.max_video_duration_secs,
                    })
                }
                Classification::TypeRejected => {
                    results[index] = Some(IngestResult::RejectedType)
                }
            }
        }

        // Upload the survivors concurrently; results come back in dispatch
        // index order, so appends below follow input order.
        let indexed: Vec<(usize, &CandidateFile)> = survivors
            .iter()
            .map(|(index, _)| (*index, &files[*index]))
            .collect();
        let uploaded = self.coordinator.upload_batch(indexed).await;

        for ((index, result), (_, kind)) in uploaded.into_iter().zip(survivors) {
            match result {
                Ok(url) => {
                    let attachment =
                        Attachment::new(url, kind, files[index].file_name.clone());
                    set.append(attachment.clone())
                        .map_err(|e| IngestError::Internal(e.to_string()))?;
                    results[index] = Some(IngestResult::Accepted(attachment));
                }
                Err(error) => {
                    tracing::warn!(
                        file_name = %files[index].file_name,
                        error = %error,
                        "Upload failed"
                    );
                    results[index] = Some(IngestResult::UploadFailed {
                        reason: error.to_string(),
                    });
                }
            }
        }

        let mut outcomes = Vec::with_capacity(files.len());
        for (file, result) in files.iter().zip(results) {
            let result = result.ok_or_else(|| {
                IngestError::Internal(format!("no outcome for file {}", file.file_name))
            })?;
            outcomes.push(FileOutcome {
                file_name: file.file_name.clone(),
                result,
            });
        }

        let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
        let failed = outcomes
            .iter()
            .filter(|o| matches!(o.result, IngestResult::UploadFailed { .. }))
            .count();
        let rejected = outcomes.len() - accepted - failed;
        tracing::info!(accepted, rejected, failed, "Batch settled");
        self.sink.emit(SessionEvent::BatchSettled {
            accepted,
            rejected,
            failed,
        });

        Ok(IngestReport { set, outcomes })
    }
}
