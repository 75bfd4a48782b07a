use super::attachment::Attachment;

/// Terminal classification of one file's journey through ingestion.
///
/// Ephemeral: outcomes drive user-facing messaging only and are never stored
/// in the attachment set.
#[derive(Debug, Clone)]
pub enum IngestResult {
    /// Probed, uploaded, and appended to the set.
    Accepted(Attachment),
    /// Declared media category was neither image nor video (or the file
    /// could not be decoded at all).
    RejectedType,
    /// Video duration exceeded the ceiling.
    RejectedDuration {
        duration_secs: f64,
        max_secs: f64,
    },
    /// Upload service call failed; no attachment was created.
    UploadFailed { reason: String },
    /// The whole batch would have exceeded the attachment ceiling; nothing
    /// in it was probed or uploaded.
    CapacityExceeded { requested: usize, remaining: usize },
}

/// Per-file outcome entry for one `ingest` call, in input order.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub file_name: String,
    pub result: IngestResult,
}

impl FileOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self.result, IngestResult::Accepted(_))
    }

    /// Actionable, user-facing message for this outcome.
    pub fn message(&self) -> String {
        match &self.result {
            IngestResult::Accepted(_) => format!("\"{}\" added", self.file_name),
            IngestResult::RejectedType => {
                format!("\"{}\" is not an image or video", self.file_name)
            }
            IngestResult::RejectedDuration {
                duration_secs,
                max_secs,
            } => format!(
                "Video \"{}\" is {:.1}s long; videos must be {:.0} seconds or less",
                self.file_name, duration_secs, max_secs
            ),
            IngestResult::UploadFailed { reason } => {
                format!("Upload of \"{}\" failed: {}", self.file_name, reason)
            }
            IngestResult::CapacityExceeded {
                requested,
                remaining,
            } => format!(
                "\"{}\" not added: you selected {} files but can only add {} more",
                self.file_name, requested, remaining
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_message_names_the_remaining_budget() {
        let outcome = FileOutcome {
            file_name: "d.jpg".to_string(),
            result: IngestResult::CapacityExceeded {
                requested: 2,
                remaining: 1,
            },
        };
        assert!(!outcome.is_accepted());
        let msg = outcome.message();
        assert!(msg.contains("2 files"));
        assert!(msg.contains("1 more"));
    }

    #[test]
    fn duration_message_names_both_durations() {
        let outcome = FileOutcome {
            file_name: "clip.mp4".to_string(),
            result: IngestResult::RejectedDuration {
                duration_secs: 45.2,
                max_secs: 30.0,
            },
        };
        let msg = outcome.message();
        assert!(msg.contains("45.2"));
        assert!(msg.contains("30 seconds"));
    }
}
