//! Media probe - classification and video duration validation
//!
//! Classifies each candidate by its declared media category and, for videos,
//! probes the container for its duration before the file is allowed anywhere
//! near the upload service. Probing decodes only metadata; the decode handle
//! (a temp file handed to ffprobe) is released on every exit path.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::process::Command;

use crate::types::CandidateFile;

/// Outcome of classifying one candidate file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    ImageAccepted,
    VideoAccepted { duration_secs: f64 },
    VideoRejectedDuration { duration_secs: f64 },
    TypeRejected,
}

/// Source of decoded video durations.
///
/// Behind a trait so tests can classify without a media toolchain on the
/// host. Production uses [`FfprobeDurationProbe`].
#[async_trait]
pub trait DurationProbe: Send + Sync {
    /// Decode enough of the file to read its duration in seconds.
    async fn duration_secs(&self, file: &CandidateFile) -> Result<f64>;
}

/// Duration probe that shells out to ffprobe over a scoped temp file.
pub struct FfprobeDurationProbe {
    ffprobe_path: String,
}

impl FfprobeDurationProbe {
    pub fn new(ffprobe_path: String) -> Self {
        Self { ffprobe_path }
    }
}

#[async_trait]
impl DurationProbe for FfprobeDurationProbe {
    async fn duration_secs(&self, file: &CandidateFile) -> Result<f64> {
        // NamedTempFile is removed on drop, on success and error paths alike.
        let temp_file = tempfile::NamedTempFile::new().context("Failed to create temp file")?;
        tokio::fs::write(temp_file.path(), &file.data)
            .await
            .context("Failed to stage video for probing")?;

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(temp_file.path())
            .output()
            .await
            .context("Failed to execute ffprobe")?;

        if !output.status.success() {
            return Err(anyhow!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&output.stderr)
            ));
        }

        parse_ffprobe_duration(&output.stdout)
    }
}

/// Parse the `format.duration` field out of ffprobe's JSON output.
fn parse_ffprobe_duration(stdout: &[u8]) -> Result<f64> {
    let probe_data: serde_json::Value =
        serde_json::from_slice(stdout).context("Failed to parse ffprobe output")?;

    probe_data["format"]["duration"]
        .as_str()
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| anyhow!("Could not parse duration"))
}

/// Classifies candidate files by type and, for video, by probed duration.
///
/// Pure and stateless beyond its configuration; never touches the
/// attachment set.
pub struct MediaProbe {
    max_video_duration_secs: f64,
    durations: Arc<dyn DurationProbe>,
}

impl MediaProbe {
    pub fn new(max_video_duration_secs: f64, durations: Arc<dyn DurationProbe>) -> Self {
        Self {
            max_video_duration_secs,
            durations,
        }
    }

    /// Classify one candidate.
    ///
    /// The declared category must be exactly `image` or `video`; anything
    /// else is type-rejected with no further work. Videos suspend on the
    /// duration probe; a probe failure classifies as type-rejected rather
    /// than propagating.
    pub async fn classify(&self, file: &CandidateFile) -> Classification {
        match file.media_category() {
            "image" => Classification::ImageAccepted,
            "video" => match self.durations.duration_secs(file).await {
                Ok(duration_secs) if duration_secs <= self.max_video_duration_secs => {
                    Classification::VideoAccepted { duration_secs }
                }
                Ok(duration_secs) => {
                    tracing::debug!(
                        file_name = %file.file_name,
                        duration_secs,
                        max_secs = self.max_video_duration_secs,
                        "Video rejected: over duration ceiling"
                    );
                    Classification::VideoRejectedDuration { duration_secs }
                }
                Err(error) => {
                    tracing::warn!(
                        file_name = %file.file_name,
                        error = %error,
                        "Video probe failed; rejecting file"
                    );
                    Classification::TypeRejected
                }
            },
            _ => Classification::TypeRejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDuration(f64);

    #[async_trait]
    impl DurationProbe for FixedDuration {
        async fn duration_secs(&self, _file: &CandidateFile) -> Result<f64> {
            Ok(self.0)
        }
    }

    struct FailingProbe;

    #[async_trait]
    impl DurationProbe for FailingProbe {
        async fn duration_secs(&self, _file: &CandidateFile) -> Result<f64> {
            Err(anyhow!("truncated container"))
        }
    }

    fn probe(durations: Arc<dyn DurationProbe>) -> MediaProbe {
        MediaProbe::new(30.0, durations)
    }

    #[tokio::test]
    async fn images_accepted_without_probing() {
        let p = probe(Arc::new(FailingProbe));
        let file = CandidateFile::new("a.jpg", "image/jpeg", vec![1u8]);
        assert_eq!(p.classify(&file).await, Classification::ImageAccepted);
    }

    #[tokio::test]
    async fn short_video_accepted() {
        let p = probe(Arc::new(FixedDuration(12.5)));
        let file = CandidateFile::new("a.mp4", "video/mp4", vec![1u8]);
        assert_eq!(
            p.classify(&file).await,
            Classification::VideoAccepted { duration_secs: 12.5 }
        );
    }

    #[tokio::test]
    async fn long_video_rejected() {
        let p = probe(Arc::new(FixedDuration(45.0)));
        let file = CandidateFile::new("a.mp4", "video/mp4", vec![1u8]);
        assert_eq!(
            p.classify(&file).await,
            Classification::VideoRejectedDuration { duration_secs: 45.0 }
        );
    }

    #[tokio::test]
    async fn boundary_duration_is_accepted() {
        let p = probe(Arc::new(FixedDuration(30.0)));
        let file = CandidateFile::new("a.mp4", "video/mp4", vec![1u8]);
        assert_eq!(
            p.classify(&file).await,
            Classification::VideoAccepted { duration_secs: 30.0 }
        );
    }

    #[tokio::test]
    async fn non_media_type_rejected() {
        let p = probe(Arc::new(FixedDuration(1.0)));
        let file = CandidateFile::new("a.pdf", "application/pdf", vec![1u8]);
        assert_eq!(p.classify(&file).await, Classification::TypeRejected);
    }

    #[tokio::test]
    async fn probe_failure_treated_as_type_rejection() {
        let p = probe(Arc::new(FailingProbe));
        let file = CandidateFile::new("a.mp4", "video/mp4", vec![1u8]);
        assert_eq!(p.classify(&file).await, Classification::TypeRejected);
    }

    #[test]
    fn parses_duration_from_ffprobe_json() {
        let json = br#"{"format":{"filename":"x.mp4","duration":"42.750000"}}"#;
        let duration = parse_ffprobe_duration(json).unwrap();
        assert!((duration - 42.75).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_duration_is_an_error() {
        let json = br#"{"format":{"filename":"x.mp4"}}"#;
        assert!(parse_ffprobe_duration(json).is_err());
    }
}
