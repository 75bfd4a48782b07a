//! Configuration module
//!
//! Ceilings and collaborator settings for the ingestion pipeline. Both
//! ceilings are fixed product constants by default but are read at
//! construction time so callers (and tests) can see and override them.

use std::env;

const DEFAULT_MAX_ATTACHMENTS: usize = 3;
const DEFAULT_MAX_VIDEO_DURATION_SECS: f64 = 30.0;
const DEFAULT_UPLOAD_BUCKET: &str = "posts";

/// Ingestion pipeline configuration.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    /// Maximum number of attachments on one skill-share submission.
    pub max_attachments: usize,
    /// Maximum accepted video duration in seconds.
    pub max_video_duration_secs: f64,
    /// Logical bucket name passed to the upload service.
    pub upload_bucket: String,
    /// Per-upload timeout. `None` waits indefinitely on a stalled upload.
    pub upload_timeout_secs: Option<u64>,
    /// Path to the ffprobe executable used for video duration probing.
    pub ffprobe_path: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_attachments: DEFAULT_MAX_ATTACHMENTS,
            max_video_duration_secs: DEFAULT_MAX_VIDEO_DURATION_SECS,
            upload_bucket: DEFAULT_UPLOAD_BUCKET.to_string(),
            upload_timeout_secs: None,
            ffprobe_path: "ffprobe".to_string(),
        }
    }
}

impl IngestConfig {
    /// Load configuration from environment variables, falling back to the
    /// product defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_attachments: env_parse("TASTECRAFT_MAX_ATTACHMENTS", defaults.max_attachments),
            max_video_duration_secs: env_parse(
                "TASTECRAFT_MAX_VIDEO_DURATION_SECS",
                defaults.max_video_duration_secs,
            ),
            upload_bucket: env::var("TASTECRAFT_UPLOAD_BUCKET")
                .unwrap_or(defaults.upload_bucket),
            upload_timeout_secs: env::var("TASTECRAFT_UPLOAD_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok()),
            ffprobe_path: env::var("TASTECRAFT_FFPROBE_PATH").unwrap_or(defaults.ffprobe_path),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_product_ceilings() {
        let config = IngestConfig::default();
        assert_eq!(config.max_attachments, 3);
        assert_eq!(config.max_video_duration_secs, 30.0);
        assert_eq!(config.upload_bucket, "posts");
        assert_eq!(config.upload_timeout_secs, None);
    }
}
