//! Candidate file type fed into the pipeline.

use anyhow::{Context, Result};
use bytes::Bytes;
use std::path::Path;

/// A file handed to `ingest` by an entry point, before any validation.
///
/// The pipeline does not care which entry point supplied it; both the file
/// picker and the drop zone produce the same shape.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub file_name: String,
    /// Declared MIME type, e.g. `image/jpeg` or `video/mp4`.
    pub content_type: String,
    pub data: Bytes,
}

impl CandidateFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Read a candidate from disk, deriving the MIME type from the file
    /// extension. Used by CLI-style entry points where no browser supplies
    /// a declared type.
    pub async fn from_path(path: &Path) -> Result<Self> {
        if path
            .components()
            .any(|c| c == std::path::Component::ParentDir)
        {
            anyhow::bail!("Invalid input: {}", path.display());
        }
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        let content_type = guess_content_type(&file_name).to_string();
        Ok(Self::new(file_name, content_type, data))
    }

    /// Declared media category: the part before the `/` in the MIME type.
    pub fn media_category(&self) -> &str {
        self.content_type.split('/').next().unwrap_or("")
    }
}

/// Map common extensions to MIME types. Unknown extensions map to
/// `application/octet-stream` and get type-rejected downstream.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        // Videos
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "m4v" => "video/x-m4v",
        _ => "application/octet-stream",
    }
}
