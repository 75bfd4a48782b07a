//! Storage abstraction trait
//!
//! All upload backends must implement [`MediaStore`]. The ingestion pipeline
//! works against this trait without coupling to transport details.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Upload timed out after {0} seconds")]
    TimedOut(u64),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Upload service boundary.
///
/// One call, at-most-once: any rejection or fault from the backing service
/// surfaces as a [`StorageError`]; no retry happens at this layer.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload a raw file blob into a logical bucket and return its durable
    /// content URL.
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        data: Bytes,
        bucket: &str,
    ) -> StorageResult<String>;
}
