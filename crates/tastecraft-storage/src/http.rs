//! HTTP upload backend
//!
//! Posts file blobs as multipart form data to `{base_url}/upload/{bucket}`
//! and reads the durable URL out of the JSON response.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::traits::{MediaStore, StorageError, StorageResult};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// `MediaStore` backed by the storage HTTP API.
#[derive(Clone, Debug)]
pub struct HttpMediaStore {
    client: Client,
    base_url: String,
}

impl HttpMediaStore {
    pub fn new(base_url: String) -> StorageResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create the store from `TASTECRAFT_STORAGE_URL`.
    pub fn from_env() -> StorageResult<Self> {
        let base_url = std::env::var("TASTECRAFT_STORAGE_URL").map_err(|_| {
            StorageError::ConfigError("TASTECRAFT_STORAGE_URL is not set".to_string())
        })?;
        Self::new(base_url)
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        data: Bytes,
        bucket: &str,
    ) -> StorageResult<String> {
        let part = reqwest::multipart::Part::stream(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/upload/{}", self.base_url, bucket);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(StorageError::UploadFailed(format!(
                "storage API returned {}: {}",
                status, body
            )));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        tracing::debug!(file_name = %file_name, bucket = %bucket, "File uploaded");
        Ok(parsed.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let store = HttpMediaStore::new("https://storage.example.com/".to_string()).unwrap();
        assert_eq!(store.base_url, "https://storage.example.com");
    }
}
