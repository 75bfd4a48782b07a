//! Upload coordinator
//!
//! Fans a batch of accepted files out to the upload service concurrently.
//! Batches are small (at most the attachment ceiling) but per-file latency
//! dominates, so uploads are issued together and settled together; one
//! failure never cancels or blocks its siblings.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

use tastecraft_storage::{MediaStore, StorageError, StorageResult};

use crate::types::CandidateFile;

/// Concurrent upload front for the [`MediaStore`] collaborator.
pub struct UploadCoordinator {
    store: Arc<dyn MediaStore>,
    bucket: String,
    upload_timeout: Option<Duration>,
}

impl UploadCoordinator {
    pub fn new(store: Arc<dyn MediaStore>, bucket: String, upload_timeout: Option<Duration>) -> Self {
        Self {
            store,
            bucket,
            upload_timeout,
        }
    }

    /// Upload one file, returning its durable URL. At-most-once: any fault
    /// from the service surfaces as an error, no retry.
    pub async fn upload_one(&self, file: &CandidateFile) -> StorageResult<String> {
        let upload = self.store.upload(
            &file.file_name,
            &file.content_type,
            file.data.clone(),
            &self.bucket,
        );
        match self.upload_timeout {
            Some(limit) => tokio::time::timeout(limit, upload)
                .await
                .map_err(|_| StorageError::TimedOut(limit.as_secs()))?,
            None => upload.await,
        }
    }

    /// Upload all files concurrently and wait for every one to settle.
    ///
    /// Each in-flight upload is paired with its dispatch index; results are
    /// reassembled by that index, so callers see input order regardless of
    /// which upload finishes first.
    pub async fn upload_batch<'a>(
        &self,
        files: Vec<(usize, &'a CandidateFile)>,
    ) -> Vec<(usize, StorageResult<String>)> {
        let uploads = files.into_iter().map(|(index, file)| async move {
            let result = self.upload_one(file).await;
            (index, result)
        });

        let mut settled = join_all(uploads).await;
        settled.sort_by_key(|(index, _)| *index);
        settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;

    /// Store that completes uploads in reverse submission order.
    struct ReversedStore;

    #[async_trait]
    impl MediaStore for ReversedStore {
        async fn upload(
            &self,
            file_name: &str,
            _content_type: &str,
            _data: Bytes,
            bucket: &str,
        ) -> StorageResult<String> {
            // Later files finish first.
            let delay = match file_name {
                "a.jpg" => 30,
                "b.jpg" => 15,
                _ => 1,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(format!("https://cdn.example.com/{}/{}", bucket, file_name))
        }
    }

    struct StalledStore;

    #[async_trait]
    impl MediaStore for StalledStore {
        async fn upload(
            &self,
            _file_name: &str,
            _content_type: &str,
            _data: Bytes,
            _bucket: &str,
        ) -> StorageResult<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
    }

    fn files() -> Vec<CandidateFile> {
        vec![
            CandidateFile::new("a.jpg", "image/jpeg", vec![1u8]),
            CandidateFile::new("b.jpg", "image/jpeg", vec![2u8]),
            CandidateFile::new("c.jpg", "image/jpeg", vec![3u8]),
        ]
    }

    #[tokio::test]
    async fn batch_results_follow_dispatch_order_not_completion_order() {
        let coordinator =
            UploadCoordinator::new(Arc::new(ReversedStore), "posts".to_string(), None);
        let files = files();
        let indexed: Vec<_> = files.iter().enumerate().collect();

        let results = coordinator.upload_batch(indexed).await;

        let urls: Vec<_> = results
            .into_iter()
            .map(|(i, r)| (i, r.unwrap()))
            .collect();
        assert_eq!(urls[0], (0, "https://cdn.example.com/posts/a.jpg".into()));
        assert_eq!(urls[1], (1, "https://cdn.example.com/posts/b.jpg".into()));
        assert_eq!(urls[2], (2, "https://cdn.example.com/posts/c.jpg".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_upload_times_out_when_configured() {
        let coordinator = UploadCoordinator::new(
            Arc::new(StalledStore),
            "posts".to_string(),
            Some(Duration::from_secs(5)),
        );
        let file = CandidateFile::new("a.jpg", "image/jpeg", vec![1u8]);

        let result = coordinator.upload_one(&file).await;
        assert!(matches!(result, Err(StorageError::TimedOut(5))));
    }
}
