//! HTTP client for the skill-share API.
//!
//! The assembler only sees [`SkillShareBackend`]; this module provides the
//! reqwest-backed implementation with Bearer auth.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use tastecraft_core::{SkillShare, SkillSharePayload};

/// Skill-share creation and listing boundary.
#[async_trait]
pub trait SkillShareBackend: Send + Sync {
    /// Persist a new skill-share post and return its id.
    async fn create_skill_share(&self, payload: &SkillSharePayload) -> Result<Uuid>;

    /// Fetch the current skill-share list (used by the post-submit refresh).
    async fn list_skill_shares(&self) -> Result<Vec<SkillShare>>;
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: Uuid,
}

/// HTTP client for the skill-share API with Bearer auth.
#[derive(Clone, Debug)]
pub struct HttpSkillShareApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSkillShareApi {
    pub fn new(base_url: String, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create client from environment: TASTECRAFT_API_URL and optional
    /// TASTECRAFT_TOKEN.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("TASTECRAFT_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        let token = std::env::var("TASTECRAFT_TOKEN").ok();
        Self::new(base_url, token)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SkillShareBackend for HttpSkillShareApi {
    async fn create_skill_share(&self, payload: &SkillSharePayload) -> Result<Uuid> {
        let url = self.build_url("/api/skillshares");
        let request = self.apply_auth(self.client.post(&url)).json(payload);

        let response = request.send().await.context("Failed to send request")?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("API request failed with status {}: {}", status, body);
        }

        let created: CreateResponse = response
            .json()
            .await
            .context("Failed to parse create response")?;
        tracing::debug!(skill_share_id = %created.id, "Skill share created");
        Ok(created.id)
    }

    async fn list_skill_shares(&self) -> Result<Vec<SkillShare>> {
        let url = self.build_url("/api/skillshares");
        let request = self.apply_auth(self.client.get(&url));

        let response = request.send().await.context("Failed to send request")?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("API request failed with status {}: {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse skill share list")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let api = HttpSkillShareApi::new("http://localhost:8080///".into(), None).unwrap();
        assert_eq!(
            api.build_url("/api/skillshares"),
            "http://localhost:8080/api/skillshares"
        );
    }
}
