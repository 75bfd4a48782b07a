use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attachment::MediaKind;

/// Persisted skill-share post as returned by the creation API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillShare {
    pub id: Uuid,
    pub author_id: String,
    pub text: String,
    pub media_urls: Vec<String>,
    pub media_kinds: Vec<MediaKind>,
    pub created_at: DateTime<Utc>,
}
