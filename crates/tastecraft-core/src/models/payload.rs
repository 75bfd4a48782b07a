use serde::{Deserialize, Serialize};

use super::attachment::{AttachmentSet, MediaKind};

/// Skill-share creation payload. Matches the creation API wire shape:
/// `mediaUrls` and `mediaKinds` are parallel arrays in attachment-set order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSharePayload {
    pub text: String,
    pub author_id: String,
    pub media_urls: Vec<String>,
    pub media_kinds: Vec<MediaKind>,
}

impl SkillSharePayload {
    /// Build the payload from the set's current order.
    pub fn from_set(text: String, author_id: String, set: &AttachmentSet) -> Self {
        let (media_urls, media_kinds) = set.to_payload_arrays();
        Self {
            text,
            author_id,
            media_urls,
            media_kinds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Attachment;

    #[test]
    fn serializes_camel_case_parallel_arrays() {
        let mut set = AttachmentSet::new(3);
        set.append(Attachment::new(
            "https://cdn.example.com/a.jpg".into(),
            MediaKind::Image,
            "a.jpg".into(),
        ))
        .unwrap();
        set.append(Attachment::new(
            "https://cdn.example.com/b.mp4".into(),
            MediaKind::Video,
            "b.mp4".into(),
        ))
        .unwrap();

        let payload =
            SkillSharePayload::from_set("Knife skills".into(), "user-1".into(), &set);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["authorId"], "user-1");
        assert_eq!(json["mediaUrls"][0], "https://cdn.example.com/a.jpg");
        assert_eq!(json["mediaKinds"][0], "image");
        assert_eq!(json["mediaKinds"][1], "video");
        assert_eq!(
            json["mediaUrls"].as_array().unwrap().len(),
            json["mediaKinds"].as_array().unwrap().len()
        );
    }
}
