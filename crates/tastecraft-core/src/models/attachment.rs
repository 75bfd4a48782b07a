use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Media kind enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// One accepted media attachment.
///
/// Created only by a successful probe-then-upload pass through the ingestion
/// pipeline; never mutated afterwards. The `url` is the durable reference
/// returned by the upload service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    pub url: String,
    pub kind: MediaKind,
    /// Original file name, for display only.
    pub display_name: String,
}

impl Attachment {
    /// Mint a new attachment at accept time.
    pub fn new(url: String, kind: MediaKind, display_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            kind,
            display_name,
        }
    }
}

/// Ordered collection of accepted attachments for one submission session.
///
/// Insertion order is significant: the submission payload carries parallel
/// url/kind arrays in this order. The capacity ceiling is enforced by the
/// ingestion pipeline before any upload starts, never here on removal.
#[derive(Debug, Clone)]
pub struct AttachmentSet {
    capacity: usize,
    items: Vec<Attachment>,
}

impl AttachmentSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Slots still available for new attachments.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    /// Read-only view of the attachments in insertion order.
    pub fn items(&self) -> &[Attachment] {
        &self.items
    }

    /// Append an accepted attachment. Fails only when the capacity invariant
    /// would break, which is a programming error: the pipeline pre-checks
    /// capacity before probing or uploading anything.
    pub fn append(&mut self, attachment: Attachment) -> Result<(), CapacityViolation> {
        if self.items.len() >= self.capacity {
            return Err(CapacityViolation {
                capacity: self.capacity,
            });
        }
        self.items.push(attachment);
        Ok(())
    }

    /// Remove the attachment with the given id. Idempotent: a missing id is
    /// a no-op, never an error.
    pub fn remove(&mut self, id: Uuid) {
        self.items.retain(|a| a.id != id);
    }

    /// Drop all attachments (submission success or dialog cancel).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Project the set into the parallel (urls, kinds) payload arrays, in
    /// current order. Pure; no side effects.
    pub fn to_payload_arrays(&self) -> (Vec<String>, Vec<MediaKind>) {
        let urls = self.items.iter().map(|a| a.url.clone()).collect();
        let kinds = self.items.iter().map(|a| a.kind).collect();
        (urls, kinds)
    }
}

/// Capacity invariant violation: the set was asked to grow past its ceiling.
#[derive(Debug, thiserror::Error)]
#[error("attachment set capacity of {capacity} exceeded")]
pub struct CapacityViolation {
    pub capacity: usize,
}
