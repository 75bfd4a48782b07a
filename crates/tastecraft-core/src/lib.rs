//! Tastecraft Core Library
//!
//! This crate provides the domain models, configuration, and session hooks
//! shared across all Tastecraft components: attachments and their ordered
//! set, per-file ingestion outcomes, the skill-share submission payload, and
//! the event sink the pipeline signals into.

pub mod config;
pub mod hooks;
pub mod models;

// Re-export commonly used types
pub use config::IngestConfig;
pub use hooks::{NoOpSessionSink, SessionEvent, SessionSink};
pub use models::{
    Attachment, AttachmentSet, FileOutcome, IngestResult, MediaKind, SkillShare,
    SkillSharePayload,
};
