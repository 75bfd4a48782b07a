//! Skill-share client: creation-service boundary, submission assembly, and
//! the caller-owned submission session.
//!
//! The ingestion pipeline produces an attachment set; this crate turns the
//! set plus the free-text fields into a creation payload, talks to the
//! skill-share API, and holds the per-dialog session state the view layer
//! reads.

pub mod api;
pub mod session;
pub mod submit;

pub use api::{HttpSkillShareApi, SkillShareBackend};
pub use session::{SessionState, SharedSessionState, SubmissionSession};
pub use submit::{SubmissionAssembler, SubmitError};
