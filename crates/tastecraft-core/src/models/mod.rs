pub mod attachment;
pub mod outcome;
pub mod payload;
pub mod skill_share;

pub use attachment::{Attachment, AttachmentSet, MediaKind};
pub use outcome::{FileOutcome, IngestResult};
pub use payload::SkillSharePayload;
pub use skill_share::SkillShare;
