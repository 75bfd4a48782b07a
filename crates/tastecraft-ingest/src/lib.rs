//! Media ingestion pipeline: probe → upload → reconcile.
//!
//! This crate turns a batch of candidate files from either entry point
//! (explicit multi-select or drag-and-drop) into accepted attachments:
//! capacity check first, then concurrent per-file classification, then
//! concurrent upload of the survivors, then in-order reconciliation into the
//! attachment set with a full per-file outcome list.

pub mod coordinator;
pub mod pipeline;
pub mod probe;
pub mod types;

pub use coordinator::UploadCoordinator;
pub use pipeline::{IngestError, IngestReport, IngestionController};
pub use probe::{Classification, DurationProbe, FfprobeDurationProbe, MediaProbe};
pub use types::CandidateFile;
