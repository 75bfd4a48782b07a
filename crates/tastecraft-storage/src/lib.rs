//! Upload-service abstraction for Tastecraft.
//!
//! Defines the [`MediaStore`] trait the ingestion pipeline uploads through,
//! plus the HTTP-backed implementation used against the real storage API.
//! The pipeline is transport-agnostic: it only ever sees `MediaStore`.

pub mod http;
pub mod traits;

pub use http::HttpMediaStore;
pub use traits::{MediaStore, StorageError, StorageResult};
