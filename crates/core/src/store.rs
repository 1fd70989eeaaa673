//! Seams to the two remote collaborators.
//!
//! Implementations are built once at startup and shared read-only across
//! requests, hence the `Send + Sync` bounds.

use async_trait::async_trait;

use crate::project::{ImageBlob, NewProject, Project};

/// Failure reported by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response (network, DNS, timeout).
    #[error("Request failed: {0}")]
    Request(String),

    /// The remote service answered with a non-success status.
    #[error("Remote returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be understood.
    #[error("Could not decode response: {0}")]
    Decode(String),

    /// A database driver error.
    #[error("Database error: {0}")]
    Database(String),
}

/// Binary object storage returning a public URL per stored blob.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store one image and return its retrieval URL.
    ///
    /// Returning an empty string is legal at this layer; the workflow treats
    /// it the same as an error.
    async fn upload(&self, image: &ImageBlob) -> Result<String, StoreError>;
}

/// Structured storage for project records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one project. `Ok(None)` means the store accepted the call but
    /// handed back no row.
    async fn insert(&self, record: &NewProject) -> Result<Option<Project>, StoreError>;
}
