//! Project entity, the insert candidate, and the inbound submission.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Name of the record store table holding projects.
pub const PROJECTS_TABLE: &str = "projects";

/// One uploaded image part, exactly as received.
///
/// Serializes to its metadata only; validation errors carry it as a param.
#[derive(Debug, Clone, Serialize)]
pub struct ImageBlob {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    #[serde(skip)]
    pub bytes: Bytes,
}

impl ImageBlob {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: None,
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Label used in logs: the client file name, or `<unnamed>`.
    pub fn label(&self) -> &str {
        self.file_name.as_deref().unwrap_or("<unnamed>")
    }
}

/// The transient input of one ingestion request.
#[derive(Debug, Clone, Validate)]
pub struct Submission {
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "at least one image is required"))]
    pub images: Vec<ImageBlob>,
}

impl Submission {
    /// Build a submission. Surrounding whitespace is stripped from the
    /// description, so a blank description fails [`Submission::check`].
    pub fn new(description: impl AsRef<str>, images: Vec<ImageBlob>) -> Self {
        Self {
            description: description.as_ref().trim().to_string(),
            images,
        }
    }

    /// Run the required-field checks, folding every failure into one
    /// [`CoreError::Validation`].
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(|errors| {
            let mut messages: Vec<String> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("{field} is invalid"),
                    })
                })
                .collect();
            messages.sort();
            CoreError::Validation(messages.join("; "))
        })
    }
}

/// Insert candidate sent to the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub description: String,
    pub image_urls: Vec<String>,
}

/// A persisted project as returned by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub description: String,
    pub image_urls: Vec<String>,
    pub created_at: Timestamp,
}
