//! The project ingestion workflow.
//!
//! A submission is turned into a persisted project in two phases: every image
//! is uploaded to the object store, one at a time and in input order, then a
//! single record referencing the resulting URLs is inserted. The first failure
//! ends the request. Nothing already uploaded is deleted when a later step
//! fails; those blobs stay orphaned in the object store.

use std::sync::Arc;

use crate::error::CoreError;
use crate::project::{NewProject, Project, Submission};
use crate::store::{ObjectStore, RecordStore};

/// Drives one submission through the object store and the record store.
///
/// Cheap to share: both stores sit behind `Arc`.
#[derive(Clone)]
pub struct IngestionWorkflow {
    objects: Arc<dyn ObjectStore>,
    records: Result<Arc<dyn RecordStore>, String>,
}

impl IngestionWorkflow {
    pub fn new(objects: Arc<dyn ObjectStore>, records: Arc<dyn RecordStore>) -> Self {
        Self {
            objects,
            records: Ok(records),
        }
    }

    /// Build a workflow whose record store failed to initialize.
    ///
    /// Every call to [`IngestionWorkflow::submit`] then fails with
    /// [`CoreError::Unavailable`] carrying `reason`, without touching the
    /// object store.
    pub fn without_record_store(objects: Arc<dyn ObjectStore>, reason: impl Into<String>) -> Self {
        Self {
            objects,
            records: Err(reason.into()),
        }
    }

    /// Whether a record store is wired in.
    pub fn is_available(&self) -> bool {
        self.records.is_ok()
    }

    /// Upload every image, then insert the project record.
    pub async fn submit(&self, submission: Submission) -> Result<Project, CoreError> {
        let records = self
            .records
            .as_ref()
            .map_err(|reason| CoreError::Unavailable(reason.clone()))?;

        submission.check()?;

        let total = submission.images.len();
        let mut image_urls = Vec::with_capacity(total);

        for (position, image) in submission.images.iter().enumerate() {
            let index = position + 1;
            let reason = match self.objects.upload(image).await {
                Ok(url) if !url.trim().is_empty() => {
                    tracing::debug!(
                        index,
                        total,
                        file = image.label(),
                        bytes = image.bytes.len(),
                        %url,
                        "Image uploaded"
                    );
                    image_urls.push(url);
                    continue;
                }
                Ok(_) => "object store returned an empty URL".to_string(),
                Err(e) => e.to_string(),
            };

            tracing::warn!(
                index,
                total,
                file = image.label(),
                orphaned = image_urls.len(),
                error = %reason,
                "Image upload failed, aborting submission"
            );
            return Err(CoreError::Upload {
                index,
                total,
                reason,
            });
        }

        let candidate = NewProject {
            description: submission.description,
            image_urls,
        };

        let reason = match records.insert(&candidate).await {
            Ok(Some(project)) => {
                tracing::info!(
                    project_id = project.id,
                    images = project.image_urls.len(),
                    "Project created"
                );
                return Ok(project);
            }
            Ok(None) => "record store returned no data".to_string(),
            Err(e) => e.to_string(),
        };

        tracing::warn!(
            orphaned = candidate.image_urls.len(),
            error = %reason,
            "Project insert failed"
        );
        Err(CoreError::Persist(reason))
    }
}
