//! Project row model.

use showcase_core::project::Project;
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub description: String,
    pub image_urls: Vec<String>,
    pub created_at: Timestamp,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            description: row.description,
            image_urls: row.image_urls,
            created_at: row.created_at,
        }
    }
}
