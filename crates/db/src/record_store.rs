//! PostgreSQL-backed [`RecordStore`].

use async_trait::async_trait;
use showcase_core::project::{NewProject, Project};
use showcase_core::store::{RecordStore, StoreError};

use crate::repositories::ProjectRepo;
use crate::DbPool;

/// Inserts projects through [`ProjectRepo`] on a shared pool.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, record: &NewProject) -> Result<Option<Project>, StoreError> {
        match ProjectRepo::create(&self.pool, record).await {
            Ok(row) => Ok(Some(row.into())),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(StoreError::Database(e.to_string())),
        }
    }
}
