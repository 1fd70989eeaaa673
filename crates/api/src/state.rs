use std::sync::Arc;

use showcase_cloud::{CloudinaryStore, PostgrestStore};
use showcase_core::ingestion::IngestionWorkflow;
use showcase_core::store::{ObjectStore, RecordStore, StoreError};
use showcase_db::PgRecordStore;

use crate::config::{RecordStoreConfig, ServerConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the workflow holds its stores behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub workflow: IngestionWorkflow,
}

impl AppState {
    pub fn new(workflow: IngestionWorkflow) -> Self {
        Self { workflow }
    }

    /// Build both store clients from configuration.
    ///
    /// An object store that cannot be built is an error. A record store that
    /// cannot be reached is logged and leaves the workflow unavailable, so the
    /// server still starts and answers 503 on submissions.
    pub async fn connect(config: &ServerConfig) -> Result<Self, StoreError> {
        let objects: Arc<dyn ObjectStore> =
            Arc::new(CloudinaryStore::new(config.object_store.clone())?);
        tracing::info!(cloud = %config.object_store.cloud_name, "Object store client ready");

        let workflow = match connect_record_store(&config.record_store).await {
            Ok(records) => {
                tracing::info!("Record store client ready");
                IngestionWorkflow::new(objects, records)
            }
            Err(reason) => {
                tracing::error!(error = %reason, "Record store failed to initialize");
                IngestionWorkflow::without_record_store(objects, reason)
            }
        };

        Ok(Self::new(workflow))
    }
}

/// Build the configured record store, returning a printable reason on failure.
pub async fn connect_record_store(
    config: &RecordStoreConfig,
) -> Result<Arc<dyn RecordStore>, String> {
    match config {
        RecordStoreConfig::Rest(rest) => {
            let store = PostgrestStore::new(rest.clone()).map_err(|e| e.to_string())?;
            tracing::info!(endpoint = %store.endpoint(), "Using PostgREST record store");
            Ok(Arc::new(store))
        }
        RecordStoreConfig::Postgres { database_url } => {
            let pool = showcase_db::create_pool(database_url)
                .await
                .map_err(|e| format!("Failed to connect to database: {e}"))?;
            tracing::info!("Database connection pool created");

            showcase_db::health_check(&pool)
                .await
                .map_err(|e| format!("Database health check failed: {e}"))?;

            showcase_db::run_migrations(&pool)
                .await
                .map_err(|e| format!("Failed to run database migrations: {e}"))?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgRecordStore::new(pool)))
        }
    }
}
