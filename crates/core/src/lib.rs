//! Domain layer for the showcase project service.
//!
//! Holds the project types, the error taxonomy, the two storage seams
//! ([`store::ObjectStore`] and [`store::RecordStore`]) and the
//! [`ingestion::IngestionWorkflow`] that drives them. Nothing in here performs
//! I/O directly; concrete stores live in `showcase-db` and `showcase-cloud`.

pub mod error;
pub mod ingestion;
pub mod project;
pub mod store;
pub mod types;
