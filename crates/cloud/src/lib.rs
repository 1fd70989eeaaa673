//! HTTP-backed store implementations.
//!
//! - [`CloudinaryStore`]: signed image uploads, the [`ObjectStore`] side.
//! - [`PostgrestStore`]: row inserts over a PostgREST (Supabase) endpoint,
//!   the [`RecordStore`] side.
//!
//! [`ObjectStore`]: showcase_core::store::ObjectStore
//! [`RecordStore`]: showcase_core::store::RecordStore

pub mod cloudinary;
pub mod postgrest;

pub use cloudinary::{CloudinaryConfig, CloudinaryStore, SignatureAlgorithm};
pub use postgrest::{PostgrestConfig, PostgrestStore};

use showcase_core::store::StoreError;

/// Map a transport-level reqwest failure onto the store error taxonomy.
pub(crate) fn request_error(err: reqwest::Error) -> StoreError {
    if err.is_decode() {
        StoreError::Decode(err.to_string())
    } else {
        StoreError::Request(err.to_string())
    }
}

/// Turn a non-2xx response into [`StoreError::Status`], keeping the body text.
pub(crate) async fn status_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    StoreError::Status { status, body }
}
