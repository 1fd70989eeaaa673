//! Shared response envelope types for API handlers.

use serde::Serialize;

/// `{ "message": ..., "data": ... }` envelope returned by write endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: &'static str,
    pub data: T,
}
