use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use showcase_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for workflow failures and adds the request-parsing
/// failures that happen before the workflow runs. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure reported by the ingestion workflow.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be read as the expected form.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured upload limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        from_status(err.status(), err.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        from_status(rejection.status(), rejection.body_text())
    }
}

fn from_status(status: StatusCode, text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(text)
    } else {
        AppError::BadRequest(text)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, detail) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
        };

        let body = json!({
            "detail": detail,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a workflow failure to an HTTP status, error code, and client-facing
/// detail.
///
/// | Variant       | Status | Code                  |
/// |---------------|--------|-----------------------|
/// | `Validation`  | 400    | `VALIDATION_ERROR`    |
/// | `Upload`      | 500    | `UPLOAD_ERROR`        |
/// | `Persist`     | 500    | `PERSIST_ERROR`       |
/// | `Unavailable` | 503    | `SERVICE_UNAVAILABLE` |
///
/// Upstream failure reasons are logged, never echoed to the client.
pub fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Upload {
            index,
            total,
            reason,
        } => {
            tracing::error!(index, total, error = %reason, "Image upload failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPLOAD_ERROR",
                format!("Image upload failed for image {index} of {total}"),
            )
        }
        CoreError::Persist(reason) => {
            tracing::error!(error = %reason, "Project persist failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PERSIST_ERROR",
                "Failed to save project".to_string(),
            )
        }
        CoreError::Unavailable(reason) => {
            tracing::error!(error = %reason, "Record store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Record store is unavailable".to_string(),
            )
        }
    }
}
