//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests call `IntoResponse` directly on `AppError` values; no router
//! is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use showcase_api::error::AppError;
use showcase_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("description is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["detail"], "description is required");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Upload maps to 500 and names the image, not the cause
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_error_returns_500_with_index() {
    let err = AppError::Core(CoreError::Upload {
        index: 2,
        total: 3,
        reason: "api_secret mismatch for key 123456".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPLOAD_ERROR");
    assert_eq!(json["detail"], "Image upload failed for image 2 of 3");
    assert!(
        !json.to_string().contains("api_secret"),
        "Upload error response must not leak upstream details"
    );
}

// ---------------------------------------------------------------------------
// Test: CoreError::Persist maps to 500 with PERSIST_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn persist_error_returns_500_and_sanitizes() {
    let err = AppError::Core(CoreError::Persist(
        "password authentication failed for user showcase".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "PERSIST_ERROR");
    assert_eq!(json["detail"], "Failed to save project");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Unavailable maps to 503
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unavailable_error_returns_503() {
    let err = AppError::Core(CoreError::Unavailable("invalid record store URL".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
    assert_eq!(json["detail"], "Record store is unavailable");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Invalid boundary for multipart/form-data request".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(
        json["detail"],
        "Invalid boundary for multipart/form-data request"
    );
}

// ---------------------------------------------------------------------------
// Test: AppError::PayloadTooLarge maps to 413
// ---------------------------------------------------------------------------

#[tokio::test]
async fn payload_too_large_returns_413() {
    let err = AppError::PayloadTooLarge("length limit exceeded".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
}
