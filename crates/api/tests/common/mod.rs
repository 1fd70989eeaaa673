#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use showcase_api::app::build_app;
use showcase_api::config::{CorsOrigins, RecordStoreConfig, ServerConfig};
use showcase_api::state::AppState;
use showcase_cloud::{CloudinaryConfig, PostgrestConfig};
use showcase_core::ingestion::IngestionWorkflow;
use showcase_core::project::{ImageBlob, NewProject, Project};
use showcase_core::store::{ObjectStore, RecordStore, StoreError};

pub const BOUNDARY: &str = "showcase-test-boundary";

// ---------------------------------------------------------------------------
// Store doubles
// ---------------------------------------------------------------------------

/// Object store double. Returns `https://cdn/<file name>` unless the file
/// name is listed in `fail_on` (error) or `empty_on` (empty URL).
#[derive(Default)]
pub struct FakeObjects {
    pub uploads: Mutex<Vec<String>>,
    pub fail_on: Vec<&'static str>,
    pub empty_on: Vec<&'static str>,
}

#[async_trait]
impl ObjectStore for FakeObjects {
    async fn upload(&self, image: &ImageBlob) -> Result<String, StoreError> {
        let name = image.label().to_string();
        self.uploads.lock().unwrap().push(name.clone());
        if self.fail_on.iter().any(|n| *n == name) {
            return Err(StoreError::Status {
                status: 400,
                body: "Invalid image file".into(),
            });
        }
        if self.empty_on.iter().any(|n| *n == name) {
            return Ok(String::new());
        }
        Ok(format!("https://cdn/{name}"))
    }
}

/// Record store double assigning sequential ids.
#[derive(Default)]
pub struct FakeRecords {
    pub inserted: Mutex<Vec<NewProject>>,
    pub return_nothing: bool,
}

#[async_trait]
impl RecordStore for FakeRecords {
    async fn insert(&self, record: &NewProject) -> Result<Option<Project>, StoreError> {
        let mut inserted = self.inserted.lock().unwrap();
        inserted.push(record.clone());
        if self.return_nothing {
            return Ok(None);
        }
        Ok(Some(Project {
            id: inserted.len() as i64,
            description: record.description.clone(),
            image_urls: record.image_urls.clone(),
            created_at: chrono::Utc::now(),
        }))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
///
/// Store credentials are placeholders; tests inject store doubles directly.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::List(vec!["http://localhost:5173".parse().unwrap()]),
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        object_store: CloudinaryConfig::new("demo", "123456", "abcd"),
        record_store: RecordStoreConfig::Rest(PostgrestConfig::new(
            "https://abc.supabase.co",
            "anon",
        )),
    }
}

/// Build the full application router around the given workflow.
pub fn build_test_app(workflow: IngestionWorkflow) -> Router {
    build_app(AppState::new(workflow), &test_config())
}

/// Build an app with both doubles wired in.
pub fn app_with(objects: &Arc<FakeObjects>, records: &Arc<FakeRecords>) -> Router {
    build_test_app(IngestionWorkflow::new(objects.clone(), records.clone()))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// One part of a multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

/// Shorthand for a PNG `images` part.
pub fn image(file_name: &str) -> Part<'_> {
    Part::File {
        name: "images",
        file_name,
        content_type: "image/png",
        bytes: b"\x89PNG\r\n\x1a\nfake",
    }
}

/// Encode `parts` as a `multipart/form-data` body using [`BOUNDARY`].
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
