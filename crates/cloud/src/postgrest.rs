//! Record inserts over PostgREST, the REST layer in front of Supabase.
//!
//! An insert is `POST {url}/rest/v1/{table}` with the JSON row as body and
//! `Prefer: return=representation`, so the created rows come back as a JSON
//! array.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION};
use reqwest::Url;
use showcase_core::project::{NewProject, Project, PROJECTS_TABLE};
use showcase_core::store::{RecordStore, StoreError};

use crate::{request_error, status_error};

/// Default per-request timeout for inserts.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoint and access key of a PostgREST / Supabase project.
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    pub url: String,
    pub key: String,
    pub table: String,
    pub timeout: Duration,
}

impl PostgrestConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            table: PROJECTS_TABLE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// [`RecordStore`] writing to a PostgREST table.
#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    endpoint: Url,
}

impl PostgrestStore {
    /// Build the client. Fails on a malformed URL or a key that is not a
    /// valid header value.
    pub fn new(config: PostgrestConfig) -> Result<Self, StoreError> {
        let mut base = Url::parse(&config.url)
            .map_err(|e| StoreError::Request(format!("invalid record store URL: {e}")))?;
        // Without a trailing slash `join` would replace the last path segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(&format!("rest/v1/{}", config.table))
            .map_err(|e| StoreError::Request(format!("invalid record store URL: {e}")))?;

        let invalid_key =
            |_: InvalidHeaderValue| StoreError::Request("record store key is not a valid header".into());
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&config.key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.key)).map_err(invalid_key)?,
        );
        headers.insert("prefer", HeaderValue::from_static("return=representation"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(request_error)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RecordStore for PostgrestStore {
    async fn insert(&self, record: &NewProject) -> Result<Option<Project>, StoreError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(record)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let rows: Vec<Project> = response.json().await.map_err(request_error)?;
        Ok(rows.into_iter().next())
    }
}
