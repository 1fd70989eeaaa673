//! Cloudinary image uploads.
//!
//! Each upload is an authenticated `multipart/form-data` POST to
//! `{base_url}/v1_1/{cloud_name}/image/upload`. The request is signed with the
//! API secret: the signed parameters are sorted by name, joined as
//! `key=value` pairs with `&`, the secret is appended, and the digest of that
//! string is sent as lowercase hex. The digest is SHA-1 unless the account has
//! been switched to SHA-256, in which case `signature_algorithm=sha256` is sent
//! alongside it.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use showcase_core::project::ImageBlob;
use showcase_core::store::{ObjectStore, StoreError};

use crate::{request_error, status_error};

/// Public Cloudinary API root.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";

/// Default per-request timeout for uploads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Digest used for request signatures. Must match the account setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl SignatureAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha1 => "sha1",
            SignatureAlgorithm::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" => Ok(SignatureAlgorithm::Sha1),
            "sha256" => Ok(SignatureAlgorithm::Sha256),
            other => Err(format!("unknown signature algorithm '{other}'")),
        }
    }
}

/// Credentials and endpoint for a Cloudinary account.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Optional destination folder for uploaded assets.
    pub folder: Option<String>,
    pub signature_algorithm: SignatureAlgorithm,
    pub base_url: String,
    pub timeout: Duration,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: None,
            signature_algorithm: SignatureAlgorithm::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.base_url.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

/// Subset of the upload response we rely on.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
}

/// [`ObjectStore`] that stores images on Cloudinary.
#[derive(Debug, Clone)]
pub struct CloudinaryStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(request_error)?;
        Ok(Self { client, config })
    }

    /// The parameters covered by the signature, sorted by name.
    fn signed_params(&self, timestamp: i64) -> Vec<(&'static str, String)> {
        let mut params = vec![("timestamp", timestamp.to_string())];
        if let Some(folder) = &self.config.folder {
            params.push(("folder", folder.clone()));
        }
        params.sort_by(|a, b| a.0.cmp(b.0));
        params
    }

    fn build_form(&self, image: &ImageBlob, timestamp: i64) -> Form {
        let params = self.signed_params(timestamp);
        let algorithm = self.config.signature_algorithm;
        let signature = sign(&params, &self.config.api_secret, algorithm);

        let file_name = image.file_name.clone().unwrap_or_else(|| "upload".into());
        let part = || Part::bytes(image.bytes.to_vec()).file_name(file_name.clone());
        // An unparseable client content type is dropped; Cloudinary sniffs the bytes.
        let file = match image.content_type.as_deref() {
            Some(content_type) => part().mime_str(content_type).unwrap_or_else(|_| part()),
            None => part(),
        };

        let mut form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        if algorithm != SignatureAlgorithm::Sha1 {
            form = form.text("signature_algorithm", algorithm.as_str());
        }
        for (key, value) in params {
            form = form.text(key, value);
        }
        form
    }
}

#[async_trait]
impl ObjectStore for CloudinaryStore {
    async fn upload(&self, image: &ImageBlob) -> Result<String, StoreError> {
        let timestamp = chrono::Utc::now().timestamp();
        let form = self.build_form(image, timestamp);

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: UploadResponse = response.json().await.map_err(request_error)?;
        tracing::debug!(
            public_id = body.public_id.as_deref().unwrap_or(""),
            file = image.label(),
            "Cloudinary upload complete"
        );

        // A missing URL is passed through as empty; the workflow rejects it.
        Ok(body.secure_url.unwrap_or_default())
    }
}

/// Hex digest over `k1=v1&k2=v2...{secret}`. `params` must already be sorted.
fn sign(params: &[(&str, String)], secret: &str, algorithm: SignatureAlgorithm) -> String {
    let to_sign = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    match algorithm {
        SignatureAlgorithm::Sha1 => format!(
            "{:x}",
            Sha1::new().chain_update(&to_sign).chain_update(secret).finalize()
        ),
        SignatureAlgorithm::Sha256 => format!(
            "{:x}",
            Sha256::new().chain_update(&to_sign).chain_update(secret).finalize()
        ),
    }
}
