use std::time::Duration;

use axum::http::HeaderValue;
use showcase_cloud::{CloudinaryConfig, PostgrestConfig};

/// Default request body cap (25 MiB) for multipart submissions.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// A configuration value that is missing or cannot be used.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigins {
    /// `*`: any origin, echoed back so credentials still work.
    Any,
    List(Vec<HeaderValue>),
}

/// Where project records are written.
#[derive(Debug, Clone)]
pub enum RecordStoreConfig {
    /// PostgREST / Supabase REST endpoint.
    Rest(PostgrestConfig),
    /// Direct PostgreSQL connection.
    Postgres { database_url: String },
}

/// Server configuration loaded from environment variables.
///
/// Listener and middleware settings have defaults. Store credentials do
/// not: a missing credential stops the process at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `120`).
    pub request_timeout_secs: u64,
    /// Request body cap in bytes.
    pub max_upload_bytes: usize,
    pub object_store: CloudinaryConfig,
    pub record_store: RecordStoreConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                     | Default / requirement              |
    /// |-----------------------------|------------------------------------|
    /// | `HOST`                      | `0.0.0.0`                          |
    /// | `PORT`                      | `8000`                             |
    /// | `CORS_ORIGINS`              | `*`                                |
    /// | `REQUEST_TIMEOUT_SECS`      | `120`                              |
    /// | `MAX_UPLOAD_BYTES`          | `26214400`                         |
    /// | `CLOUDINARY_CLOUD_NAME`     | required                           |
    /// | `CLOUDINARY_API_KEY`        | required                           |
    /// | `CLOUDINARY_API_SECRET`     | required                           |
    /// | `CLOUDINARY_FOLDER`         | none                               |
    /// | `CLOUDINARY_SIGNATURE_ALGORITHM` | `sha1` (or `sha256`)          |
    /// | `CLOUDINARY_BASE_URL`       | `https://api.cloudinary.com`       |
    /// | `OBJECT_STORE_TIMEOUT_SECS` | `30`                               |
    /// | `RECORD_STORE_BACKEND`      | `rest` (or `postgres`)             |
    /// | `SUPABASE_URL`              | required for `rest`                |
    /// | `SUPABASE_KEY`              | required for `rest`                |
    /// | `RECORD_STORE_TIMEOUT_SECS` | `30`                               |
    /// | `DATABASE_URL`              | required for `postgres`            |
    ///
    /// Panics with the offending variable name on any [`ConfigError`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
            .unwrap_or_else(|e| panic!("Invalid configuration: {e}"))
    }

    /// Load configuration through an arbitrary key lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&get, "PORT", 8000u16)?;
        let cors_origins = parse_cors(get("CORS_ORIGINS").as_deref().unwrap_or("*"))?;
        let request_timeout_secs = parse_or(&get, "REQUEST_TIMEOUT_SECS", 120u64)?;
        let max_upload_bytes = parse_or(&get, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        let mut object_store = CloudinaryConfig::new(
            require("CLOUDINARY_CLOUD_NAME")?,
            require("CLOUDINARY_API_KEY")?,
            require("CLOUDINARY_API_SECRET")?,
        );
        object_store.folder = get("CLOUDINARY_FOLDER");
        object_store.signature_algorithm = parse_or(
            &get,
            "CLOUDINARY_SIGNATURE_ALGORITHM",
            object_store.signature_algorithm,
        )?;
        if let Some(base_url) = get("CLOUDINARY_BASE_URL") {
            object_store.base_url = base_url;
        }
        object_store.timeout = Duration::from_secs(parse_or(
            &get,
            "OBJECT_STORE_TIMEOUT_SECS",
            object_store.timeout.as_secs(),
        )?);

        let backend = get("RECORD_STORE_BACKEND").unwrap_or_else(|| "rest".into());
        let record_store = match backend.to_ascii_lowercase().as_str() {
            "rest" => {
                let mut rest = PostgrestConfig::new(require("SUPABASE_URL")?, require("SUPABASE_KEY")?);
                rest.timeout = Duration::from_secs(parse_or(
                    &get,
                    "RECORD_STORE_TIMEOUT_SECS",
                    rest.timeout.as_secs(),
                )?);
                RecordStoreConfig::Rest(rest)
            }
            "postgres" => RecordStoreConfig::Postgres {
                database_url: require("DATABASE_URL")?,
            },
            _ => {
                return Err(ConfigError::Invalid {
                    key: "RECORD_STORE_BACKEND",
                    value: backend,
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            object_store,
            record_store,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_cors(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if origins.is_empty() || origins.contains(&"*") {
        return Ok(CorsOrigins::Any);
    }

    origins
        .into_iter()
        .map(|o| {
            HeaderValue::from_str(o).map_err(|_| ConfigError::Invalid {
                key: "CORS_ORIGINS",
                value: o.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}
