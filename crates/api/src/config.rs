use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// A configuration value that is missing or does not parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Read an env var, falling back to `default` and parsing into `T`.
pub(crate) fn env_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Where uploaded media lands and how it is served.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Filesystem root for stored blobs (default: `./media`).
    pub root: PathBuf,
    /// URL prefix the blobs are served from (default: `/media`).
    pub base_url: String,
    /// Largest accepted request body for uploads, in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for in-flight requests on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub media: MediaConfig,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `8000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                    |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`              |
    /// | `MEDIA_ROOT`           | `./media`               |
    /// | `MEDIA_URL`            | `/media`                |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env_or("PORT", 8000u16)?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let media = MediaConfig {
            root: PathBuf::from(std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media".into())),
            base_url: std::env::var("MEDIA_URL").unwrap_or_else(|_| "/media".into()),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30)?,
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30)?,
            media,
            jwt: JwtConfig::from_env()?,
        })
    }
}
