use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Client configuration loaded from environment variables.
/// Resolved once at startup and handed to `UploadClient::new`; never mutated afterwards.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the portfolio backend, e.g. `http://localhost:8080/api/v1`.
    pub api_base_url: String,
    /// Sent as `X-API-Key` when present.
    pub api_key: Option<String>,
    /// Per-request timeout. `None` means requests may stay outstanding indefinitely.
    pub timeout: Option<Duration>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout = match optional_env("UPLOAD_TIMEOUT_SECS") {
            Some(raw) => Some(parse_timeout(&raw).context("UPLOAD_TIMEOUT_SECS is invalid")?),
            None => None,
        };

        Ok(Config {
            api_base_url: normalize_base_url(&require_env("API_BASE_URL")?),
            api_key: optional_env("BACKEND_API_KEY"),
            timeout,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Builds a config pointing at an explicit endpoint. Used by tests and by
    /// callers that resolve the endpoint themselves.
    #[allow(dead_code)]
    pub fn new(api_base_url: &str, api_key: Option<String>) -> Self {
        Config {
            api_base_url: normalize_base_url(api_base_url),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout: None,
            rust_log: "info".to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn upload_url(&self) -> String {
        format!("{}/resume/upload", self.api_base_url)
    }
}

// The API key must never reach logs, so Debug is written by hand.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

/// Parses a positive number of seconds.
pub fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("'{raw}' is not a whole number of seconds"))?;
    if secs == 0 {
        bail!("timeout must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
