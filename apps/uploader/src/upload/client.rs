//! Upload client — the only place that talks to the portfolio backend.
//!
//! One call per invocation, no retries. The API key is attached as a header
//! and never logged.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{multipart, Client, Response, Url};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::{UploadError, DOWNLOAD_FALLBACK_MESSAGE, UPLOAD_FALLBACK_MESSAGE};
use crate::models::portfolio::{PortfolioData, ServerMessage};
use crate::models::upload::UploadRequest;
use crate::upload::ResumeUploader;

const API_KEY_HEADER: &str = "X-API-Key";
/// Multipart field the backend reads the resume from.
pub const RESUME_FIELD: &str = "resumeFile";

#[derive(Clone)]
pub struct UploadClient {
    client: Client,
    config: Config,
}

impl UploadClient {
    pub fn new(config: Config) -> Result<Self, UploadError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// Sends the resume as `multipart/form-data` to `{base}/resume/upload`.
    pub async fn upload(&self, request: &UploadRequest) -> Result<PortfolioData, UploadError> {
        // Bytes is refcounted; the part shares the buffer instead of copying it.
        let part = multipart::Part::stream(request.data.clone())
            .file_name(request.file_name.clone())
            .mime_str(&request.media_type)?;
        let form = multipart::Form::new().part(RESUME_FIELD, part);

        let url = self.config.upload_url();
        debug!(
            "Uploading {} ({} bytes, {}) to {url}",
            request.file_name,
            request.data.len(),
            request.media_type
        );

        let response = self
            .with_api_key(self.client.post(&url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Resume upload did not reach the backend: {e}");
                UploadError::from(e)
            })?;

        let response = check_status(response, UPLOAD_FALLBACK_MESSAGE).await?;

        let body = response.text().await?;
        let portfolio: PortfolioData = serde_json::from_str(&body)
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;
        if let Some(field) = portfolio.blank_field() {
            return Err(UploadError::InvalidResponse(format!("'{field}' is empty")));
        }

        info!("Portfolio {} generated", portfolio.portfolio_id);
        Ok(portfolio)
    }

    /// Fetches the self-contained HTML file and writes it to
    /// `{dest_dir}/{portfolioId}.html`, returning the written path.
    pub async fn download(
        &self,
        portfolio: &PortfolioData,
        dest_dir: &Path,
    ) -> Result<PathBuf, UploadError> {
        let file_name = safe_file_name(portfolio)?;
        let url = self.resolve_url(&portfolio.download_url)?;

        debug!("Downloading portfolio {} from {url}", portfolio.portfolio_id);
        let response = self
            .with_api_key(self.client.get(url))
            .send()
            .await?;
        let response = check_status(response, DOWNLOAD_FALLBACK_MESSAGE).await?;
        let html = response.bytes().await?;

        tokio::fs::create_dir_all(dest_dir).await?;
        let path = dest_dir.join(file_name);
        tokio::fs::write(&path, &html).await?;

        info!("Saved portfolio HTML to {}", path.display());
        Ok(path)
    }

    fn with_api_key(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    /// Download links may be absolute, origin-relative (`/api/v1/...`) or
    /// relative to `API_BASE_URL`. The base is stored without a trailing
    /// slash, so one is added back before joining to keep its last segment.
    fn resolve_url(&self, link: &str) -> Result<Url, UploadError> {
        if link.trim().is_empty() {
            return Err(UploadError::InvalidResponse("download link is empty".to_string()));
        }
        if let Ok(url) = Url::parse(link) {
            return Ok(url);
        }
        Url::parse(&format!("{}/", self.config.api_base_url))
            .and_then(|base| base.join(link))
            .map_err(|e| UploadError::InvalidResponse(format!("bad download link '{link}': {e}")))
    }
}

#[async_trait]
impl ResumeUploader for UploadClient {
    async fn upload(&self, request: &UploadRequest) -> Result<PortfolioData, UploadError> {
        UploadClient::upload(self, request).await
    }

    async fn download(
        &self,
        portfolio: &PortfolioData,
        dest_dir: &Path,
    ) -> Result<PathBuf, UploadError> {
        UploadClient::download(self, portfolio, dest_dir).await
    }
}

/// Passes 2xx responses through; anything else becomes `UploadError::Server`
/// carrying the body's `message` or `fallback`.
async fn check_status(response: Response, fallback: &str) -> Result<Response, UploadError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = ServerMessage::extract(&body).unwrap_or_else(|| fallback.to_string());
    warn!("Backend returned {status}: {message}");

    Err(UploadError::Server {
        status: status.as_u16(),
        message,
    })
}

fn safe_file_name(portfolio: &PortfolioData) -> Result<String, UploadError> {
    let id = portfolio.portfolio_id.as_str();
    if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
        return Err(UploadError::InvalidResponse(format!(
            "portfolio id '{id}' cannot be used as a file name"
        )));
    }
    Ok(portfolio.html_file_name())
}
