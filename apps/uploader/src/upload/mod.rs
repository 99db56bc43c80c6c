pub mod client;
pub mod validator;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::errors::UploadError;
use crate::models::portfolio::PortfolioData;
use crate::models::upload::UploadRequest;

pub use client::UploadClient;

/// The portfolio backend as seen by the workflow and the CLI.
/// Implemented by `UploadClient`; tests swap in fakes.
#[async_trait]
pub trait ResumeUploader: Send + Sync {
    /// Sends a validated resume and returns the generated portfolio links.
    async fn upload(&self, request: &UploadRequest) -> Result<PortfolioData, UploadError>;

    /// Saves the portfolio's HTML into `dest_dir`, returning the written path.
    async fn download(
        &self,
        portfolio: &PortfolioData,
        dest_dir: &Path,
    ) -> Result<PathBuf, UploadError>;
}
