use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;

/// A file selected for upload. Immutable once built; the workflow owns it
/// until the request completes or a new selection replaces it.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub media_type: String,
    pub data: Bytes,
}

impl UploadRequest {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            data,
        }
    }

    /// Reads `path` from disk. The media type is taken from `media_type` when
    /// given, otherwise derived from the file extension.
    pub async fn from_path(path: &Path, media_type: Option<&str>) -> Result<Self> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();

        let media_type = media_type
            .map(str::to_string)
            .unwrap_or_else(|| crate::upload::validator::media_type_for_path(path).to_string());

        Ok(Self::new(file_name, media_type, Bytes::from(data)))
    }
}
