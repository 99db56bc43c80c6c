use serde::{Deserialize, Serialize};

/// Links to a generated portfolio, as returned by `POST /resume/upload`.
///
/// The backend's response DTO also carries a `message` field (null on
/// success); unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub portfolio_url: String,
    pub download_url: String,
    pub portfolio_id: String,
}

impl PortfolioData {
    /// Name of the first link field that is blank, if any. A response with a
    /// blank link carries nothing to show or download.
    pub fn blank_field(&self) -> Option<&'static str> {
        [
            ("portfolioUrl", &self.portfolio_url),
            ("downloadUrl", &self.download_url),
            ("portfolioId", &self.portfolio_id),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }

    /// File name the downloadable HTML is saved under.
    pub fn html_file_name(&self) -> String {
        format!("{}.html", self.portfolio_id)
    }
}

/// Error body shape used by the backend: `{ "message": ... }`, sometimes with
/// an extra `error` field (auth and rate-limit filters).
#[derive(Debug, Deserialize)]
pub struct ServerMessage {
    pub message: Option<String>,
}

impl ServerMessage {
    /// Extracts a non-empty `message` from a raw response body, if any.
    pub fn extract(body: &str) -> Option<String> {
        serde_json::from_str::<ServerMessage>(body)
            .ok()
            .and_then(|m| m.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
