#![allow(dead_code)]

use thiserror::Error;

/// Fallback shown when the backend rejects an upload without a usable message.
pub const UPLOAD_FALLBACK_MESSAGE: &str = "Failed to upload resume";
/// Fallback shown when the portfolio download fails without a usable message.
pub const DOWNLOAD_FALLBACK_MESSAGE: &str = "Failed to download portfolio";

/// Errors produced while talking to the portfolio backend.
///
/// `Display` yields exactly the message the user should see, so the workflow
/// can store `err.to_string()` as its failure message.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No response was received (connection refused, DNS, timeout, ...).
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The backend answered 2xx but the body was not the expected JSON.
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    #[error("Failed to save portfolio: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    pub fn status(&self) -> Option<u16> {
        match self {
            UploadError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            UploadError::InvalidResponse(e.to_string())
        } else {
            UploadError::Transport(e.to_string())
        }
    }
}

/// Errors raised by the workflow guards. None of them change the workflow state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Please select a file to upload.")]
    NoPendingFile,

    #[error("An upload is already in progress.")]
    AlreadyLoading,

    /// The selected file failed validation; carries the validator's reason.
    #[error("{0}")]
    InvalidFile(String),
}
