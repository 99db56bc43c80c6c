#![allow(dead_code)]

use std::path::Path;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// Assigned to files whose extension is not recognised; always rejected.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

pub const INVALID_FILE_TYPE_MESSAGE: &str = "Invalid file type. Please upload a PDF or DOCX file.";

/// Extensions offered by the file picker.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accepted,
    Rejected(String),
}

impl Validation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Validation::Accepted)
    }
}

/// Classifies a declared media type.
///
/// Accepted iff it is exactly the PDF or DOCX media type. Pure: no I/O.
pub fn validate(media_type: &str) -> Validation {
    if media_type == PDF_MEDIA_TYPE || media_type == DOCX_MEDIA_TYPE {
        Validation::Accepted
    } else {
        Validation::Rejected(INVALID_FILE_TYPE_MESSAGE.to_string())
    }
}

/// Declared media type for a local file, derived from its extension
/// (case-insensitive).
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => PDF_MEDIA_TYPE,
        Some("docx") => DOCX_MEDIA_TYPE,
        _ => UNKNOWN_MEDIA_TYPE,
    }
}
