//! Document intake — the file boundary. Everything that is not a small PDF or
//! plain-text file is rejected here, before it reaches the session or the model.

pub mod handlers;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// 5 MiB.
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Please upload a PDF or TXT file.";
pub const TOO_LARGE_MESSAGE: &str = "File size too large (Max 5MB).";
pub const EMPTY_FILE_MESSAGE: &str = "The uploaded file is empty.";

/// The allow-list of résumé formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Matches a MIME type, ignoring parameters such as `; charset=utf-8`.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let essence = mime_type.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/pdf" => Some(DocumentKind::Pdf),
            "text/plain" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::PlainText => "text/plain",
        }
    }
}

/// An accepted résumé file, owned by the session until the next upload.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub kind: DocumentKind,
    pub bytes: Bytes,
    pub uploaded_at: DateTime<Utc>,
    /// Decoded text for plain-text uploads, shown back on the upload screen.
    pub preview_text: Option<String>,
}

impl Document {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Validates an uploaded file and turns it into a `Document`.
///
/// The declared content type wins; a missing or generic one falls back to the
/// file extension. Type is checked before size, size before emptiness.
pub fn accept_upload(
    file_name: &str,
    content_type: Option<&str>,
    bytes: Bytes,
) -> Result<Document, AppError> {
    let kind = match content_type {
        Some(ct) if !is_generic_content_type(ct) => DocumentKind::from_mime(ct),
        _ => DocumentKind::from_file_name(file_name),
    }
    .ok_or_else(|| AppError::Validation(UNSUPPORTED_TYPE_MESSAGE.to_string()))?;

    if bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(AppError::Validation(TOO_LARGE_MESSAGE.to_string()));
    }
    if bytes.is_empty() {
        return Err(AppError::Validation(EMPTY_FILE_MESSAGE.to_string()));
    }

    let preview_text = match kind {
        DocumentKind::PlainText => Some(String::from_utf8_lossy(&bytes).into_owned()),
        DocumentKind::Pdf => None,
    };

    Ok(Document {
        file_name: file_name.to_string(),
        kind,
        bytes,
        uploaded_at: Utc::now(),
        preview_text,
    })
}

fn is_generic_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.is_empty() || essence.eq_ignore_ascii_case("application/octet-stream")
}
