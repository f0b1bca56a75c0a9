//! Text extraction: turns an uploaded PDF or DOCX on disk into plain text.
//!
//! Parsing is CPU-bound and runs inside `tokio::task::spawn_blocking`; a panic
//! inside a parser surfaces as an `ExtractionError`, never as a crashed request.

use std::path::Path;

use thiserror::Error;
use tracing::info;

pub mod docx;
pub mod pdf;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error extracting text from PDF: {0}")]
    Pdf(String),

    #[error("Error extracting text from DOCX: {0}")]
    Docx(String),

    #[error("Error reading uploaded file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported document type: {0}")]
    Unsupported(String),

    #[error("No text could be extracted from the document")]
    NoText,
}

/// The two document formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Maps a declared MIME type to a supported kind. Parameters such as
    /// `; charset=...` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(PDF_MIME) {
            Some(DocumentKind::Pdf)
        } else if essence.eq_ignore_ascii_case(DOCX_MIME) {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => PDF_MIME,
            DocumentKind::Docx => DOCX_MIME,
        }
    }
}

/// Extracts plain text from the file at `path`, dispatching on the declared MIME type.
pub async fn extract_text(path: &Path, declared_mime: &str) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_mime(declared_mime)
        .ok_or_else(|| ExtractionError::Unsupported(declared_mime.to_string()))?;

    let bytes = tokio::fs::read(path).await?;
    let size = bytes.len();

    let text = tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(&bytes),
        DocumentKind::Docx => docx::extract_docx_text(&bytes),
    })
    .await
    .map_err(|e| match kind {
        DocumentKind::Pdf => ExtractionError::Pdf(format!("parser aborted: {e}")),
        DocumentKind::Docx => ExtractionError::Docx(format!("parser aborted: {e}")),
    })??;

    if text.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }

    info!(
        "Extracted {} chars from {:?} document ({} bytes)",
        text.len(),
        kind,
        size
    );
    Ok(text)
}
