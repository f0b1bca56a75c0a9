//! Plain-text resume → PDF.
//!
//! compose (sections, headings, ASCII only) → paginate (wrap + page breaks on
//! A4) → write (lopdf, standard Helvetica faces).

pub mod composer;
pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod pdf;

use thiserror::Error;

use composer::compose;
use layout::{paginate, PageGeometry};
use pdf::{write_pdf, DocumentInfo};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Error writing PDF: {0}")]
    Pdf(String),

    #[error("Error writing PDF file: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF rendering task failed: {0}")]
    Task(String),
}

/// Renders resume text into a complete PDF document. CPU-bound; async callers
/// should run it on the blocking pool.
pub fn render_resume_pdf(text: &str) -> Result<Vec<u8>, RenderError> {
    let geometry = PageGeometry::A4;
    let pages = paginate(&compose(text), &geometry);
    write_pdf(&pages, &geometry, &DocumentInfo::RESUME)
}
