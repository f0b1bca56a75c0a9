//! POST /api/generate-pdf

use std::io::{Seek, Write};
use std::path::Path;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use futures::StreamExt;
use serde::Deserialize;
use tempfile::{NamedTempFile, TempPath};
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::render::{render_resume_pdf, RenderError};
use crate::state::AppState;

const DEFAULT_FILENAME: &str = "customized-resume";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePdfRequest {
    pub resume_content: Option<String>,
    pub filename: Option<String>,
}

/// Owns the rendered file on disk; removing it when the response body is dropped.
struct RenderedDocument {
    path: Option<TempPath>,
}

impl Drop for RenderedDocument {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let shown = path.display().to_string();
            match path.close() {
                Ok(()) => debug!("Removed rendered PDF {shown}"),
                Err(e) => warn!("Failed to remove rendered PDF {shown}: {e}"),
            }
        }
    }
}

pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePdfRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::client(e.body_text()))?;
    let resume_content = request
        .resume_content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::client("Resume content is required"))?;
    let filename = sanitize_filename(request.filename.as_deref());

    let render_dir = state.config.render_dir.clone();
    let prefix = format!("{filename}-{}-", chrono::Utc::now().timestamp_millis());
    let (temp, size) = tokio::task::spawn_blocking(move || {
        render_to_temp_file(&resume_content, &render_dir, &prefix)
    })
    .await
    .map_err(|e| RenderError::Task(e.to_string()))
    .and_then(|r| r)
    .map_err(|e| AppError::stage("Failed to generate PDF", e))?;

    let (file, path) = temp.into_parts();
    info!("Rendered {filename}.pdf ({size} bytes) at {}", path.display());

    let guard = RenderedDocument { path: Some(path) };
    let stream = ReaderStream::new(tokio::fs::File::from_std(file)).map(move |chunk| {
        let _keep = &guard;
        chunk
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}.pdf\""),
        )
        .header(header::CONTENT_LENGTH, size)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(e.into()))
}

/// Renders into a named temp file under `render_dir`, rewound for reading.
fn render_to_temp_file(
    text: &str,
    render_dir: &Path,
    prefix: &str,
) -> Result<(NamedTempFile, u64), RenderError> {
    let bytes = render_resume_pdf(text)?;
    let mut temp = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".pdf")
        .tempfile_in(render_dir)?;
    temp.write_all(&bytes)?;
    temp.flush()?;
    temp.rewind()?;
    Ok((temp, bytes.len() as u64))
}

/// Restricts a client-supplied download name to `[A-Za-z0-9._-]`.
fn sanitize_filename(raw: Option<&str>) -> String {
    let cleaned: String = raw
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .take(100)
        .collect();
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}
