use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::parser::ParseError;
use crate::llm_client::LlmError;
use crate::render::RenderError;

pub const FILE_TOO_LARGE_MESSAGE: &str = "File too large. Maximum size is 5MB.";

/// Failure of one stage of the resume pipeline.
///
/// The `Display` text is what the client sees as `details` (or as the per-file
/// `error` in bulk analysis), so every variant carries the underlying cause.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("AI analysis failed: {0}")]
    Analysis(#[source] LlmError),

    #[error("Resume generation failed: {0}")]
    Generation(#[source] LlmError),

    #[error("Keyword extraction failed: {0}")]
    Keywords(#[source] LlmError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid request fields.
    #[error("{0}")]
    ClientInput(String),

    #[error("File too large. Maximum size is 5MB.")]
    FileTooLarge,

    #[error("Route not found")]
    RouteNotFound,

    /// A pipeline stage failed; `summary` names the workflow, `source` the cause.
    #[error("{summary}: {source}")]
    Stage {
        summary: &'static str,
        #[source]
        source: PipelineError,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn client(message: impl Into<String>) -> Self {
        AppError::ClientInput(message.into())
    }

    pub fn stage(summary: &'static str, source: impl Into<PipelineError>) -> Self {
        AppError::Stage {
            summary,
            source: source.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::ClientInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::FileTooLarge => (
                StatusCode::BAD_REQUEST,
                json!({ "error": FILE_TOO_LARGE_MESSAGE }),
            ),
            AppError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Route not found" }),
            ),
            AppError::Stage { summary, source } => {
                tracing::error!("{summary}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": summary, "details": source.to_string() }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
