//! Axum route handlers for resume analysis.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::models::{AnalysisResult, KeywordExtraction};
use crate::analysis::pipeline::{analyze_upload, extract_keywords, process_resume};
use crate::errors::AppError;
use crate::state::AppState;
use crate::uploads::{collect_upload_form, UploadSpec};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResumeResponse {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub customized_resume: String,
    pub original_resume: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSuggestionsRequest {
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkAnalyzeResponse {
    pub results: Vec<BulkAnalysisEntry>,
}

/// One file's outcome. Exactly one of `analysis` / `error` is present.
#[derive(Debug, Serialize)]
pub struct BulkAnalysisEntry {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub success: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/process-resume
///
/// multipart: `resume` (PDF/DOCX), `jobDescription`.
pub async fn handle_process_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProcessResumeResponse>, AppError> {
    let spec = UploadSpec::SINGLE_RESUME;
    let form = collect_upload_form(multipart, &state.config.upload_dir, spec).await?;
    let (mut files, job_description) = form.require(spec).await?;
    let Some(upload) = files.pop() else {
        return Err(AppError::client(spec.missing_files_message));
    };

    info!(
        "Processing resume {:?} ({} bytes)",
        upload.original_name(),
        upload.size()
    );

    let processed = process_resume(state.llm.as_ref(), upload, &job_description)
        .await
        .map_err(|e| AppError::stage("Failed to process resume", e))?;

    Ok(Json(ProcessResumeResponse {
        analysis: processed.analysis,
        customized_resume: processed.customized_resume,
        original_resume: processed.original_resume,
    }))
}

/// POST /api/keyword-suggestions
pub async fn handle_keyword_suggestions(
    State(state): State<AppState>,
    payload: Result<Json<KeywordSuggestionsRequest>, JsonRejection>,
) -> Result<Json<KeywordExtraction>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::client(e.body_text()))?;
    let job_description = request
        .job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::client("Job description is required"))?;

    let keywords = extract_keywords(state.llm.as_ref(), &job_description)
        .await
        .map_err(|e| AppError::stage("Failed to extract keywords", e))?;

    Ok(Json(keywords))
}

/// POST /api/bulk-analyze
///
/// multipart: up to 10 `resumes`, `jobDescription`. Files are processed one at
/// a time; a failing file becomes an error entry and the batch continues.
pub async fn handle_bulk_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BulkAnalyzeResponse>, AppError> {
    let spec = UploadSpec::BULK_RESUMES;
    let form = collect_upload_form(multipart, &state.config.upload_dir, spec).await?;
    let (files, job_description) = form.require(spec).await?;

    let total = files.len();
    let mut results = Vec::with_capacity(total);

    for (index, upload) in files.into_iter().enumerate() {
        let filename = upload.original_name().to_string();
        match analyze_upload(state.llm.as_ref(), upload, &job_description).await {
            Ok(analysis) => results.push(BulkAnalysisEntry {
                filename,
                analysis: Some(analysis),
                error: None,
                success: true,
            }),
            Err(e) => {
                warn!("Bulk analysis {}/{} failed for {:?}: {e}", index + 1, total, filename);
                results.push(BulkAnalysisEntry {
                    filename,
                    analysis: None,
                    error: Some(e.to_string()),
                    success: false,
                });
            }
        }
    }

    info!(
        "Bulk analysis finished: {}/{} succeeded",
        results.iter().filter(|r| r.success).count(),
        total
    );

    Ok(Json(BulkAnalyzeResponse { results }))
}
