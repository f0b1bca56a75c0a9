//! Resume pipeline. Sequences extraction, prompting, the model call and parsing.
//!
//! Flow for a full run: extract (file removed) → analysis prompt → model →
//! parse AnalysisResult → generation prompt → model → customized resume text.

use tracing::info;

use crate::analysis::models::{AnalysisResult, KeywordExtraction};
use crate::analysis::prompts::{
    build_analysis_prompt, build_generation_prompt, build_keywords_prompt, ANALYSIS_SYSTEM,
    GENERATION_SYSTEM, KEYWORDS_SYSTEM,
};
use crate::errors::PipelineError;
use crate::llm_client::parser::parse_json_object;
use crate::llm_client::{ChatModel, ChatRequest, CompletionParams};
use crate::uploads::UploadedFile;

/// Output of the single-resume workflow.
#[derive(Debug, Clone)]
pub struct ProcessedResume {
    pub analysis: AnalysisResult,
    pub customized_resume: String,
    pub original_resume: String,
}

pub async fn analyze_resume(
    llm: &dyn ChatModel,
    resume_text: &str,
    job_description: &str,
) -> Result<AnalysisResult, PipelineError> {
    let prompt = build_analysis_prompt(resume_text, job_description);
    let reply = llm
        .complete(ChatRequest {
            system: ANALYSIS_SYSTEM,
            user: &prompt,
            params: CompletionParams::ANALYSIS,
        })
        .await
        .map_err(PipelineError::Analysis)?;

    let analysis: AnalysisResult = parse_json_object(&reply)?;
    info!(
        "Analysis complete: atsScore={}, matched={}, missing={}",
        analysis.ats_score,
        analysis.matched_keywords.len(),
        analysis.missing_keywords.len()
    );
    Ok(analysis)
}

pub async fn generate_customized_resume(
    llm: &dyn ChatModel,
    resume_text: &str,
    job_description: &str,
    analysis: &AnalysisResult,
) -> Result<String, PipelineError> {
    let prompt = build_generation_prompt(resume_text, job_description, analysis);
    let reply = llm
        .complete(ChatRequest {
            system: GENERATION_SYSTEM,
            user: &prompt,
            params: CompletionParams::GENERATION,
        })
        .await
        .map_err(PipelineError::Generation)?;

    let customized = reply.trim().to_string();
    info!("Generated customized resume ({} chars)", customized.len());
    Ok(customized)
}

pub async fn extract_keywords(
    llm: &dyn ChatModel,
    job_description: &str,
) -> Result<KeywordExtraction, PipelineError> {
    let prompt = build_keywords_prompt(job_description);
    let reply = llm
        .complete(ChatRequest {
            system: KEYWORDS_SYSTEM,
            user: &prompt,
            params: CompletionParams::KEYWORDS,
        })
        .await
        .map_err(PipelineError::Keywords)?;

    Ok(parse_json_object(&reply)?)
}

/// Extract → analyze → generate for one uploaded resume.
pub async fn process_resume(
    llm: &dyn ChatModel,
    upload: UploadedFile,
    job_description: &str,
) -> Result<ProcessedResume, PipelineError> {
    let original_resume = upload.extract_and_discard().await?;
    let analysis = analyze_resume(llm, &original_resume, job_description).await?;
    let customized_resume =
        generate_customized_resume(llm, &original_resume, job_description, &analysis).await?;

    Ok(ProcessedResume {
        analysis,
        customized_resume,
        original_resume,
    })
}

/// Extract → analyze for one file of a bulk request.
pub async fn analyze_upload(
    llm: &dyn ChatModel,
    upload: UploadedFile,
    job_description: &str,
) -> Result<AnalysisResult, PipelineError> {
    let resume_text = upload.extract_and_discard().await?;
    analyze_resume(llm, &resume_text, job_description).await
}
