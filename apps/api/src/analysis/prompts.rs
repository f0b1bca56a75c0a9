// All LLM prompt constants for the analysis module.
// Templates are filled with `fill_template`, which substitutes placeholders in a
// single pass so user-supplied text is embedded verbatim, even if it happens to
// contain a `{placeholder}` of its own.

use crate::analysis::models::AnalysisResult;
use crate::llm_client::prompts::JSON_OBJECT_INSTRUCTION;

pub const ANALYSIS_SYSTEM: &str = "You are an expert resume analyzer and career coach. \
    Provide detailed, actionable feedback to help job seekers optimize their resumes \
    for ATS systems and hiring managers.";

/// Replace: {resume_text}, {job_description}, {json_instruction}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume against the job description and provide a comprehensive analysis.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Provide the analysis as a JSON object with this EXACT schema:
{
  "atsScore": <integer between 0 and 100>,
  "matchedKeywords": [<keywords found in both the resume and the job description>],
  "missingKeywords": [<important job description keywords missing from the resume>],
  "skillGaps": [
    {
      "skill": "<skill name>",
      "importance": "<exactly one of: High, Medium, Low>",
      "suggestion": "<specific suggestion to close this gap>"
    }
  ],
  "suggestions": [<specific improvement suggestions>],
  "improvementAreas": {
    "technical": <integer 0-100>,
    "experience": <integer 0-100>,
    "keywords": <integer 0-100>,
    "formatting": <integer 0-100>
  },
  "enhancedSections": {
    "summary": "<improved professional summary>",
    "skills": [<enhanced skills list>],
    "experience": "<suggestions for the experience section>",
    "achievements": [<achievements worth highlighting>]
  }
}

Focus on:
1. ATS compatibility and keyword optimization
2. Skill alignment with job requirements
3. Experience relevance
4. Achievement quantification
5. Technical skill gaps
6. Industry-specific terminology

{json_instruction}"#;

pub const GENERATION_SYSTEM: &str = "You are an expert resume writer. \
    Create ATS-optimized, professional resumes that highlight candidate strengths \
    while incorporating job-specific keywords naturally.";

/// Replace: {resume_text}, {job_description}, {analysis_json}
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"Based on the following resume analysis and original resume, create an optimized version.

ORIGINAL RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

ANALYSIS:
{analysis_json}

Generate an improved resume that:
1. Incorporates missing keywords naturally
2. Enhances the professional summary
3. Quantifies achievements where possible
4. Improves ATS compatibility
5. Maintains the original structure but with optimizations

Return the customized resume as plain text in a clean, professional format.
Separate sections with a blank line and start each section with a heading that ends in a colon."#;

pub const KEYWORDS_SYSTEM: &str =
    "You are an expert at extracting relevant keywords from job descriptions for resume optimization.";

/// Replace: {job_description}, {json_instruction}
pub const KEYWORDS_PROMPT_TEMPLATE: &str = r#"Extract the most important keywords and skills from this job description:

{job_description}

Return a JSON object with this EXACT schema:
{
  "technical_skills": [<technical skills>],
  "soft_skills": [<soft skills>],
  "tools_technologies": [<tools and technologies>],
  "industry_keywords": [<industry-specific terms>],
  "certifications": [<relevant certifications mentioned>],
  "experience_keywords": [<experience-related keywords>]
}

{json_instruction}"#;

pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("resume_text", resume_text),
            ("job_description", job_description),
            ("json_instruction", JSON_OBJECT_INSTRUCTION),
        ],
    )
}

pub fn build_generation_prompt(
    resume_text: &str,
    job_description: &str,
    analysis: &AnalysisResult,
) -> String {
    // AnalysisResult is plain strings, lists and integers; serialization cannot fail.
    let analysis_json = serde_json::to_string_pretty(analysis).unwrap_or_default();
    fill_template(
        GENERATION_PROMPT_TEMPLATE,
        &[
            ("resume_text", resume_text),
            ("job_description", job_description),
            ("analysis_json", &analysis_json),
        ],
    )
}

pub fn build_keywords_prompt(job_description: &str) -> String {
    fill_template(
        KEYWORDS_PROMPT_TEMPLATE,
        &[
            ("job_description", job_description),
            ("json_instruction", JSON_OBJECT_INSTRUCTION),
        ],
    )
}

/// Substitutes `{name}` placeholders found in `template`. Braces that don't
/// form a known placeholder (the JSON schemas) are copied through unchanged.
fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = vars.iter().find(|(name, _)| {
            after
                .strip_prefix(name)
                .is_some_and(|tail| tail.starts_with('}'))
        });
        match placeholder {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
