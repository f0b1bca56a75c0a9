//! Resume analysis: ATS scoring, tailored rewrites and keyword extraction.

pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
