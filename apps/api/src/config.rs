use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_LLM_API_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_LLM_MODEL: &str = "llama3-70b-8192";

/// Application configuration loaded from environment variables.
/// Startup fails if the provider credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub port: u16,
    /// Externally reachable base URL, as the browser client sees it.
    pub public_base_url: String,
    pub upload_dir: PathBuf,
    pub render_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let timeout_secs = lookup("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|| "120".to_string())
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            groq_api_key: lookup("GROQ_API_KEY")
                .filter(|v| !v.trim().is_empty())
                .context("Required environment variable 'GROQ_API_KEY' is not set")?,
            llm_api_url: lookup("LLM_API_URL")
                .unwrap_or_else(|| DEFAULT_LLM_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            llm_model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_timeout: Duration::from_secs(timeout_secs),
            port,
            public_base_url: lookup("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{port}"))
                .trim_end_matches('/')
                .to_string(),
            upload_dir: lookup("UPLOAD_DIR")
                .unwrap_or_else(|| "uploads".to_string())
                .into(),
            render_dir: lookup("RENDER_DIR")
                .unwrap_or_else(|| "temp".to_string())
                .into(),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
