//! Test doubles and fixtures shared by module tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::config::Config;
use crate::llm_client::{ChatModel, ChatRequest, CompletionParams, LlmError};
use crate::state::AppState;

type Responder = dyn Fn(&ChatRequest<'_>) -> Result<String, LlmError> + Send + Sync;

/// An owned copy of a request the double received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub system: String,
    pub user: String,
    pub params: CompletionParams,
}

/// A `ChatModel` that answers from a closure and records what it was asked.
pub struct ScriptedModel {
    responder: Box<Responder>,
    calls: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedModel {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&ChatRequest<'_>) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(RecordedRequest {
            system: request.system.to_string(),
            user: request.user.to_string(),
            params: request.params,
        });
        (self.responder)(&request)
    }
}

/// A model reply containing a complete, valid analysis object.
pub fn analysis_reply(ats_score: u8) -> String {
    json!({
        "atsScore": ats_score,
        "matchedKeywords": ["Rust", "Tokio"],
        "missingKeywords": ["Kubernetes"],
        "skillGaps": [
            {"skill": "Kubernetes", "importance": "High", "suggestion": "Mention the k8s migration"}
        ],
        "suggestions": ["Quantify latency improvements"],
        "improvementAreas": {"technical": 80, "experience": 75, "keywords": 60, "formatting": 90},
        "enhancedSections": {
            "summary": "Backend engineer shipping Rust services.",
            "skills": ["Rust", "Tokio", "Kubernetes"],
            "experience": "Lead with the payments platform work.",
            "achievements": ["Reduced p99 latency by 40%"]
        }
    })
    .to_string()
}

pub fn test_config(dir: &Path) -> Config {
    let upload_dir = dir.join("uploads");
    let render_dir = dir.join("temp");
    std::fs::create_dir_all(&upload_dir).unwrap();
    std::fs::create_dir_all(&render_dir).unwrap();
    Config {
        groq_api_key: "gsk_test".to_string(),
        llm_api_url: "http://127.0.0.1:9".to_string(),
        llm_model: "llama3-70b-8192".to_string(),
        llm_timeout: Duration::from_secs(5),
        port: 5000,
        public_base_url: "http://localhost:5000".to_string(),
        upload_dir,
        render_dir,
        rust_log: "debug".to_string(),
    }
}

pub fn test_state(dir: &Path, llm: Arc<ScriptedModel>) -> AppState {
    AppState {
        llm,
        config: test_config(dir),
    }
}

pub const BOUNDARY: &str = "cvcraft-test-boundary";

/// Hand-built multipart/form-data body.
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.bytes
    }

    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }
}

/// Number of entries left in a directory.
pub fn dir_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
