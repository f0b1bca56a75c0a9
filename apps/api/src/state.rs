use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no mutable data; requests share nothing but the filesystem.
#[derive(Clone)]
pub struct AppState {
    /// Model gateway. `LlmClient` in production, a scripted double in tests.
    pub llm: Arc<dyn ChatModel>,
    pub config: Config,
}
