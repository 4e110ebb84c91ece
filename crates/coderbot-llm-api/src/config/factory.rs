use std::sync::Arc;

use crate::client::{InferenceClient, OllamaClient, OpenAiCompatClient};
use crate::config::BackendType;

/// Client factory for creating inference clients
pub struct ClientFactory;

impl ClientFactory {
    /// Create a client for the given backend
    ///
    /// # Arguments
    /// * `backend` - Wire protocol to speak
    /// * `api_url` - Server URL (uses the backend default if None)
    /// * `api_key` - Bearer token, only sent to OpenAI-compatible servers
    /// * `verbose` - Print request/response details to stderr
    pub fn create(
        backend: BackendType,
        api_url: Option<String>,
        api_key: Option<String>,
        verbose: bool,
    ) -> Arc<dyn InferenceClient> {
        let url = api_url.unwrap_or_else(|| backend.default_url().to_string());
        match backend {
            BackendType::Ollama => Arc::new(OllamaClient::new(url).with_verbose(verbose)),
            BackendType::OpenAi => {
                Arc::new(OpenAiCompatClient::new(url, api_key).with_verbose(verbose))
            }
        }
    }

    /// Guess the backend from the URL: Ollama's port or an `/api/` path means
    /// Ollama, a `/v1` path or any other port means OpenAI-compatible.
    pub fn detect_backend(api_url: Option<&str>) -> BackendType {
        match api_url {
            None => BackendType::Ollama,
            Some(url) => {
                if url.contains(":11434") || url.contains("/api/") {
                    BackendType::Ollama
                } else if url.contains("/v1") || reqwest::Url::parse(url).ok().and_then(|u| u.port()).is_some() {
                    BackendType::OpenAi
                } else {
                    BackendType::Ollama
                }
            }
        }
    }
}
