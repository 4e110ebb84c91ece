use async_trait::async_trait;
use tracing::debug;

use crate::client::{ensure_success, InferenceClient};
use crate::config::BackendType;
use crate::error::LlmError;
use crate::fragment::{decode_fragment, frame_fragments, Fragment, FragmentStream, Framing};
use crate::models::responses::TagsResponse;
use crate::models::ChatRequest;

/// Ollama server client (`/api/chat`, NDJSON streaming)
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
    verbose: bool,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: crate::config::normalize_base_url(&base_url.into()),
            client: reqwest::Client::new(),
            verbose: false,
        }
    }

    /// Print request/response details to stderr
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    async fn post_chat(&self, body: &ChatRequest) -> Result<reqwest::Response, LlmError> {
        let url = self.chat_url();
        coderbot_logging::log_request(&url, body, self.verbose);
        debug!(model = %body.model, messages = body.messages.len(), stream = body.stream, "POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        ensure_success(response, self.verbose).await
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    fn backend(&self) -> BackendType {
        BackendType::Ollama
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn chat(&self, request: &ChatRequest) -> Result<Fragment, LlmError> {
        let response = self.post_chat(&request.with_stream(false)).await?;
        let body = response.text().await?;
        let mut fragment = decode_fragment(&body)?;
        fragment.done = true;
        Ok(fragment)
    }

    async fn chat_streaming(&self, request: &ChatRequest) -> Result<FragmentStream, LlmError> {
        let response = self.post_chat(&request.with_stream(true)).await?;
        Ok(frame_fragments(
            response.bytes_stream(),
            Framing::Ndjson,
            self.verbose,
        ))
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let response = self.client.get(self.tags_url()).send().await?;
        let response = ensure_success(response, self.verbose).await?;
        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::decode(format!("Unexpected /api/tags response: {}", e)))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}
