use async_trait::async_trait;
use coderbot_types::Turn;
use serde::Serialize;
use tracing::debug;

use crate::client::{ensure_success, InferenceClient};
use crate::config::BackendType;
use crate::error::LlmError;
use crate::fragment::{decode_fragment, frame_fragments, Fragment, FragmentStream, Framing};
use crate::models::responses::ModelList;
use crate::models::ChatRequest;

/// OpenAI-compatible request body
#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [Turn],
    stream: bool,
    temperature: f32,
    max_tokens: u32,
}

/// Client for OpenAI-compatible servers such as llama.cpp's `llama-server`
/// (`/v1/chat/completions`, SSE streaming)
pub struct OpenAiCompatClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
    verbose: bool,
}

impl OpenAiCompatClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: crate::config::normalize_base_url(&base_url.into()),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client: reqwest::Client::new(),
            verbose: false,
        }
    }

    /// Print request/response details to stderr
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn models_url(&self) -> String {
        format!("{}/v1/models", self.base_url)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn post_completion(
        &self,
        request: &ChatRequest,
        stream: bool,
    ) -> Result<reqwest::Response, LlmError> {
        // num_ctx is a server-side launch option here; only max_tokens travels
        let body = CompletionBody {
            model: &request.model,
            messages: &request.messages,
            stream,
            temperature: request.options.temperature,
            max_tokens: request.options.num_predict,
        };
        let url = self.chat_completions_url();
        coderbot_logging::log_request(&url, &body, self.verbose);
        debug!(model = %request.model, messages = request.messages.len(), stream, "POST {}", url);

        let response = self
            .authorized(self.client.post(&url))
            .json(&body)
            .send()
            .await?;
        ensure_success(response, self.verbose).await
    }
}

#[async_trait]
impl InferenceClient for OpenAiCompatClient {
    fn backend(&self) -> BackendType {
        BackendType::OpenAi
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn chat(&self, request: &ChatRequest) -> Result<Fragment, LlmError> {
        let response = self.post_completion(request, false).await?;
        let body = response.text().await?;
        let mut fragment = decode_fragment(&body)?;
        fragment.done = true;
        Ok(fragment)
    }

    async fn chat_streaming(&self, request: &ChatRequest) -> Result<FragmentStream, LlmError> {
        let response = self.post_completion(request, true).await?;
        Ok(frame_fragments(
            response.bytes_stream(),
            Framing::Sse,
            self.verbose,
        ))
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let response = self
            .authorized(self.client.get(self.models_url()))
            .send()
            .await?;
        let response = ensure_success(response, self.verbose).await?;
        let list: ModelList = response
            .json()
            .await
            .map_err(|e| LlmError::decode(format!("Unexpected /v1/models response: {}", e)))?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }
}
