use async_trait::async_trait;

use crate::config::BackendType;
use crate::error::LlmError;
use crate::fragment::{Fragment, FragmentStream};
use crate::models::ChatRequest;

pub mod ollama;
pub mod openai;

pub use ollama::OllamaClient;
pub use openai::OpenAiCompatClient;

/// Inference client trait - unified interface for the supported local servers
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Which wire protocol this client speaks
    fn backend(&self) -> BackendType;

    /// Base URL of the server, without endpoint path
    fn base_url(&self) -> &str;

    /// Non-streaming chat: one complete reply, decoded like a final fragment
    async fn chat(&self, request: &ChatRequest) -> Result<Fragment, LlmError>;

    /// Streaming chat: a lazy sequence of fragments
    async fn chat_streaming(&self, request: &ChatRequest) -> Result<FragmentStream, LlmError>;

    /// Names of the models the server can run
    async fn list_models(&self) -> Result<Vec<String>, LlmError>;
}

/// Fail with a classified error unless the response status is a success
pub(crate) async fn ensure_success(
    response: reqwest::Response,
    verbose: bool,
) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error body".to_string());
    coderbot_logging::log_response(&status, &body, verbose);
    Err(LlmError::from_status(status, &body))
}
