use coderbot_types::Turn;
use serde::{Deserialize, Serialize};

/// Sampling and sizing options sent with every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    pub temperature: f32,
    /// Context window size in tokens
    pub num_ctx: u32,
    /// Maximum number of tokens to generate
    pub num_predict: u32,
}

/// Chat request, in the shape of Ollama's `/api/chat` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub stream: bool,
    pub options: ChatOptions,
}

impl ChatRequest {
    /// Copy of this request with the stream flag forced
    pub fn with_stream(&self, stream: bool) -> Self {
        Self {
            stream,
            ..self.clone()
        }
    }
}
