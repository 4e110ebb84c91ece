//! # coderbot-llm-api
//!
//! Adapter for locally hosted inference servers:
//! - Ollama (native `/api/chat`, NDJSON streaming)
//! - OpenAI-compatible servers such as llama.cpp (`/v1/chat/completions`, SSE)
//!
//! Every response shape is normalized into [`Fragment`] at this boundary.
//!
//! ## Example
//!
//! ```rust,no_run
//! use coderbot_llm_api::{BackendType, ChatOptions, ChatRequest, ClientFactory};
//! use coderbot_types::Turn;
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ClientFactory::create(BackendType::Ollama, None, None, false);
//!     let request = ChatRequest {
//!         model: "codegemma:2b".to_string(),
//!         messages: vec![Turn::user("Write hello world in Go")],
//!         stream: true,
//!         options: ChatOptions { temperature: 0.3, num_ctx: 4096, num_predict: 512 },
//!     };
//!
//!     let mut stream = client.chat_streaming(&request).await?;
//!     while let Some(fragment) = stream.next().await {
//!         if let Some(text) = fragment?.text {
//!             print!("{}", text);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fragment;
pub mod models;


pub use client::{InferenceClient, OllamaClient, OpenAiCompatClient};
pub use config::{
    normalize_base_url, BackendType, ClientFactory, DEFAULT_OLLAMA_URL,
    DEFAULT_OPENAI_COMPAT_URL,
};
pub use error::{LlmError, LlmErrorKind};
pub use fragment::{decode_fragment, decode_line, frame_fragments, Fragment, FragmentStream, Framing};
pub use models::{ChatOptions, ChatRequest, TokenUsage};
