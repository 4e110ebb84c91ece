use std::fmt;
use std::str::FromStr;

pub mod factory;
pub use factory::ClientFactory;

/// Wire protocol of the inference server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendType {
    /// Ollama's native API
    #[default]
    Ollama,
    /// OpenAI-compatible API (llama.cpp server, LM Studio, vLLM, ...)
    OpenAi,
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
        }
    }

    /// Where the server listens when started with its defaults
    pub fn default_url(&self) -> &'static str {
        match self {
            Self::Ollama => DEFAULT_OLLAMA_URL,
            Self::OpenAi => DEFAULT_OPENAI_COMPAT_URL,
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" | "openai-compat" | "llama" | "llamacpp" | "llama.cpp" | "llama-cpp" => {
                Ok(Self::OpenAi)
            }
            other => Err(format!(
                "unknown backend '{}' (expected ollama or openai)",
                other
            )),
        }
    }
}

/// Default Ollama URL
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default llama.cpp server URL
pub const DEFAULT_OPENAI_COMPAT_URL: &str = "http://localhost:8080";

/// Strip trailing slashes and any endpoint path a user pasted with the URL
pub fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim().trim_end_matches('/').to_string();
    for suffix in ["/v1/chat/completions", "/api/chat", "/api/generate", "/v1"] {
        if let Some(stripped) = url.strip_suffix(suffix) {
            url = stripped.trim_end_matches('/').to_string();
            break;
        }
    }
    url
}
