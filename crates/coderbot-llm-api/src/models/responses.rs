use serde::{Deserialize, Serialize};

/// Token usage information reported with the final fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_total_saturates() {
        let usage = TokenUsage::new(u32::MAX, 7);
        assert_eq!(usage.total_tokens, u32::MAX);
        assert_eq!(TokenUsage::new(12, 30).total_tokens, 42);
    }
}

// ============================================================================
// Wire shapes
// ============================================================================
//
// Every shape a response object can take. Decoding tries them in order and
// the first that fits wins; unknown fields are ignored.

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawFragment {
    /// `{"error": ...}` reported in-band by the server
    Error { error: serde_json::Value },
    /// Ollama `/api/chat`: `{"message": {"content": ...}, "done": ...}`
    Chat {
        message: RawMessage,
        #[serde(default)]
        done: bool,
        #[serde(default)]
        prompt_eval_count: Option<u32>,
        #[serde(default)]
        eval_count: Option<u32>,
    },
    /// OpenAI-compatible: `{"choices": [{"delta"|"message": {"content": ...}}]}`
    Completion {
        choices: Vec<RawChoice>,
        #[serde(default)]
        usage: Option<RawUsage>,
    },
    /// Ollama `/api/generate`: `{"response": ..., "done": ...}`
    Generate {
        response: String,
        #[serde(default)]
        done: bool,
    },
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawChoice {
    #[serde(default)]
    pub delta: Option<RawMessage>,
    #[serde(default)]
    pub message: Option<RawMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Ollama `/api/tags`
#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagEntry {
    pub name: String,
}

/// OpenAI-compatible `/v1/models`
#[derive(Debug, Deserialize)]
pub(crate) struct ModelList {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelEntry {
    pub id: String,
}
