//! Inference service error types

use thiserror::Error;

/// Failure of the inference service or its transport
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Connection, message)
    }

    pub fn model_not_found(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::ModelNotFound, message)
    }

    pub fn http(status: u16, body: &str) -> Self {
        let detail = extract_error_message(body).unwrap_or_else(|| body.trim().to_string());
        Self::new(LlmErrorKind::Http, format!("HTTP {}: {}", status, detail))
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Service, message)
    }

    pub fn stream(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Stream, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Decode, message)
    }

    /// Classify a non-success HTTP response
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = extract_error_message(body).unwrap_or_else(|| body.trim().to_string());
        if status == reqwest::StatusCode::NOT_FOUND && detail.contains("not found") {
            return Self::model_not_found(detail);
        }
        Self::http(status.as_u16(), body)
    }

    /// Remediation guidance shown to the user next to the error
    pub fn hint(&self) -> &'static str {
        self.kind.hint()
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::connection(format!("Cannot reach the inference server: {}", e))
        } else if e.is_decode() {
            Self::decode(e.to_string())
        } else if e.is_body() {
            Self::stream(e.to_string())
        } else {
            Self::service(e.to_string())
        }
    }
}

/// Error classification, used to pick the remediation hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Server not running or unreachable
    Connection,
    /// The requested model is not installed on the server
    ModelNotFound,
    /// Any other non-success HTTP status
    Http,
    /// The server reported an error in-band
    Service,
    /// The response stream broke off
    Stream,
    /// The response body could not be read as expected
    Decode,
}

impl LlmErrorKind {
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Connection => {
                "Make sure the inference server is running (e.g. `ollama serve`) and that --url points at it."
            }
            Self::ModelNotFound => {
                "Download the model first (e.g. `ollama pull codegemma:2b`) or pick an installed one with /models and /model <name>."
            }
            Self::Http => "Check the server URL and backend type (--backend ollama|openai).",
            Self::Service | Self::Stream => {
                "The server failed while generating. Retry, or switch to a smaller model if it ran out of memory."
            }
            Self::Decode => "The server answered in an unexpected format. Check --backend matches the server.",
        }
    }
}

/// Pull a human message out of `{"error": "..."}` or `{"error": {"message": "..."}}`
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    error_value_message(value.get("error")?)
}

pub(crate) fn error_value_message(error: &serde_json::Value) -> Option<String> {
    match error {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(|s| s.to_string()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
