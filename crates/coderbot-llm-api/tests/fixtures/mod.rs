#![allow(dead_code)]

use coderbot_llm_api::{ChatOptions, ChatRequest};
use coderbot_types::Turn;
use serde_json::json;
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock inference server for testing the backend clients
pub struct InferenceMockServer {
    server: MockServer,
}

impl InferenceMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Mock an Ollama `/api/chat` stream that emits `pieces` then a done line
    pub async fn mock_ollama_stream(&self, pieces: &[&str]) {
        let mut body = String::new();
        for piece in pieces {
            body.push_str(
                &json!({
                    "model": "codegemma:2b",
                    "message": {"role": "assistant", "content": piece},
                    "done": false
                })
                .to_string(),
            );
            body.push('\n');
        }
        body.push_str(
            &json!({
                "model": "codegemma:2b",
                "message": {"role": "assistant", "content": ""},
                "done": true,
                "prompt_eval_count": 20,
                "eval_count": pieces.len()
            })
            .to_string(),
        );
        body.push('\n');

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({"stream": true})))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock a complete (non-streamed) Ollama `/api/chat` reply
    pub async fn mock_ollama_complete(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({"stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "codegemma:2b",
                "message": {"role": "assistant", "content": content},
                "done": true,
                "prompt_eval_count": 12,
                "eval_count": 8
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock the 404 Ollama returns for a model that was never pulled
    pub async fn mock_ollama_model_missing(&self, model: &str) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": format!("model \"{}\" not found, try pulling it first", model)
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a stream that starts normally and then reports an in-band error
    pub async fn mock_ollama_stream_error(&self, first: &str, error: &str) {
        let body = format!(
            "{}\n{}\n",
            json!({"message": {"role": "assistant", "content": first}, "done": false}),
            json!({"error": error})
        );
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_ollama_tags(&self, names: &[&str]) {
        let models: Vec<_> = names
            .iter()
            .map(|n| json!({"name": n, "size": 1_600_000_000u64}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": models})))
            .mount(&self.server)
            .await;
    }

    /// Mock an OpenAI-compatible SSE stream, optionally requiring a bearer token
    pub async fn mock_openai_stream(&self, pieces: &[&str], api_key: Option<&str>) {
        let mut body = String::new();
        for piece in pieces {
            body.push_str(&format!(
                "data: {}\n\n",
                json!({
                    "id": "chatcmpl-1",
                    "object": "chat.completion.chunk",
                    "choices": [{"index": 0, "delta": {"content": piece}, "finish_reason": null}]
                })
            ));
        }
        body.push_str(&format!(
            "data: {}\n\n",
            json!({
                "id": "chatcmpl-1",
                "object": "chat.completion.chunk",
                "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]
            })
        ));
        body.push_str("data: [DONE]\n\n");

        let mut mock = Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({"stream": true})));
        if let Some(key) = api_key {
            mock = mock.and(header("authorization", format!("Bearer {}", key).as_str()));
        }
        mock.respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_openai_complete(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({"stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-2",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 9, "completion_tokens": 4, "total_tokens": 13}
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_openai_error(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {"message": message, "type": "server_error"}
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_openai_models(&self, ids: &[&str]) {
        let data: Vec<_> = ids
            .iter()
            .map(|id| json!({"id": id, "object": "model", "owned_by": "llamacpp"}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"object": "list", "data": data})),
            )
            .mount(&self.server)
            .await;
    }
}

/// Request for a two-turn context, as the chat core would build it
pub fn sample_request(model: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            Turn::system("You are a coding assistant."),
            Turn::user("Print hello in Python"),
        ],
        stream: true,
        options: ChatOptions {
            temperature: 0.3,
            num_ctx: 4096,
            num_predict: 1024,
        },
    }
}
