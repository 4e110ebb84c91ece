#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use coderbot_chat::{DisplaySurface, CURSOR};
use coderbot_llm_api::{
    BackendType, ChatRequest, Fragment, FragmentStream, InferenceClient, LlmError,
};
use coderbot_types::{Role, Turn};
use futures::stream;

/// What the fake service does for the next call
pub enum Script {
    Stream(Vec<Result<Fragment, LlmError>>),
    Reply(Fragment),
    Fail(LlmError),
}

/// Inference client that plays back canned replies and records requests
#[derive(Default)]
pub struct ScriptedClient {
    script: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    pub fn new(script: Vec<Script>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn streaming(pieces: &[&str]) -> Self {
        let items = pieces.iter().map(|p| Ok(Fragment::text(*p))).collect();
        Self::new(vec![Script::Stream(items)])
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self, request: &ChatRequest) -> Script {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left")
    }
}

#[async_trait]
impl InferenceClient for ScriptedClient {
    fn backend(&self) -> BackendType {
        BackendType::Ollama
    }

    fn base_url(&self) -> &str {
        "http://scripted"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<Fragment, LlmError> {
        match self.next(request) {
            Script::Reply(fragment) => Ok(fragment),
            Script::Fail(error) => Err(error),
            Script::Stream(_) => panic!("streamed script used for a non-streaming call"),
        }
    }

    async fn chat_streaming(&self, request: &ChatRequest) -> Result<FragmentStream, LlmError> {
        let items = match self.next(request) {
            Script::Stream(items) => items,
            Script::Reply(fragment) => vec![Ok(fragment)],
            Script::Fail(error) => return Err(error),
        };
        let fragments: FragmentStream = Box::pin(stream::iter(items));
        Ok(fragments)
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        Ok(vec!["codegemma:2b".to_string()])
    }
}

/// Everything the chat core pushed, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Turn(Role, String),
    Partial(String),
    Warning(String),
    Error(String, String),
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub shown: Vec<Shown>,
}

impl RecordingDisplay {
    /// Incremental updates with the cursor removed
    pub fn partials(&self) -> Vec<String> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Partial(p) => Some(p.trim_end_matches(CURSOR).to_string()),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Warning(w) => Some(w.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<(&str, &str)> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Error(e, h) => Some((e.as_str(), h.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl DisplaySurface for RecordingDisplay {
    fn push(&mut self, role: Role, text: &str) {
        self.shown.push(Shown::Turn(role, text.to_string()));
    }

    fn push_incremental(&mut self, partial: &str) {
        self.shown.push(Shown::Partial(partial.to_string()));
    }

    fn push_warning(&mut self, text: &str) {
        self.shown.push(Shown::Warning(text.to_string()));
    }

    fn push_error(&mut self, text: &str, hint: &str) {
        self.shown
            .push(Shown::Error(text.to_string(), hint.to_string()));
    }
}

pub fn alternating_log(n: usize) -> Vec<Turn> {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                Turn::user(format!("q{}", i))
            } else {
                Turn::assistant(format!("a{}", i))
            }
        })
        .collect()
}
