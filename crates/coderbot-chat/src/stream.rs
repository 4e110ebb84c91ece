//! Folding a reply's fragments into the response buffer.

use coderbot_llm_api::{Fragment, FragmentStream, LlmError, TokenUsage};
use futures::StreamExt;
use tracing::debug;

use crate::display::DisplaySurface;
use crate::sanitize::sanitize;

/// Shown after the buffer while a reply is still streaming
pub const CURSOR: &str = "▌";

pub const EMPTY_RESPONSE_WARNING: &str =
    "The model returned an empty response. Try rephrasing the question or switch to a larger model (e.g. codegemma:7b).";

/// Where one request is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    Idle,
    AwaitingFirstFragment,
    Streaming,
    Completed,
    Empty,
    Failed,
}

impl StreamPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Empty | Self::Failed)
    }
}

/// Result of one consumed reply
#[derive(Debug, Clone)]
pub enum StreamOutcome {
    /// Sanitized, trimmed, non-empty reply text
    Completed {
        text: String,
        usage: Option<TokenUsage>,
    },
    Empty,
    Failed(LlmError),
}

/// Accumulates one reply and mirrors it to the display.
///
/// A consumer serves exactly one request; create a new one per submission.
pub struct StreamConsumer<'a> {
    display: &'a mut dyn DisplaySurface,
    buffer: String,
    usage: Option<TokenUsage>,
    phase: StreamPhase,
}

impl<'a> StreamConsumer<'a> {
    pub fn new(display: &'a mut dyn DisplaySurface) -> Self {
        Self {
            display,
            buffer: String::new(),
            usage: None,
            phase: StreamPhase::Idle,
        }
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// Text accumulated so far
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The request has been sent
    pub fn begin(&mut self) {
        if self.phase == StreamPhase::Idle {
            self.phase = StreamPhase::AwaitingFirstFragment;
        }
    }

    /// Take in one fragment. Fragments without text change nothing on screen.
    pub fn accept(&mut self, fragment: Fragment) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = StreamPhase::Streaming;
        if fragment.usage.is_some() {
            self.usage = fragment.usage;
        }

        let text = match fragment.text {
            Some(text) => sanitize(&text),
            None => return,
        };
        if text.is_empty() {
            return;
        }
        self.buffer.push_str(&text);
        self.display
            .push_incremental(&format!("{}{}", self.buffer, CURSOR));
    }

    /// End of input: settle on COMPLETED or EMPTY
    pub fn finish(&mut self) -> StreamOutcome {
        let text = sanitize(&self.buffer).trim().to_string();
        if text.is_empty() {
            self.phase = StreamPhase::Empty;
            self.display.push_warning(EMPTY_RESPONSE_WARNING);
            return StreamOutcome::Empty;
        }
        self.phase = StreamPhase::Completed;
        self.display.push(coderbot_types::Role::Assistant, &text);
        StreamOutcome::Completed {
            text,
            usage: self.usage,
        }
    }

    /// The service failed; whatever was buffered is discarded
    pub fn fail(&mut self, error: LlmError) -> StreamOutcome {
        debug!(kind = ?error.kind, buffered = self.buffer.len(), "reply failed");
        self.phase = StreamPhase::Failed;
        self.buffer.clear();
        self.display.push_error(&error.to_string(), error.hint());
        StreamOutcome::Failed(error)
    }

    /// Drive a whole fragment stream to its end
    pub async fn consume(&mut self, mut fragments: FragmentStream) -> StreamOutcome {
        self.begin();
        while let Some(item) = fragments.next().await {
            match item {
                Ok(fragment) => self.accept(fragment),
                Err(error) => return self.fail(error),
            }
        }
        self.finish()
    }
}
