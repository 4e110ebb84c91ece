//! Normalized response fragments and the decoding that produces them.
//!
//! The inference service can answer in several JSON shapes depending on the
//! backend and endpoint. All shape detection happens here, so the chat core
//! only ever sees [`Fragment`].

use futures::{Stream, StreamExt};
use std::fmt::Display;
use std::pin::Pin;

use crate::error::{error_value_message, LlmError};
use crate::models::responses::{RawChoice, RawFragment};
use crate::models::TokenUsage;

/// One incremental piece of model output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    /// Text delta; `None` when the fragment carries no usable text
    pub text: Option<String>,
    /// Set on the last fragment of a reply
    pub done: bool,
    pub usage: Option<TokenUsage>,
}

impl Fragment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A fragment with nothing in it
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn finished(usage: Option<TokenUsage>) -> Self {
        Self {
            text: None,
            done: true,
            usage,
        }
    }
}

/// Lazy sequence of fragments for one streamed reply
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<Fragment, LlmError>> + Send>>;

/// Decode one JSON response object into a [`Fragment`].
///
/// Unrecognised or malformed input yields a blank fragment. The only error is
/// an in-band `{"error": ...}` object, which is a failure of the service itself.
pub fn decode_fragment(json: &str) -> Result<Fragment, LlmError> {
    let raw = match serde_json::from_str::<RawFragment>(json) {
        Ok(raw) => raw,
        Err(_) => return Ok(Fragment::blank()),
    };

    match raw {
        RawFragment::Error { error } => Err(LlmError::service(
            error_value_message(&error).unwrap_or_else(|| "unknown server error".to_string()),
        )),
        RawFragment::Chat {
            message,
            done,
            prompt_eval_count,
            eval_count,
        } => {
            let usage = if done && (prompt_eval_count.is_some() || eval_count.is_some()) {
                Some(TokenUsage::new(
                    prompt_eval_count.unwrap_or(0),
                    eval_count.unwrap_or(0),
                ))
            } else {
                None
            };
            Ok(Fragment {
                text: message.content,
                done,
                usage,
            })
        }
        RawFragment::Completion { choices, usage } => {
            let usage = usage.map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens));
            Ok(match choices.into_iter().next() {
                Some(RawChoice {
                    delta,
                    message,
                    finish_reason,
                }) => Fragment {
                    text: delta.or(message).and_then(|m| m.content),
                    done: finish_reason.is_some(),
                    usage,
                },
                None => Fragment {
                    usage,
                    ..Fragment::blank()
                },
            })
        }
        RawFragment::Generate { response, done } => Ok(Fragment {
            text: Some(response),
            done,
            usage: None,
        }),
    }
}

/// How a streamed body is split into response objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// One JSON object per line (Ollama)
    Ndjson,
    /// Server-sent events, `data: {...}` lines ending with `data: [DONE]`
    Sse,
}

/// Decode one line of a streamed body. Returns `None` for lines that carry
/// no response object (blank lines, SSE comments and event names).
pub fn decode_line(framing: Framing, line: &str) -> Option<Result<Fragment, LlmError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match framing {
        Framing::Ndjson => Some(decode_fragment(line)),
        Framing::Sse => {
            let data = line.strip_prefix("data:")?.trim_start();
            if data == "[DONE]" {
                return Some(Ok(Fragment::finished(None)));
            }
            Some(decode_fragment(data))
        }
    }
}

/// Turn a raw byte stream into a [`FragmentStream`].
///
/// Bytes are buffered until a full line is available so that multi-byte
/// characters split across network chunks survive. The stream ends after the
/// first `done` fragment, the first error, or the end of input.
pub fn frame_fragments<S, B, E>(bytes: S, framing: Framing, verbose: bool) -> FragmentStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut bytes = Box::pin(bytes);
        let mut buffer: Vec<u8> = Vec::new();
        let mut line_counter = 0usize;

        while let Some(chunk) = bytes.next().await {
            match chunk {
                Ok(chunk) => buffer.extend_from_slice(chunk.as_ref()),
                Err(e) => {
                    yield Err(LlmError::stream(format!("Error reading stream: {}", e)));
                    return;
                }
            }

            while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                let raw_line: Vec<u8> = buffer.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&raw_line);
                line_counter += 1;
                coderbot_logging::log_stream_chunk(line_counter, line.trim_end(), verbose);

                match decode_line(framing, &line) {
                    None => {}
                    Some(Ok(fragment)) => {
                        let done = fragment.done;
                        yield Ok(fragment);
                        if done {
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        }

        // Last line without a trailing newline
        if !buffer.is_empty() {
            let line = String::from_utf8_lossy(&buffer).into_owned();
            if let Some(item) = decode_line(framing, &line) {
                yield item;
            }
        }
    })
}
