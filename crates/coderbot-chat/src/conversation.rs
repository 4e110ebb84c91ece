//! One request/response cycle against the inference service.

use coderbot_llm_api::{ChatOptions, ChatRequest, InferenceClient, LlmError, TokenUsage};
use coderbot_types::{Role, Turn};
use thiserror::Error;
use tracing::{debug, info};

use crate::context::assemble;
use crate::display::DisplaySurface;
use crate::history::trim;
use crate::session::{ChatSettings, SessionState};
use crate::stream::{StreamConsumer, StreamOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyInput,
}

/// How a submitted turn ended
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// The assistant turn was appended to the log
    Completed {
        text: String,
        usage: Option<TokenUsage>,
    },
    /// Nothing usable came back; the log holds only the user turn
    Empty,
    /// The service failed; the log holds only the user turn
    Failed { error: LlmError },
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Send `user_text` and fold the reply into the session.
///
/// The history window is taken before the user turn is appended, so the new
/// question appears exactly once in the request. Service failures are shown
/// on `display` and returned as [`TurnOutcome::Failed`]; only blank input is
/// an error.
pub async fn submit_turn(
    session: &mut SessionState,
    settings: &ChatSettings,
    client: &dyn InferenceClient,
    display: &mut dyn DisplaySurface,
    user_text: &str,
) -> Result<TurnOutcome, ChatError> {
    let user_text = user_text.trim();
    if user_text.is_empty() {
        return Err(ChatError::EmptyInput);
    }

    let history = trim(session.log(), settings.max_history_pairs);
    session.append_turn(Turn::user(user_text));
    display.push(Role::User, user_text);

    let config = session.config();
    let request = ChatRequest {
        model: config.active_model.clone(),
        messages: assemble(config, history, user_text),
        stream: settings.stream,
        options: ChatOptions {
            temperature: config.temperature(),
            num_ctx: settings.context_window_size,
            num_predict: settings.max_output_tokens,
        },
    };
    debug!(
        model = %request.model,
        messages = request.messages.len(),
        stream = request.stream,
        "submitting turn"
    );

    let mut consumer = StreamConsumer::new(display);
    consumer.begin();
    let outcome = if settings.stream {
        match client.chat_streaming(&request).await {
            Ok(fragments) => consumer.consume(fragments).await,
            Err(error) => consumer.fail(error),
        }
    } else {
        match client.chat(&request).await {
            Ok(fragment) => {
                consumer.accept(fragment);
                consumer.finish()
            }
            Err(error) => consumer.fail(error),
        }
    };

    Ok(match outcome {
        StreamOutcome::Completed { text, usage } => {
            if let Some(usage) = usage {
                info!(
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    "reply complete"
                );
            }
            session.append_turn(Turn::assistant(text.clone()));
            TurnOutcome::Completed { text, usage }
        }
        StreamOutcome::Empty => TurnOutcome::Empty,
        StreamOutcome::Failed(error) => TurnOutcome::Failed { error },
    })
}
