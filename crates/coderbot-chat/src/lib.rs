//! Chat core for coderbot
//!
//! One request/response cycle: trim the history, assemble the context
//! window, call the inference service and fold the streamed fragments into
//! an assistant turn. Rendering is delegated to a [`DisplaySurface`].

pub mod context;
pub mod conversation;
pub mod display;
pub mod history;
pub mod prompt;
pub mod sanitize;
pub mod session;
pub mod stream;

pub use context::assemble;
pub use conversation::{submit_turn, ChatError, TurnOutcome};
pub use display::DisplaySurface;
pub use history::trim;
pub use prompt::build_system_prompt;
pub use sanitize::{sanitize, CONTROL_TOKENS};
pub use session::{ChatSettings, SessionState};
pub use stream::{StreamConsumer, StreamOutcome, StreamPhase, CURSOR, EMPTY_RESPONSE_WARNING};
