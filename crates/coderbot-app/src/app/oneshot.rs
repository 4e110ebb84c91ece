use anyhow::Result;
use coderbot_chat::{submit_turn, SessionState, TurnOutcome};

use crate::app::setup::{open_conversation_log, AppContext};
use crate::display::TerminalDisplay;

/// Answer a single `--prompt` question. Returns whether a reply arrived.
pub async fn run_prompt_mode(ctx: AppContext, prompt: &str) -> Result<bool> {
    let mut session = SessionState::new(ctx.config.session.clone());
    let mut display = TerminalDisplay::stdout();
    display.set_assistant_label(session.config().active_model.clone());
    let mut logger = open_conversation_log(&ctx.config).await;

    let outcome = submit_turn(
        &mut session,
        &ctx.config.settings,
        ctx.client.as_ref(),
        &mut display,
        prompt,
    )
    .await?;

    if let Some(logger) = logger.as_mut() {
        logger.log("user", prompt.trim(), None).await;
        if let TurnOutcome::Completed { text, .. } = &outcome {
            logger
                .log("assistant", text, Some(session.config().active_model.as_str()))
                .await;
        }
        logger.shutdown().await;
    }

    Ok(outcome.is_completed())
}
