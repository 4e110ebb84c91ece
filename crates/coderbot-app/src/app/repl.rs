use anyhow::{Context, Result};
use coderbot_chat::{submit_turn, SessionState, TurnOutcome};
use coderbot_logging::ConversationLogger;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::app::commands::{execute_local, format_config, parse_command, Command, Reply};
use crate::app::setup::{model_is_available, open_conversation_log, probe_server, AppContext};
use crate::display::TerminalDisplay;

/// Run interactive REPL mode
pub async fn run_repl_mode(ctx: AppContext) -> Result<()> {
    let mut session = SessionState::new(ctx.config.session.clone());
    let settings = ctx.config.settings.clone();

    println!("{}", "💻 CodeGemma Coder Bot".bright_cyan().bold());
    println!(
        "{}",
        format!(
            "Model: {} • {} at {} • {} / {}",
            session.config().active_model,
            ctx.config.backend,
            ctx.server_url(),
            session.config().language,
            session.config().skill_level
        )
        .bright_black()
    );
    println!(
        "{}",
        "Type /help for commands, 'exit' or 'quit' to leave.\n".bright_black()
    );

    probe_server(ctx.client.as_ref(), &session.config().active_model).await;

    let mut logger = open_conversation_log(&ctx.config).await;
    let mut display = TerminalDisplay::stdout();
    let mut rl = DefaultEditor::new().context("Failed to initialise line editor")?;

    loop {
        let prompt = format!(
            "{} {} ",
            format!("[{}]", session.config().active_model).bright_black(),
            "You:".bright_green().bold()
        );

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                // History is in-memory only
                let _ = rl.add_history_entry(line);

                if let Some(command) = parse_command(line) {
                    if !handle_command(&ctx, &mut session, command).await {
                        break;
                    }
                    continue;
                }

                display.set_assistant_label(session.config().active_model.clone());
                let model = session.config().active_model.clone();
                let outcome = submit_turn(
                    &mut session,
                    &settings,
                    ctx.client.as_ref(),
                    &mut display,
                    line,
                )
                .await?;
                log_exchange(logger.as_mut(), line, &outcome, &model).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C clears the line; Ctrl-D leaves
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{} {}", "Error:".red().bold(), err);
                break;
            }
        }
    }

    if let Some(logger) = logger.as_mut() {
        logger.shutdown().await;
    }
    println!("{}", "Goodbye!".bright_cyan());
    Ok(())
}

/// Run one slash command. Returns false when the REPL should stop.
async fn handle_command(ctx: &AppContext, session: &mut SessionState, command: Command) -> bool {
    if let Some(reply) = execute_local(&command, session) {
        match reply {
            Reply::Info(text) => println!("{}", text),
            Reply::Error(text) => println!("{} {}", "⚠️".yellow(), text.yellow()),
        }
        return true;
    }

    match command {
        Command::Exit => return false,
        Command::Config => println!(
            "{}",
            format_config(
                session,
                &ctx.config.settings,
                ctx.config.backend.as_str(),
                ctx.server_url()
            )
        ),
        Command::Models => match ctx.client.list_models().await {
            Ok(models) if models.is_empty() => {
                println!("{}", "The server reports no models.".yellow())
            }
            Ok(models) => {
                for model in models {
                    if model == session.config().active_model {
                        println!("  {} {}", "*".green(), model.green());
                    } else {
                        println!("    {}", model);
                    }
                }
            }
            Err(e) => {
                println!("{} {}", "❌ Error:".red().bold(), e);
                println!("   {}", e.hint().bright_black());
            }
        },
        Command::Model(Some(name)) => {
            session.set_model(name.clone());
            println!("Switched to {}.", name.bright_cyan());
            if let Ok(models) = ctx.client.list_models().await {
                if ctx.client.backend() == coderbot_llm_api::BackendType::Ollama
                    && !model_is_available(&models, &name)
                {
                    println!(
                        "{} '{}' is not installed. Run `ollama pull {}` first.",
                        "⚠️".yellow(),
                        name,
                        name
                    );
                }
            }
        }
        // Handled by execute_local
        _ => {}
    }
    true
}

async fn log_exchange(
    logger: Option<&mut ConversationLogger>,
    user_text: &str,
    outcome: &TurnOutcome,
    model: &str,
) {
    let Some(logger) = logger else {
        return;
    };
    logger.log("user", user_text, None).await;
    if let TurnOutcome::Completed { text, .. } = outcome {
        logger.log("assistant", text, Some(model)).await;
    }
}
