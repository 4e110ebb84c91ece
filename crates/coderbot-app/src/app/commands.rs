//! REPL slash commands

use coderbot_chat::{ChatSettings, SessionState};
use coderbot_logging::safe_truncate;
use coderbot_types::{Language, SkillLevel};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Clear,
    /// Show the model, or switch to the named one
    Model(Option<String>),
    Models,
    Language(Option<String>),
    Level(Option<String>),
    Temperature(Option<String>),
    Config,
    History,
    Exit,
    Unknown(String),
}

/// Recognise a command line. `None` means the line is a chat message.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    match line {
        "exit" | "quit" => return Some(Command::Exit),
        _ => {}
    }
    let rest = line.strip_prefix('/')?;
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim().to_string()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };

    Some(match name.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "clear" | "reset" => Command::Clear,
        "model" => Command::Model(arg),
        "models" => Command::Models,
        "language" | "lang" => Command::Language(arg),
        "level" => Command::Level(arg),
        "temperature" | "temp" => Command::Temperature(arg),
        "config" => Command::Config,
        "history" => Command::History,
        "exit" | "quit" => Command::Exit,
        _ => Command::Unknown(line.to_string()),
    })
}

pub const HELP_TEXT: &str = "\
Commands:
  /help                 Show this help
  /clear                Start a new conversation (settings are kept)
  /model [NAME]         Show or switch the model
  /models               List the models the server has
  /language [NAME]      Show or set the answer language
  /level [LEVEL]        Show or set your level (Beginner, Intermediate, Advanced)
  /temperature [VALUE]  Show or set the temperature (0.0 - 1.0)
  /config               Show the current settings
  /history              Show the conversation so far
  exit, quit            Leave";

/// Result of a command that only touches the session
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Info(String),
    Error(String),
}

/// Run the commands that need no server round-trip.
///
/// Returns `None` for commands the REPL handles itself (`/models`,
/// switching models, exit).
pub fn execute_local(command: &Command, session: &mut SessionState) -> Option<Reply> {
    let reply = match command {
        Command::Help => Reply::Info(HELP_TEXT.to_string()),
        Command::Clear => {
            session.clear();
            Reply::Info("Conversation cleared.".to_string())
        }
        Command::Model(None) => Reply::Info(format!(
            "Current model: {}",
            session.config().active_model
        )),
        Command::Language(None) => {
            let names: Vec<&str> = Language::ALL.iter().map(|l| l.name()).collect();
            Reply::Info(format!(
                "Language: {} (available: {})",
                session.config().language,
                names.join(", ")
            ))
        }
        Command::Language(Some(name)) => match name.parse::<Language>() {
            Ok(language) => {
                session.set_language(language);
                Reply::Info(format!("Language set to {}.", language))
            }
            Err(e) => Reply::Error(e.to_string()),
        },
        Command::Level(None) => {
            Reply::Info(format!("Level: {}", session.config().skill_level))
        }
        Command::Level(Some(name)) => match name.parse::<SkillLevel>() {
            Ok(level) => {
                session.set_skill_level(level);
                Reply::Info(format!("Level set to {}.", level))
            }
            Err(e) => Reply::Error(e.to_string()),
        },
        Command::Temperature(None) => Reply::Info(format!(
            "Temperature: {:.2}",
            session.config().temperature()
        )),
        Command::Temperature(Some(value)) => match value.parse::<f32>() {
            Ok(t) => match session.set_temperature(t) {
                Ok(()) => Reply::Info(format!("Temperature set to {:.2}.", t)),
                Err(e) => Reply::Error(e.to_string()),
            },
            Err(_) => Reply::Error(format!("'{}' is not a number", value)),
        },
        Command::History => Reply::Info(format_history(session)),
        Command::Unknown(line) => Reply::Error(format!(
            "Unknown command '{}'. Type /help for the list.",
            line
        )),
        Command::Model(Some(_)) | Command::Models | Command::Config | Command::Exit => {
            return None
        }
    };
    Some(reply)
}

fn format_history(session: &SessionState) -> String {
    if session.log().is_empty() {
        return "No messages yet.".to_string();
    }
    session
        .log()
        .iter()
        .enumerate()
        .map(|(i, turn)| {
            let content = turn.content().replace('\n', " ");
            format!(
                "{:>3}. {:<9} {}",
                i + 1,
                turn.role().as_str(),
                safe_truncate(&content, 100)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings summary for `/config` and the startup banner
pub fn format_config(
    session: &SessionState,
    settings: &ChatSettings,
    backend: &str,
    url: &str,
) -> String {
    let config = session.config();
    format!(
        "Server:       {} ({})\n\
         Model:        {}\n\
         Language:     {}\n\
         Level:        {}\n\
         Temperature:  {:.2}\n\
         History:      last {} exchanges\n\
         Context:      {} tokens, replies up to {} tokens\n\
         Streaming:    {}",
        url,
        backend,
        config.active_model,
        config.language,
        config.skill_level,
        config.temperature(),
        settings.max_history_pairs,
        settings.context_window_size,
        settings.max_output_tokens,
        if settings.stream { "on" } else { "off" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use coderbot_types::Turn;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse_command("how do I sort a list?"), None);
        assert_eq!(parse_command("exit the loop early"), None);
    }

    #[test]
    fn test_parse_commands_with_arguments() {
        assert_eq!(parse_command(" quit "), Some(Command::Exit));
        assert_eq!(parse_command("/model"), Some(Command::Model(None)));
        assert_eq!(
            parse_command("/model  codegemma:7b "),
            Some(Command::Model(Some("codegemma:7b".to_string())))
        );
        assert_eq!(
            parse_command("/LANG rust"),
            Some(Command::Language(Some("rust".to_string())))
        );
        assert_eq!(
            parse_command("/frobnicate"),
            Some(Command::Unknown("/frobnicate".to_string()))
        );
    }

    #[test]
    fn test_clear_keeps_settings() {
        let mut session = SessionState::default();
        session.set_model("codegemma:7b");
        session.append_turn(Turn::user("q"));

        let reply = execute_local(&Command::Clear, &mut session);

        assert!(matches!(reply, Some(Reply::Info(_))));
        assert!(session.log().is_empty());
        assert_eq!(session.config().active_model, "codegemma:7b");
    }

    #[test]
    fn test_setting_changes_are_validated() {
        let mut session = SessionState::default();

        execute_local(&Command::Language(Some("ts".to_string())), &mut session);
        assert_eq!(session.config().language, Language::TypeScript);

        let reply = execute_local(&Command::Level(Some("guru".to_string())), &mut session);
        assert!(matches!(reply, Some(Reply::Error(_))));
        assert_eq!(session.config().skill_level, SkillLevel::Beginner);

        let reply = execute_local(&Command::Temperature(Some("1.7".to_string())), &mut session);
        assert!(matches!(reply, Some(Reply::Error(_))));
        let reply = execute_local(&Command::Temperature(Some("warm".to_string())), &mut session);
        assert!(matches!(reply, Some(Reply::Error(_))));
        execute_local(&Command::Temperature(Some("0.9".to_string())), &mut session);
        assert_eq!(session.config().temperature(), 0.9);
    }

    #[test]
    fn test_history_listing() {
        let mut session = SessionState::default();
        assert_eq!(
            execute_local(&Command::History, &mut session),
            Some(Reply::Info("No messages yet.".to_string()))
        );
        session.append_turn(Turn::user("first\nquestion"));
        session.append_turn(Turn::assistant("answer"));
        let Some(Reply::Info(text)) = execute_local(&Command::History, &mut session) else {
            panic!("expected info");
        };
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("user      first question"));
    }

    #[test]
    fn test_remote_commands_are_left_to_the_repl() {
        let mut session = SessionState::default();
        assert_eq!(execute_local(&Command::Models, &mut session), None);
        assert_eq!(
            execute_local(&Command::Model(Some("x".to_string())), &mut session),
            None
        );
    }
}
