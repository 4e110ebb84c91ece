use coderbot_types::{SessionConfig, Turn};

use crate::prompt::build_system_prompt;

/// Build the exact message list for one request:
/// `[system] + history + [user(new_text)]`
pub fn assemble(config: &SessionConfig, history: Vec<Turn>, new_text: &str) -> Vec<Turn> {
    let mut window = Vec::with_capacity(history.len() + 2);
    window.push(Turn::system(build_system_prompt(
        config.language,
        config.skill_level,
    )));
    window.extend(history);
    window.push(Turn::user(new_text));
    window
}
