use coderbot_types::{
    Language, SessionConfig, SkillLevel, Turn, TypesError, DEFAULT_CONTEXT_WINDOW,
    DEFAULT_MAX_HISTORY_PAIRS, DEFAULT_MAX_OUTPUT_TOKENS,
};
use tracing::warn;

/// Request sizing chosen by the host; fixed for the life of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    pub max_history_pairs: usize,
    pub context_window_size: u32,
    pub max_output_tokens: u32,
    pub stream: bool,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            max_history_pairs: DEFAULT_MAX_HISTORY_PAIRS,
            context_window_size: DEFAULT_CONTEXT_WINDOW,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            stream: true,
        }
    }
}

/// Turn log and configuration for one chat session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    log: Vec<Turn>,
    config: SessionConfig,
}

impl SessionState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            log: Vec::new(),
            config,
        }
    }

    /// Append a user or assistant turn. System turns are built per request
    /// and never stored, so they are refused here.
    pub fn append_turn(&mut self, turn: Turn) -> bool {
        if !turn.role().is_conversational() {
            warn!("refusing to store a {} turn in the log", turn.role());
            return false;
        }
        self.log.push(turn);
        true
    }

    pub fn log(&self) -> &[Turn] {
        &self.log
    }

    /// Forget the conversation, keep the configuration
    pub fn clear(&mut self) {
        self.log.clear();
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SessionConfig {
        &mut self.config
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.config.active_model = model.into();
    }

    pub fn set_language(&mut self, language: Language) {
        self.config.language = language;
    }

    pub fn set_skill_level(&mut self, level: SkillLevel) {
        self.config.skill_level = level;
    }

    pub fn set_temperature(&mut self, temperature: f32) -> Result<(), TypesError> {
        self.config.set_temperature(temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clear_keeps_configuration() {
        let mut session = SessionState::default();
        session.set_model("codegemma:7b");
        session.set_language(Language::Go);
        session.set_skill_level(SkillLevel::Advanced);
        session.set_temperature(0.8).unwrap();
        session.append_turn(Turn::user("q"));
        session.append_turn(Turn::assistant("a"));
        let before = session.config().clone();

        session.clear();

        assert!(session.log().is_empty());
        assert_eq!(session.config(), &before);
        assert_eq!(session.config().active_model, "codegemma:7b");
    }

    #[test]
    fn test_system_turns_are_not_stored() {
        let mut session = SessionState::default();
        assert!(!session.append_turn(Turn::system("prompt")));
        assert!(session.append_turn(Turn::user("hi")));
        assert_eq!(session.log(), &[Turn::user("hi")]);
    }

    #[test]
    fn test_bad_temperature_keeps_old_value() {
        let mut session = SessionState::default();
        assert!(session.set_temperature(2.0).is_err());
        assert_eq!(session.config().temperature(), 0.3);
    }
}
