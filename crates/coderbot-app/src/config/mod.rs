//! Configuration layering: CLI flag > `CODERBOT_*` env > config file > defaults

pub mod helpers;

use coderbot_chat::ChatSettings;
use coderbot_llm_api::{BackendType, ClientFactory};
use coderbot_types::{Language, SessionConfig, SkillLevel, TypesError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::Cli;

pub use helpers::{default_config_path, get_config_from_env, CONFIG_FILE_NAME};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    Types(#[from] TypesError),
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// One source of settings. Every field is optional so layers can be stacked.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub backend: Option<String>,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
    pub level: Option<String>,
    pub temperature: Option<f32>,
    pub max_history_pairs: Option<usize>,
    pub context_window: Option<u32>,
    pub max_tokens: Option<u32>,
    pub stream: Option<bool>,
    pub log_conversation: Option<bool>,
}

impl ConfigLayer {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            backend: cli.backend.clone(),
            url: cli.url.clone(),
            api_key: cli.api_key.clone(),
            model: cli.model.clone(),
            language: cli.language.clone(),
            level: cli.level.clone(),
            temperature: cli.temperature,
            max_history_pairs: cli.max_history_pairs,
            context_window: cli.context_window,
            max_tokens: cli.max_tokens,
            stream: cli.no_stream.then_some(false),
            log_conversation: cli.log_conversation.then_some(true),
        }
    }

    /// Load a TOML config file. A missing file is an empty layer.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fill every unset field from `lower`
    pub fn or(self, lower: ConfigLayer) -> Self {
        Self {
            backend: self.backend.or(lower.backend),
            url: self.url.or(lower.url),
            api_key: self.api_key.or(lower.api_key),
            model: self.model.or(lower.model),
            language: self.language.or(lower.language),
            level: self.level.or(lower.level),
            temperature: self.temperature.or(lower.temperature),
            max_history_pairs: self.max_history_pairs.or(lower.max_history_pairs),
            context_window: self.context_window.or(lower.context_window),
            max_tokens: self.max_tokens.or(lower.max_tokens),
            stream: self.stream.or(lower.stream),
            log_conversation: self.log_conversation.or(lower.log_conversation),
        }
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub backend: BackendType,
    /// `None` means the backend's default URL
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub session: SessionConfig,
    pub settings: ChatSettings,
    pub log_conversation: bool,
    pub verbose: bool,
}

impl AppConfig {
    /// Apply built-in defaults to a merged layer and validate it
    pub fn resolve(layer: ConfigLayer, verbose: bool) -> Result<Self, ConfigError> {
        let url = layer.url.filter(|u| !u.trim().is_empty());
        let backend = match layer.backend {
            Some(name) => name.parse::<BackendType>().map_err(|reason| {
                ConfigError::InvalidValue {
                    key: "backend".to_string(),
                    value: name.clone(),
                    reason,
                }
            })?,
            None => ClientFactory::detect_backend(url.as_deref()),
        };

        let mut session = SessionConfig::default();
        if let Some(model) = layer.model.filter(|m| !m.trim().is_empty()) {
            session.active_model = model;
        }
        if let Some(language) = layer.language {
            session.language = language.parse::<Language>()?;
        }
        if let Some(level) = layer.level {
            session.skill_level = level.parse::<SkillLevel>()?;
        }
        if let Some(temperature) = layer.temperature {
            session.set_temperature(temperature)?;
        }

        let defaults = ChatSettings::default();
        let settings = ChatSettings {
            max_history_pairs: layer.max_history_pairs.unwrap_or(defaults.max_history_pairs),
            context_window_size: positive("context_window", layer.context_window)?
                .unwrap_or(defaults.context_window_size),
            max_output_tokens: positive("max_tokens", layer.max_tokens)?
                .unwrap_or(defaults.max_output_tokens),
            stream: layer.stream.unwrap_or(defaults.stream),
        };

        Ok(Self {
            backend,
            url,
            api_key: layer.api_key,
            session,
            settings,
            log_conversation: layer.log_conversation.unwrap_or(false),
            verbose,
        })
    }
}

fn positive(key: &str, value: Option<u32>) -> Result<Option<u32>, ConfigError> {
    match value {
        Some(0) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: "0".to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::resolve(ConfigLayer::default(), false).unwrap();
        assert_eq!(config.backend, BackendType::Ollama);
        assert_eq!(config.url, None);
        assert_eq!(config.session, SessionConfig::default());
        assert_eq!(config.settings, ChatSettings::default());
        assert!(!config.log_conversation);
    }

    #[test]
    fn test_upper_layer_wins() {
        let cli = ConfigLayer {
            model: Some("codegemma:7b".to_string()),
            ..ConfigLayer::default()
        };
        let env = ConfigLayer {
            model: Some("from-env".to_string()),
            language: Some("go".to_string()),
            ..ConfigLayer::default()
        };
        let file = ConfigLayer {
            language: Some("rust".to_string()),
            level: Some("intermediate".to_string()),
            temperature: Some(0.6),
            ..ConfigLayer::default()
        };

        let config = AppConfig::resolve(cli.or(env).or(file), false).unwrap();

        assert_eq!(config.session.active_model, "codegemma:7b");
        assert_eq!(config.session.language, Language::Go);
        assert_eq!(config.session.skill_level, SkillLevel::Intermediate);
        assert_eq!(config.session.temperature(), 0.6);
    }

    #[test]
    fn test_backend_is_guessed_from_url() {
        let layer = ConfigLayer {
            url: Some("http://localhost:8080".to_string()),
            ..ConfigLayer::default()
        };
        let config = AppConfig::resolve(layer, false).unwrap();
        assert_eq!(config.backend, BackendType::OpenAi);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let bad_language = ConfigLayer {
            language: Some("cobol".to_string()),
            ..ConfigLayer::default()
        };
        assert!(matches!(
            AppConfig::resolve(bad_language, false),
            Err(ConfigError::Types(TypesError::UnknownLanguage(_)))
        ));

        let bad_temperature = ConfigLayer {
            temperature: Some(1.5),
            ..ConfigLayer::default()
        };
        assert!(matches!(
            AppConfig::resolve(bad_temperature, false),
            Err(ConfigError::Types(TypesError::TemperatureOutOfRange(_)))
        ));

        let bad_backend = ConfigLayer {
            backend: Some("anthropic".to_string()),
            ..ConfigLayer::default()
        };
        assert!(matches!(
            AppConfig::resolve(bad_backend, false),
            Err(ConfigError::InvalidValue { .. })
        ));

        let zero_context = ConfigLayer {
            context_window: Some(0),
            ..ConfigLayer::default()
        };
        assert!(AppConfig::resolve(zero_context, false).is_err());
    }

    #[test]
    fn test_cli_flags_map_to_layer() {
        let cli = Cli {
            no_stream: true,
            log_conversation: true,
            ..Cli::default()
        };
        let layer = ConfigLayer::from_cli(&cli);
        assert_eq!(layer.stream, Some(false));
        assert_eq!(layer.log_conversation, Some(true));

        let layer = ConfigLayer::from_cli(&Cli::default());
        assert_eq!(layer, ConfigLayer::default());
    }
}
