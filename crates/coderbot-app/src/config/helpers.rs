use std::path::PathBuf;

use anyhow::Result;

use super::{ConfigError, ConfigLayer};

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `~/.coderbot/config.toml`, or under `$CODERBOT_HOME`
pub fn default_config_path() -> Result<PathBuf> {
    Ok(coderbot_logging::get_coderbot_dir()?.join(CONFIG_FILE_NAME))
}

/// Read the CODERBOT_* variables through `lookup`.
///
/// Takes a lookup function instead of reading the process environment so the
/// layer can be built from a fixed map in tests.
pub fn get_config_from_env<F>(lookup: F) -> Result<ConfigLayer, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    Ok(ConfigLayer {
        backend: get("CODERBOT_BACKEND"),
        url: get("CODERBOT_URL"),
        api_key: get("CODERBOT_API_KEY"),
        model: get("CODERBOT_MODEL"),
        language: get("CODERBOT_LANGUAGE"),
        level: get("CODERBOT_LEVEL"),
        temperature: parse_var("CODERBOT_TEMPERATURE", get("CODERBOT_TEMPERATURE"))?,
        max_history_pairs: parse_var(
            "CODERBOT_MAX_HISTORY_PAIRS",
            get("CODERBOT_MAX_HISTORY_PAIRS"),
        )?,
        context_window: parse_var("CODERBOT_CONTEXT_WINDOW", get("CODERBOT_CONTEXT_WINDOW"))?,
        max_tokens: parse_var("CODERBOT_MAX_TOKENS", get("CODERBOT_MAX_TOKENS"))?,
        stream: parse_bool("CODERBOT_STREAM", get("CODERBOT_STREAM"))?,
        log_conversation: parse_bool(
            "CODERBOT_LOG_CONVERSATION",
            get("CODERBOT_LOG_CONVERSATION"),
        )?,
    })
}

fn parse_var<T>(key: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: v.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn parse_bool(key: &str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
    value
        .map(|v| match v.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: v.clone(),
                reason: "expected true or false".to_string(),
            }),
        })
        .transpose()
}
