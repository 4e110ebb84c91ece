// Logging module - conversation transcripts and request debugging
pub mod conversation_logger;
pub mod request_logger;

use anyhow::{Context, Result};
use std::path::PathBuf;

pub use conversation_logger::ConversationLogger;
pub use request_logger::{log_request, log_response, log_stream_chunk};

/// Environment variable that relocates the coderbot data directory
pub const CODERBOT_HOME_ENV: &str = "CODERBOT_HOME";

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Get or create the base coderbot directory (~/.coderbot, or $CODERBOT_HOME)
pub fn get_coderbot_dir() -> Result<PathBuf> {
    let dir = match std::env::var(CODERBOT_HOME_ENV) {
        Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
        _ => {
            let home_dir = std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .context("Failed to get home directory")?;
            PathBuf::from(home_dir).join(".coderbot")
        }
    };

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create coderbot directory {}", dir.display()))?;
    }

    Ok(dir)
}

/// Get or create the logs directory (~/.coderbot/logs)
pub fn get_logs_dir() -> Result<PathBuf> {
    let logs_dir = get_coderbot_dir()?.join("logs");

    if !logs_dir.exists() {
        std::fs::create_dir_all(&logs_dir).context("Failed to create logs directory")?;
    }

    Ok(logs_dir)
}
