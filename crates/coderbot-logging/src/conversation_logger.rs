use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String, // ISO‑8601 UTC
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

/// Append-only JSONL transcript of one REPL session
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger in `logs_dir`; the file name is based on the current UTC time.
    pub async fn new(logs_dir: &Path) -> Result<Self> {
        fs::create_dir_all(logs_dir)
            .await
            .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

        let now: DateTime<Utc> = Utc::now();
        let filename = format!("coderbot-{}.jsonl", now.format("%Y-%m-%d-%H%M%S"));
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        Ok(Self {
            file_path,
            file: Some(file),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Append a single log entry. Write failures are reported, never fatal.
    pub async fn log(&mut self, role: &str, content: &str, model: Option<&str>) {
        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            role,
            content,
            model,
        };
        if let Some(file) = &mut self.file {
            if let Ok(mut json) = serde_json::to_string(&entry) {
                json.push('\n');
                if let Err(e) = file.write_all(json.as_bytes()).await {
                    eprintln!("[Logging error] {}", e);
                }
            }
        }
    }

    /// Flush and close. Called on graceful shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(mut file) = self.file.take() {
            let _ = file.flush().await;
            let _ = file.sync_all().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_log_writes_one_json_line_per_entry() {
        let temp_dir = TempDir::new().unwrap();
        let mut logger = ConversationLogger::new(temp_dir.path()).await.unwrap();

        logger.log("user", "How do I reverse a list?", None).await;
        logger
            .log("assistant", "Use `reversed()`.", Some("codegemma:2b"))
            .await;
        logger.shutdown().await;

        let written = std::fs::read_to_string(logger.file_path()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["role"], "user");
        assert!(first.get("model").is_none());

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["model"], "codegemma:2b");
        assert_eq!(second["content"], "Use `reversed()`.");
    }

    #[tokio::test]
    async fn test_log_after_shutdown_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let mut logger = ConversationLogger::new(temp_dir.path()).await.unwrap();
        logger.shutdown().await;
        logger.log("user", "late", None).await;

        let written = std::fs::read_to_string(logger.file_path()).unwrap();
        assert!(written.is_empty());
    }
}
