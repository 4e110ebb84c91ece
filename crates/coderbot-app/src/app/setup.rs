use anyhow::{Context, Result};
use coderbot_llm_api::{BackendType, ClientFactory, InferenceClient};
use coderbot_logging::ConversationLogger;
use colored::Colorize;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::{default_config_path, get_config_from_env, AppConfig, ConfigLayer};

/// Everything a run needs, built once from the CLI
pub struct AppContext {
    pub config: AppConfig,
    pub client: Arc<dyn InferenceClient>,
}

impl AppContext {
    /// Base URL the client talks to
    pub fn server_url(&self) -> &str {
        self.client.base_url()
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the level
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Merge CLI flags, CODERBOT_* variables and the config file
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => match std::env::var_os("CODERBOT_CONFIG") {
            Some(path) => path.into(),
            None => default_config_path().context("Failed to locate the coderbot directory")?,
        },
    };
    debug!(path = %config_path.display(), "loading config file");

    let file = ConfigLayer::from_file(&config_path)
        .with_context(|| format!("Invalid config file {}", config_path.display()))?;
    let env = get_config_from_env(|key| std::env::var(key).ok())
        .context("Invalid CODERBOT_* environment variable")?;

    let layer = ConfigLayer::from_cli(cli).or(env).or(file);
    AppConfig::resolve(layer, cli.verbose).context("Invalid configuration")
}

/// Set up application configuration and the inference client from CLI arguments
pub fn setup_from_cli(cli: &Cli) -> Result<AppContext> {
    let config = load_config(cli)?;
    let client = ClientFactory::create(
        config.backend,
        config.url.clone(),
        config.api_key.clone(),
        config.verbose,
    );
    debug!(
        backend = %config.backend,
        url = client.base_url(),
        model = %config.session.active_model,
        "client ready"
    );
    Ok(AppContext { config, client })
}

/// Open the JSONL transcript when it was asked for. Failure only disables it.
pub async fn open_conversation_log(config: &AppConfig) -> Option<ConversationLogger> {
    if !config.log_conversation {
        return None;
    }
    let logs_dir = match coderbot_logging::get_logs_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{} Conversation log disabled: {:#}", "⚠️".yellow(), e);
            return None;
        }
    };
    match ConversationLogger::new(&logs_dir).await {
        Ok(logger) => {
            println!(
                "{}",
                format!("Logging conversation to {}", logger.file_path().display()).bright_black()
            );
            Some(logger)
        }
        Err(e) => {
            eprintln!("{} Conversation log disabled: {:#}", "⚠️".yellow(), e);
            None
        }
    }
}

/// True when `model` is among the names the server reported.
///
/// Ollama resolves a bare name to its `:latest` tag.
pub fn model_is_available(models: &[String], model: &str) -> bool {
    models
        .iter()
        .any(|m| m == model || (!model.contains(':') && *m == format!("{}:latest", model)))
}

/// Check the server is up and has the model. Problems are warnings only.
pub async fn probe_server(client: &dyn InferenceClient, model: &str) -> bool {
    match client.list_models().await {
        Ok(models) => {
            // OpenAI-compatible servers report whatever file they loaded
            if client.backend() == BackendType::Ollama && !model_is_available(&models, model) {
                eprintln!(
                    "{} Model '{}' is not installed on {}.",
                    "⚠️".yellow(),
                    model,
                    client.base_url()
                );
                eprintln!(
                    "   {}",
                    format!("Run `ollama pull {}` or pick one with /models.", model).bright_black()
                );
                return false;
            }
            true
        }
        Err(e) => {
            eprintln!(
                "{} Cannot talk to the inference server at {}: {}",
                "⚠️".yellow(),
                client.base_url(),
                e
            );
            eprintln!("   {}", e.hint().bright_black());
            false
        }
    }
}
