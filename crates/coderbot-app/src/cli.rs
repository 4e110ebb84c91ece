use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// CLI arguments for coderbot
#[derive(Parser, Debug, Default)]
#[command(name = "coderbot")]
#[command(about = "CodeGemma Coder Bot - a coding assistant backed by a local model")]
#[command(version)]
pub struct Cli {
    /// Inference server URL (default: http://localhost:11434 for Ollama,
    /// http://localhost:8080 for llama.cpp)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Backend type (ollama, openai, llama.cpp). Guessed from --url if omitted
    #[arg(long, value_name = "BACKEND")]
    pub backend: Option<String>,

    /// Bearer token for OpenAI-compatible servers that require one
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Model to chat with (default: codegemma:2b)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Programming language the answers are written in (default: Python)
    #[arg(short, long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Your skill level: Beginner, Intermediate or Advanced
    #[arg(long, value_name = "LEVEL")]
    pub level: Option<String>,

    /// Sampling temperature between 0.0 and 1.0 (default: 0.3)
    #[arg(short, long, value_name = "TEMP")]
    pub temperature: Option<f32>,

    /// Number of past exchanges sent as context (default: 10)
    #[arg(long, value_name = "N")]
    pub max_history_pairs: Option<usize>,

    /// Context window requested from the server, in tokens (default: 4096)
    #[arg(long, value_name = "TOKENS")]
    pub context_window: Option<u32>,

    /// Maximum tokens per reply (default: 1024)
    #[arg(long, value_name = "TOKENS")]
    pub max_tokens: Option<u32>,

    /// Wait for the whole reply instead of streaming it
    #[arg(long)]
    pub no_stream: bool,

    /// Ask a single question, print the answer and exit
    #[arg(short, long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Write the conversation to ~/.coderbot/logs as JSONL
    #[arg(long)]
    pub log_conversation: bool,

    /// Config file (default: ~/.coderbot/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Generate shell completions
    #[arg(long, value_enum)]
    pub generate: Option<Shell>,

    /// Print requests, responses and debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
