//! Core types and structures for coderbot
//!
//! This crate provides the conversation and session types shared by the
//! inference adapter, the chat core and the terminal front-end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "codegemma:2b";

/// Sampling temperature used when nothing else is configured
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Number of user/assistant exchanges kept as request context
pub const DEFAULT_MAX_HISTORY_PAIRS: usize = 10;

/// Context window requested from the inference service (tokens)
pub const DEFAULT_CONTEXT_WINDOW: u32 = 4096;

/// Upper bound on generated tokens per reply
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypesError {
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),
    #[error("unknown skill level '{0}' (expected Beginner, Intermediate or Advanced)")]
    UnknownSkillLevel(String),
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    #[error("temperature {0} is outside 0.0..=1.0")]
    TemperatureOutOfRange(f32),
}

// ============================================================================
// Turns
// ============================================================================

/// Speaker of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }

    /// True for the roles that take part in the conversation history
    pub fn is_conversational(&self) -> bool {
        matches!(self, Role::User | Role::Assistant)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            other => Err(TypesError::UnknownRole(other.to_string())),
        }
    }
}

/// One message exchanged in the conversation.
///
/// Fields are private so a turn cannot change after it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

// ============================================================================
// Language and skill level
// ============================================================================

/// Programming language the assistant answers in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Python,
    JavaScript,
    TypeScript,
    Java,
    C,
    Cpp,
    CSharp,
    Go,
    Rust,
    Kotlin,
    Swift,
    Php,
    Ruby,
    Sql,
    Bash,
}

impl Language {
    pub const ALL: [Language; 15] = [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Go,
        Language::Rust,
        Language::Kotlin,
        Language::Swift,
        Language::Php,
        Language::Ruby,
        Language::Sql,
        Language::Bash,
    ];

    /// Human-readable name, as it appears in the system prompt
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Kotlin => "Kotlin",
            Language::Swift => "Swift",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Sql => "SQL",
            Language::Bash => "Bash",
        }
    }

    /// Info string for fenced code blocks
    pub fn fence_tag(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Kotlin => "kotlin",
            Language::Swift => "swift",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Sql => "sql",
            Language::Bash => "bash",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Language {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if let Some(lang) = Language::ALL
            .iter()
            .find(|l| l.name().to_lowercase() == wanted || l.fence_tag() == wanted)
        {
            return Ok(*lang);
        }
        match wanted.as_str() {
            "py" | "python3" => Ok(Language::Python),
            "js" | "node" => Ok(Language::JavaScript),
            "ts" => Ok(Language::TypeScript),
            "cplusplus" | "c++" => Ok(Language::Cpp),
            "cs" | "c#" => Ok(Language::CSharp),
            "golang" => Ok(Language::Go),
            "rs" => Ok(Language::Rust),
            "kt" => Ok(Language::Kotlin),
            "rb" => Ok(Language::Ruby),
            "sh" | "shell" => Ok(Language::Bash),
            _ => Err(TypesError::UnknownLanguage(s.trim().to_string())),
        }
    }
}

/// How much the user already knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for SkillLevel {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "novice" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" | "expert" => Ok(SkillLevel::Advanced),
            _ => Err(TypesError::UnknownSkillLevel(s.trim().to_string())),
        }
    }
}

// ============================================================================
// Session configuration
// ============================================================================

/// Per-session settings chosen by the user.
///
/// The chat core only reads this; the front-end mutates it between requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionConfig {
    pub active_model: String,
    pub language: Language,
    pub skill_level: SkillLevel,
    temperature: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            active_model: DEFAULT_MODEL.to_string(),
            language: Language::default(),
            skill_level: SkillLevel::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl SessionConfig {
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Set the temperature, keeping the old value when out of range
    pub fn set_temperature(&mut self, temperature: f32) -> Result<(), TypesError> {
        if !(0.0..=1.0).contains(&temperature) {
            return Err(TypesError::TemperatureOutOfRange(temperature));
        }
        self.temperature = temperature;
        Ok(())
    }
}
