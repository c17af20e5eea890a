//! EduQuiz - terminal quiz practice
//!
//! A TUI application for timed quiz sessions with instant answer feedback,
//! question bookmarking, and an attempt-history dashboard.

use std::fmt;

// Public re-exports
pub mod app;
pub mod config;
pub mod models;
pub mod net;
pub mod quiz;

// Common error types
#[derive(Debug)]
pub enum EduQuizError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Question bank loading or validation error
    QuestionBankError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// Attempt history persistence error
    PersistenceError(String),
}

impl fmt::Display for EduQuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EduQuizError::IoError(err) => write!(f, "I/O error: {}", err),
            EduQuizError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            EduQuizError::QuestionBankError(msg) => write!(f, "Question bank error: {}", msg),
            EduQuizError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            EduQuizError::PersistenceError(msg) => write!(f, "Attempt persistence error: {}", msg),
        }
    }
}

impl std::error::Error for EduQuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EduQuizError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EduQuizError {
    fn from(err: std::io::Error) -> Self {
        EduQuizError::IoError(err)
    }
}

impl From<serde_json::Error> for EduQuizError {
    fn from(err: serde_json::Error) -> Self {
        EduQuizError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for EduQuizError {
    fn from(err: toml::de::Error) -> Self {
        EduQuizError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for EduQuizError {
    fn from(err: toml::ser::Error) -> Self {
        EduQuizError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for EduQuiz operations
pub type Result<T> = std::result::Result<T, EduQuizError>;

// Common types and constants
pub const APP_NAME: &str = "eduquiz";
pub const CONFIG_FILE: &str = "eduquiz.toml";
pub const ATTEMPTS_FILE: &str = "attempts.json";
pub const MAX_ATTEMPTS_HISTORY: usize = 100;
/// Server path the bookmark toggle posts to
pub const BOOKMARK_PATH: &str = "/bookmark/";
/// Anti-forgery token header echoed back on state-changing requests
pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const DEFAULT_TIMER_SECONDS: u32 = 90;
pub const DEFAULT_QUESTIONS_PER_QUIZ: usize = 5;
