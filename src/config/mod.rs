//! Configuration management module
//!
//! Handles loading, saving, and validation of the application
//! configuration: timer duration, session size, question bank location,
//! and the optional quiz server used by the bookmark toggle.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::{
    EduQuizError, Result, APP_NAME, CONFIG_FILE, DEFAULT_QUESTIONS_PER_QUIZ,
    DEFAULT_TIMER_SECONDS,
};

pub mod persistence;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Countdown duration for one quiz session, in seconds
    pub timer_seconds: u32,
    /// Number of questions sampled per session
    pub questions_per_quiz: usize,
    /// Path to a JSON question bank; the built-in deck is used when unset
    pub questions_path: Option<PathBuf>,
    /// Base URL of the quiz server for bookmark persistence; bookmark
    /// toggles stay local when unset
    pub server_url: Option<String>,
    /// Anti-forgery token sent with bookmark requests
    pub csrf_token: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timer_seconds: DEFAULT_TIMER_SECONDS,
            questions_per_quiz: DEFAULT_QUESTIONS_PER_QUIZ,
            questions_path: None,
            server_url: None,
            csrf_token: String::new(),
        }
    }
}

impl AppConfig {
    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.timer_seconds == 0 {
            return Err(EduQuizError::ConfigError(
                "Timer duration must be greater than 0".to_string(),
            ));
        }

        const MAX_TIMER_SECONDS: u32 = 3600; // 1 hour
        if self.timer_seconds > MAX_TIMER_SECONDS {
            return Err(EduQuizError::ConfigError(format!(
                "Timer duration too long: {}s (max: {}s)",
                self.timer_seconds, MAX_TIMER_SECONDS
            )));
        }

        if self.questions_per_quiz == 0 {
            return Err(EduQuizError::ConfigError(
                "Questions per quiz must be greater than 0".to_string(),
            ));
        }

        if let Some(url) = &self.server_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(EduQuizError::ConfigError(format!(
                    "Server URL must start with http:// or https://: {}",
                    url
                )));
            }
        }

        Ok(())
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            EduQuizError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            EduQuizError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                EduQuizError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| EduQuizError::ConfigError(format!("Failed to serialize configuration: {}", e)))?;

        fs::write(&config_path, content).map_err(|e| {
            EduQuizError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/eduquiz/eduquiz.toml or the platform equivalent
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            EduQuizError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
