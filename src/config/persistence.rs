//! Attempt history persistence module
//!
//! Handles saving, loading, and rotation of quiz attempt records.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::models::QuizAttempt;
use crate::{EduQuizError, Result, APP_NAME, ATTEMPTS_FILE, MAX_ATTEMPTS_HISTORY};

/// Attempt history storage manager
#[derive(Debug)]
pub struct AttemptStorage {
    attempts_path: PathBuf,
}

/// Attempts file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct AttemptsFile {
    version: u32,
    attempts: Vec<QuizAttempt>,
}

impl Default for AttemptsFile {
    fn default() -> Self {
        Self {
            version: 1,
            attempts: Vec::new(),
        }
    }
}

impl AttemptStorage {
    /// Create a storage manager at the standard data location
    pub fn new() -> Result<Self> {
        let attempts_path = Self::attempts_file_path()?;
        Ok(Self { attempts_path })
    }

    /// Create a storage manager at an explicit path
    pub fn at_path(attempts_path: PathBuf) -> Self {
        Self { attempts_path }
    }

    /// Get the standard attempts file path
    /// Uses $DATA_HOME/eduquiz/attempts.json or the platform equivalent
    pub fn attempts_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            EduQuizError::PersistenceError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(ATTEMPTS_FILE))
    }

    /// Load all attempts from the attempts file
    pub fn load_attempts(&self) -> Result<Vec<QuizAttempt>> {
        if !self.attempts_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.attempts_path).map_err(|e| {
            EduQuizError::PersistenceError(format!(
                "Failed to read attempts file {}: {}",
                self.attempts_path.display(),
                e
            ))
        })?;

        let file: AttemptsFile = serde_json::from_str(&content).map_err(|e| {
            EduQuizError::PersistenceError(format!(
                "Failed to parse attempts file {}: {}",
                self.attempts_path.display(),
                e
            ))
        })?;

        Ok(file.attempts)
    }

    /// Append an attempt, rotating out the oldest records past the history cap
    pub fn append_attempt(&self, attempt: QuizAttempt) -> Result<()> {
        let mut attempts = self.load_attempts()?;
        attempts.push(attempt);

        // Keep only the most recent records
        if attempts.len() > MAX_ATTEMPTS_HISTORY {
            let excess = attempts.len() - MAX_ATTEMPTS_HISTORY;
            attempts.drain(..excess);
        }

        self.write_attempts(attempts)
    }

    /// Get the most recent attempts, newest first, up to `limit`
    pub fn recent_attempts(&self, limit: usize) -> Result<Vec<QuizAttempt>> {
        let mut attempts = self.load_attempts()?;
        attempts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        attempts.truncate(limit);
        Ok(attempts)
    }

    fn write_attempts(&self, attempts: Vec<QuizAttempt>) -> Result<()> {
        if let Some(parent) = self.attempts_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                EduQuizError::PersistenceError(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = AttemptsFile {
            version: 1,
            attempts,
        };
        let content = serde_json::to_string_pretty(&file)?;

        fs::write(&self.attempts_path, content).map_err(|e| {
            EduQuizError::PersistenceError(format!(
                "Failed to write attempts file {}: {}",
                self.attempts_path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
