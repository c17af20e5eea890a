//! Quiz attempt data models
//!
//! Contains the attempt record persisted after each completed session and
//! the aggregate statistics shown on the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one completed quiz session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    /// Timestamp when the session finished
    pub timestamp: DateTime<Utc>,
    /// Title of the question bank the session was sampled from
    pub quiz_title: String,
    /// Number of questions answered correctly
    pub score: u32,
    /// Total questions in the session
    pub total_questions: u32,
}

impl QuizAttempt {
    /// Create a new attempt record stamped with the current time
    pub fn new(quiz_title: impl Into<String>, score: u32, total_questions: u32) -> Self {
        Self {
            timestamp: Utc::now(),
            quiz_title: quiz_title.into(),
            score,
            total_questions,
        }
    }

    /// Score as a percentage in [0, 100]
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            (self.score as f64 / self.total_questions as f64) * 100.0
        }
    }

    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} - {} - {}/{} ({:.0}%)",
            self.timestamp.format("%Y-%m-%d %H:%M UTC"),
            self.quiz_title,
            self.score,
            self.total_questions,
            self.percentage()
        )
    }
}

/// Aggregate statistics over the attempt history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttemptStats {
    /// Number of completed sessions
    pub quizzes_completed: usize,
    /// Mean percentage across all attempts
    pub average_score: f64,
    /// Highest percentage across all attempts
    pub best_score: f64,
}

impl AttemptStats {
    /// Compute statistics from a slice of attempts
    pub fn from_attempts(attempts: &[QuizAttempt]) -> Self {
        if attempts.is_empty() {
            return Self::default();
        }

        let percentages: Vec<f64> = attempts.iter().map(|a| a.percentage()).collect();
        let average_score = percentages.iter().sum::<f64>() / percentages.len() as f64;
        let best_score = percentages.iter().cloned().fold(0.0, f64::max);

        Self {
            quizzes_completed: attempts.len(),
            average_score,
            best_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let attempt = QuizAttempt::new("Math", 3, 5);
        assert!((attempt.percentage() - 60.0).abs() < f64::EPSILON);

        let empty = QuizAttempt::new("Math", 0, 0);
        assert_eq!(empty.percentage(), 0.0);
    }

    #[test]
    fn test_summary_contains_score() {
        let attempt = QuizAttempt::new("Science", 4, 5);
        let summary = attempt.summary();
        assert!(summary.contains("Science"));
        assert!(summary.contains("4/5"));
        assert!(summary.contains("80%"));
    }

    #[test]
    fn test_stats_aggregation() {
        let attempts = vec![
            QuizAttempt::new("Math", 5, 5),
            QuizAttempt::new("Math", 2, 5),
            QuizAttempt::new("Science", 3, 5),
        ];
        let stats = AttemptStats::from_attempts(&attempts);
        assert_eq!(stats.quizzes_completed, 3);
        assert!((stats.average_score - (100.0 + 40.0 + 60.0) / 3.0).abs() < 1e-9);
        assert!((stats.best_score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_empty_history() {
        let stats = AttemptStats::from_attempts(&[]);
        assert_eq!(stats.quizzes_completed, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.best_score, 0.0);
    }

    #[test]
    fn test_attempt_serde_roundtrip() {
        let attempt = QuizAttempt::new("History", 4, 5);
        let json = serde_json::to_string(&attempt).expect("Failed to serialize");
        let loaded: QuizAttempt = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(loaded.score, attempt.score);
        assert_eq!(loaded.total_questions, attempt.total_questions);
        assert_eq!(loaded.quiz_title, attempt.quiz_title);
    }
}
