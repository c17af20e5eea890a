//! Data models module
//!
//! Contains question and answer-option structures, the question bank
//! loader, and quiz attempt records.

pub mod attempt;
pub mod question;

// Re-export commonly used types
pub use attempt::{AttemptStats, QuizAttempt};
pub use question::{AnswerOption, Question, QuestionBank, SelectionState};
