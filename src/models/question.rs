//! Question and answer-option data models
//!
//! Contains the per-option selection state machine, question structures,
//! and the JSON question bank loader with random sampling.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{EduQuizError, Result};

/// Feedback state of a single answer option
///
/// Initial state is `Unselected`. Transitions happen only through
/// `QuizInteractionController::select_option`; any later selection in the
/// same option set resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Not part of the current selection round
    #[default]
    Unselected,
    /// Most recently selected and the correct answer
    SelectedCorrect,
    /// Most recently selected and not the correct answer
    SelectedIncorrect,
}

impl SelectionState {
    /// Whether this option is part of the current selection round
    pub fn is_selected(&self) -> bool {
        !matches!(self, SelectionState::Unselected)
    }
}

/// A single answer option attached to a question
///
/// The option set of a question is immutable for the lifetime of a quiz
/// instance; only `selection` mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Stable identifier, unique within the question
    pub id: String,
    /// Text shown to the user
    pub text: String,
    /// Whether this is the correct answer
    pub is_correct: bool,
    /// Current feedback state, never persisted
    #[serde(skip, default)]
    pub selection: SelectionState,
}

impl AnswerOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
            selection: SelectionState::Unselected,
        }
    }
}

/// A quiz question with its option set and explanation text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, used for bookmarking
    pub id: String,
    /// Question text
    pub text: String,
    /// Answer options, order preserved from the bank
    pub options: Vec<AnswerOption>,
    /// Explanation revealed after the first selection
    pub explanation: String,
}

impl Question {
    /// Validate the question shape: at least two options, exactly one correct,
    /// unique option ids
    pub fn validate(&self) -> Result<()> {
        if self.options.len() < 2 {
            return Err(EduQuizError::QuestionBankError(format!(
                "Question '{}' needs at least 2 options",
                self.id
            )));
        }

        let correct_count = self.options.iter().filter(|o| o.is_correct).count();
        if correct_count != 1 {
            return Err(EduQuizError::QuestionBankError(format!(
                "Question '{}' must have exactly 1 correct option, found {}",
                self.id, correct_count
            )));
        }

        for (i, option) in self.options.iter().enumerate() {
            if self.options[..i].iter().any(|o| o.id == option.id) {
                return Err(EduQuizError::QuestionBankError(format!(
                    "Question '{}' has duplicate option id '{}'",
                    self.id, option.id
                )));
            }
        }

        Ok(())
    }
}

/// Question bank file structure for JSON loading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Display title of the bank
    pub title: String,
    /// All questions available for sampling
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Load a question bank from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EduQuizError::QuestionBankError(format!(
                "Failed to read question bank {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate a question bank from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let bank: Self = serde_json::from_str(content)
            .map_err(|e| EduQuizError::QuestionBankError(format!("Invalid question bank: {}", e)))?;
        bank.validate()?;
        Ok(bank)
    }

    /// Validate the bank: non-empty, unique question ids, valid questions
    pub fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(EduQuizError::QuestionBankError(
                "Question bank contains no questions".to_string(),
            ));
        }

        for (i, question) in self.questions.iter().enumerate() {
            if self.questions[..i].iter().any(|q| q.id == question.id) {
                return Err(EduQuizError::QuestionBankError(format!(
                    "Duplicate question id '{}'",
                    question.id
                )));
            }
            question.validate()?;
        }

        Ok(())
    }

    /// Sample up to `count` random questions for one session
    pub fn sample(&self, count: usize) -> Vec<Question> {
        let mut rng = rand::thread_rng();
        self.questions
            .choose_multiple(&mut rng, count.min(self.questions.len()))
            .cloned()
            .collect()
    }

    /// Built-in practice deck used when no bank file is configured
    pub fn builtin() -> Self {
        Self {
            title: "General Knowledge".to_string(),
            questions: vec![
                Question {
                    id: "gk-1".to_string(),
                    text: "What is the value of 7 x 8?".to_string(),
                    options: vec![
                        AnswerOption::new("gk-1-a", "54", false),
                        AnswerOption::new("gk-1-b", "56", true),
                        AnswerOption::new("gk-1-c", "58", false),
                        AnswerOption::new("gk-1-d", "64", false),
                    ],
                    explanation: "7 x 8 = 56.".to_string(),
                },
                Question {
                    id: "gk-2".to_string(),
                    text: "Which planet is known as the Red Planet?".to_string(),
                    options: vec![
                        AnswerOption::new("gk-2-a", "Venus", false),
                        AnswerOption::new("gk-2-b", "Jupiter", false),
                        AnswerOption::new("gk-2-c", "Mars", true),
                        AnswerOption::new("gk-2-d", "Saturn", false),
                    ],
                    explanation: "Iron oxide on the surface of Mars gives it a reddish color."
                        .to_string(),
                },
                Question {
                    id: "gk-3".to_string(),
                    text: "In which year did World War II end?".to_string(),
                    options: vec![
                        AnswerOption::new("gk-3-a", "1943", false),
                        AnswerOption::new("gk-3-b", "1944", false),
                        AnswerOption::new("gk-3-c", "1945", true),
                        AnswerOption::new("gk-3-d", "1946", false),
                    ],
                    explanation: "World War II ended in 1945.".to_string(),
                },
                Question {
                    id: "gk-4".to_string(),
                    text: "What is the chemical symbol for water?".to_string(),
                    options: vec![
                        AnswerOption::new("gk-4-a", "H2O", true),
                        AnswerOption::new("gk-4-b", "CO2", false),
                        AnswerOption::new("gk-4-c", "NaCl", false),
                        AnswerOption::new("gk-4-d", "O2", false),
                    ],
                    explanation: "Water is two hydrogen atoms bonded to one oxygen atom."
                        .to_string(),
                },
                Question {
                    id: "gk-5".to_string(),
                    text: "Which word class expresses an action?".to_string(),
                    options: vec![
                        AnswerOption::new("gk-5-a", "Noun", false),
                        AnswerOption::new("gk-5-b", "Verb", true),
                        AnswerOption::new("gk-5-c", "Adjective", false),
                        AnswerOption::new("gk-5-d", "Adverb", false),
                    ],
                    explanation: "Verbs express actions, states, or occurrences.".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_option_question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            text: "Sample?".to_string(),
            options: vec![
                AnswerOption::new(format!("{}-a", id), "Yes", true),
                AnswerOption::new(format!("{}-b", id), "No", false),
            ],
            explanation: "Because.".to_string(),
        }
    }

    #[test]
    fn test_selection_state_default() {
        let option = AnswerOption::new("a", "text", true);
        assert_eq!(option.selection, SelectionState::Unselected);
        assert!(!option.selection.is_selected());
        assert!(SelectionState::SelectedCorrect.is_selected());
        assert!(SelectionState::SelectedIncorrect.is_selected());
    }

    #[test]
    fn test_builtin_bank_is_valid() {
        let bank = QuestionBank::builtin();
        assert!(bank.validate().is_ok());
        assert_eq!(bank.questions.len(), 5);
    }

    #[test]
    fn test_question_requires_single_correct_option() {
        let mut question = two_option_question("q1");
        question.options[1].is_correct = true;
        assert!(question.validate().is_err());

        question.options[0].is_correct = false;
        question.options[1].is_correct = false;
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_bank_rejects_duplicate_question_ids() {
        let bank = QuestionBank {
            title: "t".to_string(),
            questions: vec![two_option_question("q1"), two_option_question("q1")],
        };
        assert!(bank.validate().is_err());
    }

    #[test]
    fn test_from_json_roundtrip() {
        let bank = QuestionBank::builtin();
        let json = serde_json::to_string(&bank).expect("Failed to serialize");
        let loaded = QuestionBank::from_json(&json).expect("Failed to parse");
        assert_eq!(loaded.title, bank.title);
        assert_eq!(loaded.questions.len(), bank.questions.len());
        // Selection state is transient and never persisted
        assert_eq!(
            loaded.questions[0].options[0].selection,
            SelectionState::Unselected
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(QuestionBank::from_json("not json").is_err());
        assert!(QuestionBank::from_json(r#"{"title":"t","questions":[]}"#).is_err());
    }

    #[test]
    fn test_sample_bounds() {
        let bank = QuestionBank::builtin();

        let sampled = bank.sample(3);
        assert_eq!(sampled.len(), 3);

        // Requesting more than available caps at the bank size
        let sampled = bank.sample(50);
        assert_eq!(sampled.len(), bank.questions.len());

        // Sampled questions are distinct
        for (i, q) in sampled.iter().enumerate() {
            assert!(!sampled[..i].iter().any(|other| other.id == q.id));
        }
    }
}
