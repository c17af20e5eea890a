//! Quiz interaction controller
//!
//! Owns the countdown timer and the answer-selection feedback state for
//! one quiz session. Selection handling runs synchronously inside a single
//! UI event callback; timer ticks are applied by the event loop between
//! renders, so no interleaving is possible.

use std::collections::HashSet;

use crate::models::{Question, QuizAttempt, SelectionState};
use crate::quiz::timer::CountdownTimer;

/// Interaction state for one quiz session
///
/// The controller holds the sampled question deck, the session countdown,
/// the per-option selection states, the explanation panel visibility, and
/// the local bookmark markers. It exposes no failure modes: every
/// operation either applies or is a defined no-op.
#[derive(Debug)]
pub struct QuizInteractionController {
    quiz_title: String,
    questions: Vec<Question>,
    current: usize,
    timer: CountdownTimer,
    explanation_visible: bool,
    /// Correctness of the most recent selection, per question
    answered: Vec<Option<bool>>,
    /// Question ids bookmarked during this session
    bookmarked: HashSet<String>,
    finished: bool,
}

impl QuizInteractionController {
    /// Create a controller for a sampled deck with a running countdown
    ///
    /// `questions` must be non-empty and `timer_seconds` positive.
    pub fn new(quiz_title: impl Into<String>, questions: Vec<Question>, timer_seconds: u32) -> Self {
        debug_assert!(!questions.is_empty());
        let answered = vec![None; questions.len()];
        Self {
            quiz_title: quiz_title.into(),
            questions,
            current: 0,
            timer: CountdownTimer::start(timer_seconds),
            explanation_visible: false,
            answered,
            bookmarked: HashSet::new(),
            finished: false,
        }
    }

    /// Apply one countdown tick
    ///
    /// Returns `true` when this tick reached the terminal state, so the
    /// caller can cancel the ticker exactly once.
    pub fn tick(&mut self) -> bool {
        let was_running = self.timer.is_running();
        self.timer.tick();
        was_running && self.timer.is_expired()
    }

    /// Countdown state, for rendering
    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    /// Rendered countdown text: `MM:SS` or the terminal message
    pub fn timer_display(&self) -> String {
        self.timer.display()
    }

    /// The question currently shown
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// Zero-based index of the current question
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of questions in the session
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Select an answer option of the current question by id
    ///
    /// Every sibling resets to `Unselected`; the named option becomes
    /// `SelectedCorrect` or `SelectedIncorrect` by its `is_correct` flag,
    /// and the explanation panel becomes visible and stays visible for
    /// this question. An id outside the current option set is a no-op.
    /// Reselecting the same option yields the same final state. Selection
    /// stays enabled after the countdown expires.
    pub fn select_option(&mut self, option_id: &str) {
        let question = &mut self.questions[self.current];
        if !question.options.iter().any(|o| o.id == option_id) {
            return;
        }

        let mut correct = false;
        for option in question.options.iter_mut() {
            if option.id == option_id {
                option.selection = if option.is_correct {
                    SelectionState::SelectedCorrect
                } else {
                    SelectionState::SelectedIncorrect
                };
                correct = option.is_correct;
            } else {
                option.selection = SelectionState::Unselected;
            }
        }

        self.answered[self.current] = Some(correct);
        self.explanation_visible = true;
    }

    /// Whether the explanation panel is visible for the current question
    pub fn explanation_visible(&self) -> bool {
        self.explanation_visible
    }

    /// Whether the current question has a selection
    pub fn has_answered_current(&self) -> bool {
        self.answered[self.current].is_some()
    }

    /// Toggle the bookmark marker of the current question
    ///
    /// Returns the new marker state. The persistence request is issued by
    /// the caller, one per toggle.
    pub fn toggle_bookmark(&mut self) -> bool {
        let id = self.questions[self.current].id.clone();
        if self.bookmarked.remove(&id) {
            false
        } else {
            self.bookmarked.insert(id);
            true
        }
    }

    /// Whether the current question is bookmarked
    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
            .contains(&self.questions[self.current].id)
    }

    /// Advance to the next question, or finish the session after the last
    ///
    /// Returns `true` while more questions remain. A fresh question starts
    /// with the explanation panel hidden. Advancing a finished session is
    /// a no-op.
    pub fn advance(&mut self) -> bool {
        if self.finished {
            return false;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.explanation_visible = false;
            true
        } else {
            self.finished = true;
            false
        }
    }

    /// Whether the session has passed its last question
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of questions whose latest selection was correct
    pub fn score(&self) -> u32 {
        self.answered
            .iter()
            .filter(|a| matches!(a, Some(true)))
            .count() as u32
    }

    /// Build the attempt record for this session
    pub fn attempt(&self) -> QuizAttempt {
        QuizAttempt::new(
            self.quiz_title.clone(),
            self.score(),
            self.questions.len() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerOption, SelectionState};
    use crate::quiz::timer::TIME_UP_MESSAGE;

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}?", id),
            options: vec![
                AnswerOption::new(format!("{}-a", id), "Right", true),
                AnswerOption::new(format!("{}-b", id), "Wrong", false),
                AnswerOption::new(format!("{}-c", id), "Also wrong", false),
            ],
            explanation: "An explanation.".to_string(),
        }
    }

    fn controller() -> QuizInteractionController {
        QuizInteractionController::new("Test", vec![question("q1"), question("q2")], 90)
    }

    fn selected_ids(c: &QuizInteractionController) -> Vec<String> {
        c.current_question()
            .options
            .iter()
            .filter(|o| o.selection.is_selected())
            .map(|o| o.id.clone())
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let c = controller();
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.total_questions(), 2);
        assert!(!c.explanation_visible());
        assert!(!c.has_answered_current());
        assert_eq!(c.timer_display(), "01:30");
        assert!(selected_ids(&c).is_empty());
    }

    #[test]
    fn test_select_marks_polarity_and_shows_explanation() {
        let mut c = controller();

        c.select_option("q1-b");
        assert_eq!(selected_ids(&c), vec!["q1-b".to_string()]);
        assert_eq!(
            c.current_question().options[1].selection,
            SelectionState::SelectedIncorrect
        );
        assert!(c.explanation_visible());

        c.select_option("q1-a");
        assert_eq!(selected_ids(&c), vec!["q1-a".to_string()]);
        assert_eq!(
            c.current_question().options[0].selection,
            SelectionState::SelectedCorrect
        );
        // Previously incorrect-selected sibling reverted
        assert_eq!(
            c.current_question().options[1].selection,
            SelectionState::Unselected
        );
    }

    #[test]
    fn test_at_most_one_selected_after_any_sequence() {
        let mut c = controller();
        for id in ["q1-a", "q1-c", "q1-b", "q1-b", "q1-a"] {
            c.select_option(id);
            let selected = selected_ids(&c);
            assert_eq!(selected, vec![id.to_string()]);
        }
    }

    #[test]
    fn test_reselection_is_idempotent() {
        let mut c = controller();
        c.select_option("q1-a");
        let once: Vec<SelectionState> = c
            .current_question()
            .options
            .iter()
            .map(|o| o.selection)
            .collect();

        c.select_option("q1-a");
        let twice: Vec<SelectionState> = c
            .current_question()
            .options
            .iter()
            .map(|o| o.selection)
            .collect();

        assert_eq!(once, twice);
        assert!(c.explanation_visible());
    }

    #[test]
    fn test_unknown_option_is_noop() {
        let mut c = controller();
        c.select_option("nope");
        assert!(selected_ids(&c).is_empty());
        assert!(!c.explanation_visible());
        assert!(!c.has_answered_current());

        // Also a no-op after a valid selection
        c.select_option("q1-a");
        c.select_option("nope");
        assert_eq!(selected_ids(&c), vec!["q1-a".to_string()]);
    }

    #[test]
    fn test_explanation_never_rehides_within_question() {
        let mut c = controller();
        c.select_option("q1-b");
        assert!(c.explanation_visible());
        c.select_option("q1-a");
        c.select_option("q1-c");
        assert!(c.explanation_visible());
    }

    #[test]
    fn test_advance_resets_explanation_and_tallies_score() {
        let mut c = controller();
        c.select_option("q1-a");
        assert!(c.advance());
        assert_eq!(c.current_index(), 1);
        assert!(!c.explanation_visible());
        assert!(!c.has_answered_current());

        c.select_option("q2-b");
        assert!(!c.advance());
        assert!(c.is_finished());
        assert_eq!(c.score(), 1);

        // Advancing a finished session does nothing
        assert!(!c.advance());

        let attempt = c.attempt();
        assert_eq!(attempt.score, 1);
        assert_eq!(attempt.total_questions, 2);
        assert_eq!(attempt.quiz_title, "Test");
    }

    #[test]
    fn test_last_selection_wins_for_score() {
        let mut c = controller();
        c.select_option("q1-a");
        c.select_option("q1-b");
        c.advance();
        c.select_option("q2-b");
        c.select_option("q2-a");
        c.advance();
        assert_eq!(c.score(), 1);
    }

    #[test]
    fn test_tick_reports_terminal_transition_once() {
        let mut c = QuizInteractionController::new("Test", vec![question("q1")], 2);
        assert!(!c.tick());
        assert!(c.tick());
        assert_eq!(c.timer_display(), TIME_UP_MESSAGE);
        // Already terminal, never reported again
        assert!(!c.tick());
    }

    #[test]
    fn test_selection_stays_enabled_after_expiry() {
        let mut c = QuizInteractionController::new("Test", vec![question("q1")], 1);
        c.tick();
        assert!(c.timer().is_expired());

        c.select_option("q1-a");
        assert_eq!(selected_ids(&c), vec!["q1-a".to_string()]);
        assert!(c.explanation_visible());
    }

    #[test]
    fn test_bookmark_toggle() {
        let mut c = controller();
        assert!(!c.is_bookmarked());
        assert!(c.toggle_bookmark());
        assert!(c.is_bookmarked());
        assert!(!c.toggle_bookmark());
        assert!(!c.is_bookmarked());

        // Markers are per question
        c.toggle_bookmark();
        c.advance();
        assert!(!c.is_bookmarked());
    }
}
