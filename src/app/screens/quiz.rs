//! Quiz screen implementation
//!
//! Renders the active session: countdown display, question text, the
//! option list with correct/incorrect feedback colors, the explanation
//! panel, the bookmark marker, and the end-of-session summary.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::models::SelectionState;
use crate::quiz::QuizInteractionController;

/// Quiz screen component
///
/// Holds only presentation state (the option cursor); all interaction
/// state lives in the controller.
#[derive(Debug)]
pub struct QuizScreen {
    cursor: usize,
    list_state: ListState,
}

impl QuizScreen {
    /// Create a new quiz screen with the cursor on the first option
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            cursor: 0,
            list_state,
        }
    }

    /// Index of the option under the cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reset the cursor for a fresh question
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.list_state.select(Some(0));
    }

    /// Move the cursor up, wrapping
    pub fn cursor_previous(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
        } else {
            self.cursor = option_count - 1;
        }
        self.list_state.select(Some(self.cursor));
    }

    /// Move the cursor down, wrapping
    pub fn cursor_next(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        if self.cursor < option_count - 1 {
            self.cursor += 1;
        } else {
            self.cursor = 0;
        }
        self.list_state.select(Some(self.cursor));
    }

    /// Render the quiz screen from the controller state
    pub fn render(&mut self, f: &mut Frame, controller: &QuizInteractionController) {
        if controller.is_finished() {
            self.render_summary(f, controller);
            return;
        }

        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header: progress + timer
                Constraint::Length(4), // Question text
                Constraint::Min(6),    // Options
                Constraint::Length(5), // Explanation panel
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_header(f, chunks[0], controller);
        self.render_question(f, chunks[1], controller);
        self.render_options(f, chunks[2], controller);
        self.render_explanation(f, chunks[3], controller);
        self.render_help(f, chunks[4], controller);
    }

    /// Render the progress indicator and the countdown
    fn render_header(
        &self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        controller: &QuizInteractionController,
    ) {
        let header_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let bookmark = if controller.is_bookmarked() { " ★" } else { "" };
        let progress = Paragraph::new(format!(
            "Question {}/{}{}",
            controller.current_index() + 1,
            controller.total_questions(),
            bookmark
        ))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(progress, header_chunks[0]);

        let timer_style = if controller.timer().is_expired() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else if controller.timer().remaining_seconds() <= 10 {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        let timer = Paragraph::new(controller.timer_display())
            .style(timer_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Time"));
        f.render_widget(timer, header_chunks[1]);
    }

    /// Render the question text
    fn render_question(
        &self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        controller: &QuizInteractionController,
    ) {
        let question = Paragraph::new(controller.current_question().text.clone())
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Question"));
        f.render_widget(question, area);
    }

    /// Render the option list with selection feedback colors
    fn render_options(
        &mut self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        controller: &QuizInteractionController,
    ) {
        let items: Vec<ListItem> = controller
            .current_question()
            .options
            .iter()
            .map(|option| {
                let (marker, style) = match option.selection {
                    SelectionState::SelectedCorrect => {
                        ("✔ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
                    }
                    SelectionState::SelectedIncorrect => {
                        ("✘ ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    }
                    SelectionState::Unselected => ("  ", Style::default()),
                };
                ListItem::new(format!("{}{}", marker, option.text)).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Answers"))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    /// Render the explanation panel, blank until the first selection
    fn render_explanation(
        &self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        controller: &QuizInteractionController,
    ) {
        let text = if controller.explanation_visible() {
            controller.current_question().explanation.clone()
        } else {
            String::new()
        };

        let explanation = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title("Explanation"));
        f.render_widget(explanation, area);
    }

    /// Render the help text
    fn render_help(
        &self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        controller: &QuizInteractionController,
    ) {
        let mut spans = vec![
            Span::styled("↑↓", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Move  "),
            Span::styled("Enter", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Answer  "),
            Span::styled("B", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Bookmark  "),
        ];
        if controller.has_answered_current() {
            spans.push(Span::styled(
                "→",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" Next  "));
        }
        spans.push(Span::styled(
            "Esc",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" Leave"));

        let help = Paragraph::new(vec![Line::from(spans)])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(help, area);
    }

    /// Render the end-of-session summary
    fn render_summary(&self, f: &mut Frame, controller: &QuizInteractionController) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(size);

        let score = controller.score();
        let total = controller.total_questions() as u32;
        let lines = vec![
            Line::from(Span::styled(
                "Quiz complete!",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Score: {}/{}", score, total)),
        ];
        let summary = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Results"));
        f.render_widget(summary, chunks[0]);

        let help = Paragraph::new("Enter: Dashboard   Esc: Home")
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(help, chunks[1]);
    }
}

impl Default for QuizScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_navigation_wraps() {
        let mut screen = QuizScreen::new();
        assert_eq!(screen.cursor(), 0);

        screen.cursor_next(3);
        assert_eq!(screen.cursor(), 1);
        screen.cursor_next(3);
        assert_eq!(screen.cursor(), 2);
        screen.cursor_next(3);
        assert_eq!(screen.cursor(), 0);

        screen.cursor_previous(3);
        assert_eq!(screen.cursor(), 2);
    }

    #[test]
    fn test_cursor_reset() {
        let mut screen = QuizScreen::new();
        screen.cursor_next(4);
        screen.cursor_next(4);
        screen.reset_cursor();
        assert_eq!(screen.cursor(), 0);
    }

    #[test]
    fn test_cursor_with_no_options_is_noop() {
        let mut screen = QuizScreen::new();
        screen.cursor_next(0);
        screen.cursor_previous(0);
        assert_eq!(screen.cursor(), 0);
    }
}
