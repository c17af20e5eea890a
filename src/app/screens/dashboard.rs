//! Dashboard screen implementation
//!
//! Shows attempt statistics and history behind a fixed tab set. Exactly
//! one tab is active at a time; switching marks the chosen tab active and
//! every sibling inactive. Stat cards enter with a staggered reveal, each
//! delayed by `index * 100` ms from mount. Purely cosmetic.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};
use std::time::{Duration, Instant};

use crate::models::{AttemptStats, QuizAttempt};

/// Fixed set of dashboard tabs
pub const TAB_TITLES: &[&str] = &["Overview", "History"];

/// Delay between consecutive stat-card reveals
pub const CARD_REVEAL_STEP: Duration = Duration::from_millis(100);

/// How many of `total` cards are visible `elapsed` after mount
///
/// Card `i` appears once `i * 100` ms have passed.
pub fn visible_card_count(elapsed: Duration, total: usize) -> usize {
    let steps = (elapsed.as_millis() / CARD_REVEAL_STEP.as_millis()) as usize + 1;
    steps.min(total)
}

/// Dashboard screen component
#[derive(Debug)]
pub struct DashboardScreen {
    active_tab: usize,
    mounted_at: Instant,
    stats: AttemptStats,
    recent: Vec<QuizAttempt>,
    load_error: Option<String>,
}

impl DashboardScreen {
    /// Create an empty dashboard
    pub fn new() -> Self {
        Self {
            active_tab: 0,
            mounted_at: Instant::now(),
            stats: AttemptStats::default(),
            recent: Vec::new(),
            load_error: None,
        }
    }

    /// Populate the dashboard with fresh history and restart the card
    /// entrance animation
    pub fn mount(&mut self, attempts: Vec<QuizAttempt>) {
        self.stats = AttemptStats::from_attempts(&attempts);
        self.recent = attempts;
        self.recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.recent.truncate(10);
        self.load_error = None;
        self.mounted_at = Instant::now();
    }

    /// Record a history load failure to show instead of stats
    ///
    /// Any previously mounted attempts are dropped so no tab keeps showing
    /// data the failed load may have invalidated.
    pub fn set_load_error(&mut self, message: String) {
        self.load_error = Some(message);
        self.stats = AttemptStats::default();
        self.recent.clear();
    }

    /// Index of the active tab
    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    /// Activate the next tab, wrapping
    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % TAB_TITLES.len();
    }

    /// Activate the previous tab, wrapping
    pub fn previous_tab(&mut self) {
        self.active_tab = (self.active_tab + TAB_TITLES.len() - 1) % TAB_TITLES.len();
    }

    /// Render the dashboard
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tab bar
                Constraint::Min(8),    // Tab content
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_tabs(f, chunks[0]);

        match self.active_tab {
            0 => self.render_overview(f, chunks[1]),
            _ => self.render_history(f, chunks[1]),
        }

        let help = Paragraph::new("Tab: Switch   Esc: Home   Q: Quit")
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(help, chunks[2]);
    }

    /// Render the tab bar with the active tab highlighted
    fn render_tabs(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let titles: Vec<Line> = TAB_TITLES.iter().map(|t| Line::from(*t)).collect();
        let tabs = Tabs::new(titles)
            .select(self.active_tab)
            .style(Style::default().fg(Color::White))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL).title("Dashboard"));
        f.render_widget(tabs, area);
    }

    /// Render the overview tab: stat cards with staggered entrance
    fn render_overview(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        if let Some(error) = &self.load_error {
            let message = Paragraph::new(error.clone())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(message, area);
            return;
        }

        let cards = [
            ("Quizzes Completed", format!("{}", self.stats.quizzes_completed)),
            ("Average Score", format!("{:.1}%", self.stats.average_score)),
            ("Best Score", format!("{:.1}%", self.stats.best_score)),
        ];

        let card_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(area);

        let visible = visible_card_count(self.mounted_at.elapsed(), cards.len());
        for (i, (title, value)) in cards.iter().enumerate().take(visible) {
            let card = Paragraph::new(value.clone())
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(*title));
            f.render_widget(card, card_chunks[i]);
        }
    }

    /// Render the history tab: recent attempts, newest first
    fn render_history(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        if let Some(error) = &self.load_error {
            let message = Paragraph::new(error.clone())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = if self.recent.is_empty() {
            vec![ListItem::new("No attempts yet")]
        } else {
            self.recent
                .iter()
                .map(|attempt| ListItem::new(attempt.summary()))
                .collect()
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Recent Attempts"),
        );
        f.render_widget(list, area);
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_switching_wraps() {
        let mut screen = DashboardScreen::new();
        assert_eq!(screen.active_tab(), 0);

        screen.next_tab();
        assert_eq!(screen.active_tab(), 1);
        screen.next_tab();
        assert_eq!(screen.active_tab(), 0);

        screen.previous_tab();
        assert_eq!(screen.active_tab(), TAB_TITLES.len() - 1);
    }

    #[test]
    fn test_card_reveal_schedule() {
        // Card i appears at i * 100ms
        assert_eq!(visible_card_count(Duration::from_millis(0), 3), 1);
        assert_eq!(visible_card_count(Duration::from_millis(99), 3), 1);
        assert_eq!(visible_card_count(Duration::from_millis(100), 3), 2);
        assert_eq!(visible_card_count(Duration::from_millis(199), 3), 2);
        assert_eq!(visible_card_count(Duration::from_millis(200), 3), 3);
        // Never exceeds the card count
        assert_eq!(visible_card_count(Duration::from_secs(60), 3), 3);
    }

    #[test]
    fn test_mount_computes_stats() {
        let mut screen = DashboardScreen::new();
        screen.mount(vec![
            QuizAttempt::new("Math", 5, 5),
            QuizAttempt::new("Science", 0, 5),
        ]);
        assert_eq!(screen.stats.quizzes_completed, 2);
        assert!((screen.stats.average_score - 50.0).abs() < f64::EPSILON);
        assert!((screen.stats.best_score - 100.0).abs() < f64::EPSILON);
        assert_eq!(screen.recent.len(), 2);
    }

    #[test]
    fn test_load_error_drops_mounted_attempts() {
        let mut screen = DashboardScreen::new();
        screen.mount(vec![
            QuizAttempt::new("Math", 5, 5),
            QuizAttempt::new("Science", 3, 5),
        ]);

        screen.set_load_error("history unreadable".to_string());
        assert!(screen.load_error.is_some());
        assert!(screen.recent.is_empty());
        assert_eq!(screen.stats, AttemptStats::default());

        // A later successful mount recovers
        screen.mount(vec![QuizAttempt::new("Math", 5, 5)]);
        assert!(screen.load_error.is_none());
        assert_eq!(screen.recent.len(), 1);
    }

    #[test]
    fn test_mount_keeps_only_recent_attempts() {
        let mut screen = DashboardScreen::new();
        let attempts: Vec<QuizAttempt> = (0..25)
            .map(|i| QuizAttempt::new(format!("quiz-{}", i), 1, 5))
            .collect();
        screen.mount(attempts);
        assert_eq!(screen.recent.len(), 10);
        assert_eq!(screen.stats.quizzes_completed, 25);
    }
}
