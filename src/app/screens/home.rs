//! Home screen implementation
//!
//! Entry menu with Start Quiz, Dashboard, and Quit options.
//! Includes navigation highlighting and responsive layout.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Actions selectable from the home menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    StartQuiz,
    Dashboard,
    Quit,
}

const MENU_ITEMS: &[(HomeAction, &str)] = &[
    (HomeAction::StartQuiz, "Start Quiz"),
    (HomeAction::Dashboard, "Dashboard"),
    (HomeAction::Quit, "Quit"),
];

/// Home screen component with the main menu
#[derive(Debug)]
pub struct HomeScreen {
    selected_index: usize,
    list_state: ListState,
    /// Message shown under the menu, e.g. a failed question bank load
    status: Option<String>,
}

impl HomeScreen {
    /// Create a new home screen
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            selected_index: 0,
            list_state,
            status: None,
        }
    }

    /// Set or clear the status message
    pub fn set_status(&mut self, status: Option<String>) {
        self.status = status;
    }

    /// The current status message, if any
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Get the currently selected action
    pub fn selected_action(&self) -> HomeAction {
        MENU_ITEMS[self.selected_index].0
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = MENU_ITEMS.len() - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected_index < MENU_ITEMS.len() - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Render the home screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Min(8),    // Menu area
                Constraint::Length(1), // Status line
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_menu(f, chunks[1]);
        self.render_status(f, chunks[2]);
        self.render_help(f, chunks[3]);
    }

    /// Render the title section
    fn render_title(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Main title
                Constraint::Length(2), // Subtitle
            ])
            .split(area);

        let title = Paragraph::new("EDUQUIZ")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(title, title_chunks[0]);

        let subtitle = Paragraph::new("Terminal Quiz Practice")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    /// Render the main menu
    fn render_menu(&mut self, f: &mut Frame, area: ratatui::layout::Rect) {
        let items: Vec<ListItem> = MENU_ITEMS
            .iter()
            .map(|(_, label)| ListItem::new(*label))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    /// Render the status line
    fn render_status(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        if let Some(status) = &self.status {
            let line = Paragraph::new(status.as_str())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
            f.render_widget(line, area);
        }
    }

    /// Render the help text
    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let help_text = vec![Line::from(vec![
            Span::styled(
                "↑↓",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Navigate  "),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Select  "),
            Span::styled(
                "Q",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Quit"),
        ])];

        let help = Paragraph::new(help_text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

        f.render_widget(help, area);
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}
