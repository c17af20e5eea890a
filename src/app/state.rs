//! Application state management
//!
//! Handles screen transitions, navigation logic, and keyboard event
//! processing for the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application screens/states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Entry menu with Start Quiz, Dashboard, Quit
    Home,
    /// Active quiz session with countdown and answer feedback
    Quiz,
    /// Attempt history and statistics behind tabs
    Dashboard,
}

impl Default for AppState {
    fn default() -> Self {
        Self::Home
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Next tab (Tab)
    Next,
    /// Previous tab (Shift+Tab)
    Previous,
    /// Toggle the bookmark on the current question (b)
    Bookmark,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug)]
pub struct StateManager {
    current_state: AppState,
    previous_state: Option<AppState>,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the home menu
    pub fn new() -> Self {
        Self {
            current_state: AppState::Home,
            previous_state: None,
            should_quit: false,
        }
    }

    /// Get the current application state
    pub fn current_state(&self) -> &AppState {
        &self.current_state
    }

    /// Get the previous state if available
    pub fn previous_state(&self) -> Option<&AppState> {
        self.previous_state.as_ref()
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Transition to a new state
    pub fn transition_to(&mut self, new_state: AppState) {
        if new_state != self.current_state {
            self.previous_state = Some(self.current_state.clone());
            self.current_state = new_state;
        }
    }

    /// Go back to the previous state if available, otherwise go to Home
    pub fn go_back(&mut self) {
        match self.previous_state.take() {
            Some(prev_state) => {
                self.current_state = prev_state;
            }
            None => {
                self.current_state = AppState::Home;
            }
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            // Bookmark toggle
            KeyCode::Char('b') | KeyCode::Char('B') => NavigationAction::Bookmark,

            // Tab navigation
            KeyCode::Tab => NavigationAction::Next,
            KeyCode::BackTab => NavigationAction::Previous,

            _ => NavigationAction::None,
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
