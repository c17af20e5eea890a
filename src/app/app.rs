//! Main application controller
//!
//! Manages the application state, screen rendering loop, and session
//! lifecycle. The terminal handle is passed into the run loop rather than
//! owned here, keeping the event handlers usable without a terminal.

use crate::{
    app::{
        screens::{DashboardScreen, HomeAction, HomeScreen, QuizScreen},
        state::{AppState, NavigationAction, StateManager},
        tui::Tui,
    },
    config::{persistence::AttemptStorage, AppConfig},
    models::QuestionBank,
    net::BookmarkClient,
    quiz::{spawn_ticker, QuizInteractionController, TickerHandle, TimerEvent},
    Result,
};
use tokio::sync::mpsc;

/// Application controller
pub struct App {
    /// Application state manager
    state_manager: StateManager,
    /// Application config
    config: AppConfig,
    /// Screen components
    home_screen: HomeScreen,
    quiz_screen: QuizScreen,
    dashboard_screen: DashboardScreen,
    /// Interaction state of the active session, if any
    controller: Option<QuizInteractionController>,
    /// Ticker task handle of the active session
    ticker: Option<TickerHandle>,
    /// Tick receiver of the active session
    timer_rx: Option<mpsc::Receiver<TimerEvent>>,
    /// Bookmark persistence collaborator; absent when no server configured
    bookmark_client: Option<BookmarkClient>,
    /// Attempt history storage
    storage: AttemptStorage,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = AppConfig::load()?;
        let bookmark_client = config
            .server_url
            .as_ref()
            .map(|url| BookmarkClient::new(url.clone(), config.csrf_token.clone()));

        Ok(Self {
            state_manager: StateManager::new(),
            config,
            home_screen: HomeScreen::new(),
            quiz_screen: QuizScreen::new(),
            dashboard_screen: DashboardScreen::new(),
            controller: None,
            ticker: None,
            timer_rx: None,
            bookmark_client,
            storage: AttemptStorage::new()?,
        })
    }

    /// Run the main application loop
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        while !self.state_manager.should_quit() {
            self.apply_pending_ticks();
            self.draw(tui)?;
            self.handle_events(tui)?;
        }
        Ok(())
    }

    /// Consume queued ticker events and cancel the ticker on the terminal tick
    fn apply_pending_ticks(&mut self) {
        let Some(rx) = &mut self.timer_rx else {
            return;
        };
        while let Ok(TimerEvent::Tick) = rx.try_recv() {
            if let Some(controller) = &mut self.controller {
                if controller.tick() {
                    if let Some(ticker) = &mut self.ticker {
                        ticker.cancel();
                    }
                }
            }
        }
    }

    /// Draw the current screen
    fn draw(&mut self, tui: &mut Tui) -> Result<()> {
        let state = self.state_manager.current_state().clone();
        let controller = &self.controller;
        let home_screen = &mut self.home_screen;
        let quiz_screen = &mut self.quiz_screen;
        let dashboard_screen = &mut self.dashboard_screen;

        tui.draw(|f| match state {
            AppState::Home => home_screen.render(f),
            AppState::Quiz => {
                if let Some(controller) = controller {
                    quiz_screen.render(f, controller);
                }
            }
            AppState::Dashboard => dashboard_screen.render(f),
        })?;
        Ok(())
    }

    /// Handle keyboard events and update state
    fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        if let Some(key) = tui.handle_events()? {
            let nav_action = StateManager::key_to_navigation(key);
            self.handle_action(nav_action);
        }
        Ok(())
    }

    /// Dispatch a navigation action to the current screen
    fn handle_action(&mut self, action: NavigationAction) {
        // Global key handling
        if action == NavigationAction::Quit {
            self.state_manager.quit();
            return;
        }

        match self.state_manager.current_state().clone() {
            AppState::Home => self.handle_home_events(action),
            AppState::Quiz => self.handle_quiz_events(action),
            AppState::Dashboard => self.handle_dashboard_events(action),
        }
    }

    fn handle_home_events(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Up => self.home_screen.select_previous(),
            NavigationAction::Down => self.home_screen.select_next(),
            NavigationAction::Select => match self.home_screen.selected_action() {
                HomeAction::StartQuiz => self.start_quiz(),
                HomeAction::Dashboard => self.open_dashboard(),
                HomeAction::Quit => self.state_manager.quit(),
            },
            NavigationAction::Back => self.state_manager.quit(),
            _ => {}
        }
    }

    fn handle_quiz_events(&mut self, action: NavigationAction) {
        if self.controller.is_none() {
            return;
        }

        let finished = self
            .controller
            .as_ref()
            .is_some_and(|c| c.is_finished());
        if finished {
            match action {
                NavigationAction::Select => {
                    self.teardown_quiz();
                    self.open_dashboard();
                }
                NavigationAction::Back => {
                    self.teardown_quiz();
                    self.state_manager.transition_to(AppState::Home);
                }
                _ => {}
            }
            return;
        }

        match action {
            NavigationAction::Up | NavigationAction::Down => {
                if let Some(controller) = &self.controller {
                    let option_count = controller.current_question().options.len();
                    if action == NavigationAction::Up {
                        self.quiz_screen.cursor_previous(option_count);
                    } else {
                        self.quiz_screen.cursor_next(option_count);
                    }
                }
            }
            NavigationAction::Select => {
                let cursor = self.quiz_screen.cursor();
                if let Some(controller) = &mut self.controller {
                    if let Some(option) = controller.current_question().options.get(cursor) {
                        let option_id = option.id.clone();
                        controller.select_option(&option_id);
                    }
                }
            }
            NavigationAction::Bookmark => {
                let question_id = match &mut self.controller {
                    Some(controller) => {
                        let id = controller.current_question().id.clone();
                        controller.toggle_bookmark();
                        id
                    }
                    None => return,
                };
                // One fire-and-forget request per toggle, when a server is
                // configured
                if let Some(client) = &self.bookmark_client {
                    client.toggle(&question_id);
                }
            }
            NavigationAction::Right | NavigationAction::Next => {
                let advanced = match &mut self.controller {
                    Some(controller) if controller.has_answered_current() => {
                        Some(controller.advance())
                    }
                    _ => None,
                };
                match advanced {
                    Some(true) => self.quiz_screen.reset_cursor(),
                    Some(false) => self.finish_quiz(),
                    None => {}
                }
            }
            NavigationAction::Back => {
                self.teardown_quiz();
                self.state_manager.transition_to(AppState::Home);
            }
            _ => {}
        }
    }

    fn handle_dashboard_events(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Next | NavigationAction::Right => self.dashboard_screen.next_tab(),
            NavigationAction::Previous | NavigationAction::Left => {
                self.dashboard_screen.previous_tab()
            }
            // The dashboard always leads back to the menu; the session it
            // may have been opened from is already torn down
            NavigationAction::Back => self.state_manager.transition_to(AppState::Home),
            _ => {}
        }
    }

    /// Start a new quiz session
    ///
    /// A configured bank that fails to load keeps the user on the home
    /// screen with the error shown; it does not silently swap decks.
    fn start_quiz(&mut self) {
        let bank = match &self.config.questions_path {
            Some(path) => match QuestionBank::load(path) {
                Ok(bank) => bank,
                Err(e) => {
                    self.home_screen.set_status(Some(e.to_string()));
                    return;
                }
            },
            None => QuestionBank::builtin(),
        };
        self.home_screen.set_status(None);

        let questions = bank.sample(self.config.questions_per_quiz);
        if questions.is_empty() {
            return;
        }

        self.controller = Some(QuizInteractionController::new(
            bank.title.clone(),
            questions,
            self.config.timer_seconds,
        ));
        self.quiz_screen.reset_cursor();

        let (tick_tx, tick_rx) = mpsc::channel(8);
        self.ticker = Some(spawn_ticker(tick_tx));
        self.timer_rx = Some(tick_rx);

        self.state_manager.transition_to(AppState::Quiz);
    }

    /// Record the finished session in the attempt history
    fn finish_quiz(&mut self) {
        // Ticker stops as soon as the session is over
        if let Some(ticker) = &mut self.ticker {
            ticker.cancel();
        }
        if let Some(controller) = &self.controller {
            // History is best effort; a failed write never blocks the summary
            let _ = self.storage.append_attempt(controller.attempt());
        }
    }

    /// Tear down the active session, cancelling its ticker
    fn teardown_quiz(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.timer_rx = None;
        self.controller = None;
    }

    /// Load the attempt history and show the dashboard
    fn open_dashboard(&mut self) {
        match self.storage.load_attempts() {
            Ok(attempts) => self.dashboard_screen.mount(attempts),
            Err(e) => self.dashboard_screen.set_load_error(e.to_string()),
        }
        self.state_manager.transition_to(AppState::Dashboard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_app(storage: AttemptStorage, config: AppConfig) -> App {
        App {
            state_manager: StateManager::new(),
            config,
            home_screen: HomeScreen::new(),
            quiz_screen: QuizScreen::new(),
            dashboard_screen: DashboardScreen::new(),
            controller: None,
            ticker: None,
            timer_rx: None,
            bookmark_client: None,
            storage,
        }
    }

    fn finish_session(app: &mut App) {
        app.handle_action(NavigationAction::Select); // Home -> start quiz
        assert_eq!(*app.state_manager.current_state(), AppState::Quiz);

        let total = app.controller.as_ref().unwrap().total_questions();
        for _ in 0..total {
            app.handle_action(NavigationAction::Select); // answer at cursor
            app.handle_action(NavigationAction::Right); // advance
        }
        assert!(app.controller.as_ref().unwrap().is_finished());
    }

    #[tokio::test]
    async fn test_dashboard_back_after_finished_quiz_returns_home() {
        let dir = tempdir().unwrap();
        let storage = AttemptStorage::at_path(dir.path().join("attempts.json"));
        let mut app = test_app(storage, AppConfig::default());

        finish_session(&mut app);

        // Summary -> dashboard tears the session down
        app.handle_action(NavigationAction::Select);
        assert_eq!(*app.state_manager.current_state(), AppState::Dashboard);
        assert!(app.controller.is_none());

        // Back must land on the menu, never on the torn-down session
        app.handle_action(NavigationAction::Back);
        assert_eq!(*app.state_manager.current_state(), AppState::Home);

        // And the menu still responds
        app.handle_action(NavigationAction::Down);
        assert_eq!(app.home_screen.selected_action(), HomeAction::Dashboard);
    }

    #[tokio::test]
    async fn test_finished_session_is_recorded() {
        let dir = tempdir().unwrap();
        let storage = AttemptStorage::at_path(dir.path().join("attempts.json"));
        let mut app = test_app(storage, AppConfig::default());

        finish_session(&mut app);

        let attempts = app.storage.load_attempts().unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(
            attempts[0].total_questions as usize,
            AppConfig::default().questions_per_quiz
        );
    }

    #[tokio::test]
    async fn test_broken_bank_path_stays_home_with_status() {
        let dir = tempdir().unwrap();
        let storage = AttemptStorage::at_path(dir.path().join("attempts.json"));
        let config = AppConfig {
            questions_path: Some(dir.path().join("missing.json")),
            ..AppConfig::default()
        };
        let mut app = test_app(storage, config);

        app.handle_action(NavigationAction::Select); // Home -> start quiz

        assert_eq!(*app.state_manager.current_state(), AppState::Home);
        assert!(app.controller.is_none());
        assert!(app.home_screen.status().is_some());
    }

    #[tokio::test]
    async fn test_bank_status_clears_on_successful_start() {
        let dir = tempdir().unwrap();
        let storage = AttemptStorage::at_path(dir.path().join("attempts.json"));
        let bank_path = dir.path().join("bank.json");
        std::fs::write(
            &bank_path,
            serde_json::to_string(&QuestionBank::builtin()).unwrap(),
        )
        .unwrap();
        let config = AppConfig {
            questions_path: Some(bank_path),
            ..AppConfig::default()
        };
        let mut app = test_app(storage, config);
        app.home_screen.set_status(Some("stale".to_string()));

        app.handle_action(NavigationAction::Select);

        assert_eq!(*app.state_manager.current_state(), AppState::Quiz);
        assert!(app.home_screen.status().is_none());
    }

    #[tokio::test]
    async fn test_leaving_quiz_cancels_ticker() {
        let dir = tempdir().unwrap();
        let storage = AttemptStorage::at_path(dir.path().join("attempts.json"));
        let mut app = test_app(storage, AppConfig::default());

        app.handle_action(NavigationAction::Select);
        assert!(app.ticker.is_some());

        app.handle_action(NavigationAction::Back);
        assert_eq!(*app.state_manager.current_state(), AppState::Home);
        assert!(app.ticker.is_none());
        assert!(app.timer_rx.is_none());
        assert!(app.controller.is_none());
    }
}
