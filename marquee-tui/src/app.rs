//! Application event loop and key handling.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use marquee_core::{MarqueeError, Result, SearchSession, SessionEvent};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::widgets::ListState;

use crate::ui;

/// Milliseconds between frames; also bounds input latency.
const TICK_MILLIS: u64 = 50;

/// Terminal front end over one search session.
pub struct App {
    session: SearchSession,
    /// Highlighted entry of the suggestion dropdown, if any.
    selected_suggestion: Option<usize>,
    /// Card list scroll state, active when no suggestions are shown.
    card_state: ListState,
    should_quit: bool,
}

impl App {
    pub fn new(session: SearchSession) -> Self {
        Self {
            session,
            selected_suggestion: None,
            card_state: ListState::default(),
            should_quit: false,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn selected_suggestion(&self) -> Option<usize> {
        self.selected_suggestion
    }

    pub(crate) fn card_state(&mut self) -> &mut ListState {
        &mut self.card_state
    }

    /// Drives the session and redraws until the user quits.
    ///
    /// # Errors
    /// - `MarqueeError::Io` - Terminal drawing or input polling failed
    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        MarqueeError: From<<B as Backend>::Error>,
    {
        let mut tick = tokio::time::interval(Duration::from_millis(TICK_MILLIS));

        while !self.should_quit {
            self.pump_session_events();
            terminal.draw(|frame| ui::draw(frame, &mut self))?;

            // Yield to the runtime so debounce and fetch tasks progress.
            tick.tick().await;

            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Applies settled background reports to the session.
    pub fn pump_session_events(&mut self) {
        while let Some(event) = self.session.try_next_event() {
            self.apply_session_event(event);
        }
    }

    /// Applies one settled report and keeps view state consistent with it.
    pub fn apply_session_event(&mut self, event: SessionEvent) {
        let suggestions_settled = matches!(event, SessionEvent::SuggestionsReady(_));
        self.session.apply_event(event);

        if suggestions_settled {
            // The list was replaced wholesale; a stale highlight index must
            // not outlive it.
            let len = self.session.suggestions().len();
            self.selected_suggestion = self.selected_suggestion.filter(|&i| i < len);
        }
    }

    /// Translates one key press into session calls.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.input_changed(String::new());
                self.selected_suggestion = None;
            }
            KeyCode::Char(c) => {
                let mut text = self.session.query().to_string();
                text.push(c);
                self.session.input_changed(text);
                self.selected_suggestion = None;
            }
            KeyCode::Backspace => {
                let mut text = self.session.query().to_string();
                text.pop();
                self.session.input_changed(text);
                self.selected_suggestion = None;
            }
            KeyCode::Enter => {
                match self.selected_suggestion.take() {
                    Some(index) => self.session.select_suggestion(index),
                    None => self.session.submit(),
                }
                self.card_state.select(None);
            }
            KeyCode::Down => self.move_down(),
            KeyCode::Up => self.move_up(),
            _ => {}
        }
    }

    fn move_down(&mut self) {
        let suggestion_count = self.session.suggestions().len();
        if suggestion_count > 0 {
            self.selected_suggestion = Some(match self.selected_suggestion {
                Some(index) if index + 1 < suggestion_count => index + 1,
                Some(index) => index,
                None => 0,
            });
            return;
        }

        let card_count = self.session.movies().len();
        if card_count > 0 {
            let next = match self.card_state.selected() {
                Some(index) if index + 1 < card_count => index + 1,
                Some(index) => index,
                None => 0,
            };
            self.card_state.select(Some(next));
        }
    }

    fn move_up(&mut self) {
        if !self.session.suggestions().is_empty() {
            self.selected_suggestion = match self.selected_suggestion {
                Some(0) | None => None,
                Some(index) => Some(index - 1),
            };
            return;
        }

        if let Some(index) = self.card_state.selected() {
            self.card_state.select(index.checked_sub(1));
        }
    }
}

/// Runs the TUI over a session, owning terminal setup and teardown.
///
/// # Errors
/// - `MarqueeError::Io` - Terminal setup, drawing, or teardown failed
pub async fn run(session: SearchSession) -> Result<()> {
    tracing::info!("starting interactive session");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(session).run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use marquee_core::providers::MockProvider;
    use marquee_core::{SearchConfig, SearchSession};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn test_app(catalog: MockProvider) -> App {
        let mut session = SearchSession::new(Arc::new(catalog), SearchConfig::default());
        // Settle the seed cycle so tests start from a quiet state.
        while session.is_loading() {
            let event = session.next_event().await.expect("event channel open");
            session.apply_event(event);
        }
        App::new(session)
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_updates_query() {
        let mut app = test_app(MockProvider::with_library(1)).await;

        app.handle_key(key(KeyCode::Char('b')));
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.session().query(), "bat");

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.session().query(), "ba");
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_with_highlight_submits_suggestion() {
        let catalog = MockProvider::with_library(2);
        let mut app = test_app(catalog.clone()).await;

        app.handle_key(key(KeyCode::Char('t')));
        // Wait out the debounce and apply the settled lookup.
        let event = app.session.next_event().await.expect("suggestion event");
        app.session.apply_event(event);
        assert_eq!(app.session().suggestions().len(), 2);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_suggestion(), Some(1));

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session().committed_query(), Some("Test Movie 2"));
        assert!(app.session().suggestions().is_empty());
        assert_eq!(app.selected_suggestion(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_without_highlight_submits_typed_text() {
        let mut app = test_app(MockProvider::with_library(1)).await;

        app.handle_key(key(KeyCode::Char('b')));
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Char('t')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.session().committed_query(), Some("bat"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_highlight_is_dropped_when_list_shrinks() {
        let catalog = MockProvider::with_library(2);
        let mut app = test_app(catalog.clone()).await;

        app.handle_key(key(KeyCode::Char('t')));
        let event = app.session.next_event().await.expect("suggestion event");
        app.apply_session_event(event);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_suggestion(), Some(1));

        // A settling lookup replaces the list wholesale; the highlight must
        // not survive a shorter replacement.
        app.apply_session_event(SessionEvent::SuggestionsReady(Vec::new()));
        assert_eq!(app.selected_suggestion(), None);
    }
}
