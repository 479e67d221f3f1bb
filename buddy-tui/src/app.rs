//! Application state for the TUI.

use std::time::{Duration, Instant};

use buddy_core::quotes::Quote;
use buddy_core::share::{self, FileShareTarget};
use buddy_core::storage::KeyValueStore;
use buddy_core::{
    preferences, summary, Controller, Event, SavedSession, Screen, TemplateAssistant,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;

/// Store type the TUI runs against (SQLite file or memory)
pub type Store = Box<dyn KeyValueStore>;

/// Delete needs a second press on the same row within this window
const DELETE_CONFIRM_WINDOW: Duration = Duration::from_secs(3);

/// How many recent sessions the start screen offers
pub const RECENT_COUNT: usize = 3;

/// Sub-mode of the summary screen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SummaryMode {
    /// Single-key actions
    #[default]
    Browse,
    /// Typing a title for the save
    EditingTitle,
}

/// Main application state.
pub struct App {
    controller: Controller<Store, TemplateAssistant>,
    /// Answer or chat input being typed
    pub input: String,
    /// Title being typed on the summary screen
    pub title_input: String,
    /// Summary sub-mode
    pub summary_mode: SummaryMode,
    /// Scroll offset for summary and chat
    pub scroll_offset: u16,
    /// Search term on the saved list
    pub search: String,
    /// Whether keystrokes go to the search box
    pub searching: bool,
    /// Saved list selection state
    pub saved_table_state: TableState,
    /// Pending delete confirmation (session id, first press)
    confirm_delete: Option<(String, Instant)>,
    /// One-line message for the footer
    pub notice: Option<String>,
    /// Dark theme enabled
    pub dark_mode: bool,
    /// Quote shown on the start screen
    pub quote: &'static Quote,
    share_target: FileShareTarget,
    last_screen: Screen,
    /// Whether the app should exit
    pub should_quit: bool,
}

impl App {
    pub fn new(
        controller: Controller<Store, TemplateAssistant>,
        dark_mode: bool,
        quote: &'static Quote,
        share_target: FileShareTarget,
    ) -> Self {
        Self {
            controller,
            input: String::new(),
            title_input: String::new(),
            summary_mode: SummaryMode::default(),
            scroll_offset: 0,
            search: String::new(),
            searching: false,
            saved_table_state: TableState::default(),
            confirm_delete: None,
            notice: None,
            dark_mode,
            quote,
            share_target,
            last_screen: Screen::Start,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &Controller<Store, TemplateAssistant> {
        &self.controller
    }

    /// Sessions shown on the saved list: filtered by the search term, newest first
    pub fn visible_sessions(&self) -> Vec<&SavedSession> {
        self.controller.repository().search(&self.search)
    }

    /// Most recent sessions for the start screen
    pub fn recent_sessions(&self) -> Vec<&SavedSession> {
        self.controller.repository().recent(RECENT_COUNT)
    }

    /// Session id awaiting a second delete press, if still inside the window
    pub fn confirming_delete(&self) -> Option<&str> {
        self.confirm_delete
            .as_ref()
            .filter(|(_, at)| at.elapsed() < DELETE_CONFIRM_WINDOW)
            .map(|(id, _)| id.as_str())
    }

    /// Per-frame housekeeping: deliver deferred text, expire confirmations.
    pub fn tick(&mut self) {
        if self.controller.poll() {
            tracing::debug!("Deferred text delivered");
        }
        if self.confirm_delete.is_some() && self.confirming_delete().is_none() {
            self.confirm_delete = None;
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::F(2) => return self.toggle_dark_mode(),
            KeyCode::F(3) => {
                self.dispatch(Event::ViewSaved);
                return;
            }
            _ => {}
        }

        match self.controller.screen() {
            Screen::Start => self.handle_start_key(key),
            Screen::Questioning(_) => self.handle_question_key(key),
            Screen::Summary => self.handle_summary_key(key),
            Screen::SavedList => self.handle_saved_key(key),
            Screen::Chat => self.handle_chat_key(key),
        }
    }

    fn handle_start_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('n') => self.dispatch(Event::Start),
            KeyCode::Char('s') | KeyCode::Char('v') => self.dispatch(Event::ViewSaved),
            KeyCode::Char('t') => self.toggle_dark_mode(),
            KeyCode::Char(c @ '1'..='3') => {
                let index = (c as usize) - ('1' as usize);
                let id = self.recent_sessions().get(index).map(|s| s.id.clone());
                if let Some(id) = id {
                    self.dispatch(Event::Load(id));
                }
            }
            _ => {}
        }
    }

    fn handle_question_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if let Some(question) = self.controller.state().current_question() {
                    let answer = std::mem::take(&mut self.input);
                    self.dispatch(Event::Next {
                        id: question.id.to_string(),
                        answer,
                    });
                }
            }
            KeyCode::Tab => self.dispatch(Event::Skip),
            _ => edit_line(&mut self.input, key),
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        if self.summary_mode == SummaryMode::EditingTitle {
            match key.code {
                KeyCode::Esc => self.summary_mode = SummaryMode::Browse,
                KeyCode::Enter => {
                    let title = self.title_input.clone();
                    let updating = self.controller.state().active_session.is_some();
                    if self.try_dispatch(Event::Save { title }) {
                        self.summary_mode = SummaryMode::Browse;
                        self.notice = Some(if updating {
                            "Updated successfully!".to_string()
                        } else {
                            "Saved successfully!".to_string()
                        });
                    }
                }
                _ => edit_line(&mut self.title_input, key),
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('s') => {
                if self.title_input.is_empty() {
                    self.title_input =
                        summary::default_title(&self.controller.state().idea).unwrap_or_default();
                }
                self.summary_mode = SummaryMode::EditingTitle;
            }
            KeyCode::Char('c') => self.dispatch(Event::StartChat),
            KeyCode::Char('v') => self.dispatch(Event::ViewSaved),
            KeyCode::Char('r') => self.dispatch(Event::Restart),
            KeyCode::Char('x') => self.share(),
            KeyCode::Char('p') => {
                self.notice = Some(share::export_pdf(&self.controller.state().idea).to_string());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn handle_saved_key(&mut self, key: KeyEvent) {
        if self.searching {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.searching = false,
                _ => {
                    edit_line(&mut self.search, key);
                    self.saved_table_state.select(Some(0));
                }
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') => self.dispatch(Event::Back),
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Down | KeyCode::Char('j') => self.select_offset(1),
            KeyCode::Up | KeyCode::Char('k') => self.select_offset(-1),
            KeyCode::Enter | KeyCode::Char('o') => {
                if let Some(id) = self.selected_session_id() {
                    self.dispatch(Event::Load(id));
                }
            }
            KeyCode::Char('f') => {
                if let Some(id) = self.selected_session_id() {
                    self.dispatch(Event::Fork(id));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.dispatch(Event::Back),
            KeyCode::Enter => {
                if self.controller.state().is_waiting_for_reply() {
                    return;
                }
                let message = std::mem::take(&mut self.input);
                self.dispatch(Event::SendMessage(message));
            }
            KeyCode::PageUp => self.scroll_offset = self.scroll_offset.saturating_add(3),
            KeyCode::PageDown => self.scroll_offset = self.scroll_offset.saturating_sub(3),
            _ => edit_line(&mut self.input, key),
        }
    }

    fn dispatch(&mut self, event: Event) {
        self.try_dispatch(event);
    }

    /// Dispatch an event; failures become the footer notice. Returns success.
    fn try_dispatch(&mut self, event: Event) -> bool {
        let ok = match self.controller.dispatch(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Event rejected");
                self.notice = Some(e.to_string());
                false
            }
        };
        self.on_screen_change();
        ok
    }

    /// Reset per-screen input when the controller moved to another screen.
    fn on_screen_change(&mut self) {
        let screen = self.controller.screen();
        if screen == self.last_screen {
            return;
        }

        tracing::debug!(from = ?self.last_screen, to = ?screen, "Screen changed");
        self.scroll_offset = 0;
        self.input = self.controller.state().draft_answer().to_string();

        match screen {
            Screen::Start | Screen::Questioning(0) => {
                self.title_input.clear();
                self.notice = None;
            }
            Screen::Summary if !matches!(self.last_screen, Screen::Chat) => {
                self.title_input.clear();
                self.summary_mode = SummaryMode::Browse;
            }
            Screen::SavedList => {
                self.search.clear();
                self.searching = false;
                self.confirm_delete = None;
                self.saved_table_state.select(Some(0));
            }
            _ => {}
        }

        self.last_screen = screen;
    }

    fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        let store = self.controller.repository().store();
        if let Err(e) = preferences::set_dark_mode(store, self.dark_mode) {
            tracing::warn!(error = %e, "Failed to save dark mode preference");
        }
    }

    fn share(&mut self) {
        self.notice = Some(
            match share::share(&self.share_target, &self.controller.state().idea) {
                Ok(message) => message,
                Err(e) => {
                    tracing::warn!(error = %e, "Share failed");
                    e.to_string()
                }
            },
        );
    }

    fn selected_session_id(&self) -> Option<String> {
        let index = self.saved_table_state.selected()?;
        self.visible_sessions().get(index).map(|s| s.id.clone())
    }

    fn select_offset(&mut self, delta: isize) {
        let len = self.visible_sessions().len();
        if len == 0 {
            self.saved_table_state.select(None);
            return;
        }
        let current = self.saved_table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.saved_table_state.select(Some(next as usize));
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_session_id() else {
            return;
        };

        if self.confirming_delete() == Some(id.as_str()) {
            self.confirm_delete = None;
            if self.try_dispatch(Event::Delete(id)) {
                self.select_offset(0);
            }
        } else {
            self.notice = Some("Press d again to confirm delete".to_string());
            self.confirm_delete = Some((id, Instant::now()));
        }
    }
}

/// Apply a key to a single-line text buffer.
fn edit_line(buffer: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => buffer.push(c),
        KeyCode::Backspace => {
            buffer.pop();
        }
        _ => {}
    }
}
