//! Screen controller
//!
//! [`ScreenState`] is a plain value; [`ScreenState::reduce`] turns a state and
//! an [`Event`] into the next state. The only side effects go through the
//! [`SessionRepository`] handed in with the event. [`Controller`] bundles the
//! state with its repository, assistant and clock for callers that just want
//! to dispatch events.
//!
//! Events that make no sense on the current screen (a `Skip` on the summary,
//! a `Save` while questioning) leave the state untouched.

use crate::assistant::IdeaAssistant;
use crate::clock::{Clock, SystemClock};
use crate::config::AssistantConfig;
use crate::deferred::{Deferred, Generation, Poll};
use crate::error::{Error, Result};
use crate::questions;
use crate::repo::SessionRepository;
use crate::storage::KeyValueStore;
use crate::types::{AppIdea, ChatMessage, ChatRole, Question, SavedSession};

/// Message shown when a save is attempted without a title
pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a title for your session";

/// The five mutually exclusive screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Start,
    /// Asking the question at this zero-based index
    Questioning(usize),
    Summary,
    SavedList,
    Chat,
}

/// Everything the presentation layer can ask the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a fresh questionnaire
    Start,
    /// Record an answer and move on
    Next { id: String, answer: String },
    /// Move on without answering
    Skip,
    /// Drop all working state and return to the start screen
    Restart,
    /// Save the working idea under a title
    Save { title: String },
    ViewSaved,
    Load(String),
    Fork(String),
    Delete(String),
    StartChat,
    /// Chat returns to the summary, the saved list to the start screen
    Back,
    SendMessage(String),
}

/// Transient working state of the application.
#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    pub screen: Screen,
    /// Answers collected so far
    pub idea: AppIdea,
    /// Saved session the working idea belongs to; `None` means the next save mints a new one
    pub active_session: Option<String>,
    /// Current chat transcript, never persisted
    pub chat: Vec<ChatMessage>,
    /// Suggestions for the summary screen; `None` while they are being generated
    pub suggestions: Option<Vec<String>>,
    generation: Generation,
    pending_suggestions: Option<Deferred<Vec<String>>>,
    pending_reply: Option<Deferred<String>>,
}

/// Collaborators a reduction may use.
pub struct Env<'a, S, A> {
    pub repo: &'a mut SessionRepository<S>,
    pub assistant: &'a A,
    pub delays: &'a AssistantConfig,
    /// Epoch milliseconds
    pub now: i64,
}

impl ScreenState {
    /// Apply `event`, returning the next state.
    ///
    /// On error the caller keeps its previous state; nothing in the
    /// repository has changed either.
    pub fn reduce<S: KeyValueStore, A: IdeaAssistant>(
        mut self,
        event: Event,
        env: Env<'_, S, A>,
    ) -> Result<Self> {
        match (self.screen, event) {
            (Screen::Start, Event::Start) => {
                self.idea = AppIdea::new();
                self.chat.clear();
                self.active_session = None;
                self.enter(Screen::Questioning(0));
            }
            (Screen::Questioning(index), Event::Next { id, answer }) => {
                self.idea.set(id, answer);
                self.advance(index, &env);
            }
            (Screen::Questioning(index), Event::Skip) => self.advance(index, &env),
            (Screen::Summary, Event::Restart) => {
                let generation = self.generation;
                self = ScreenState {
                    generation,
                    ..Default::default()
                };
                self.enter(Screen::Start);
            }
            (Screen::Summary, Event::Save { title }) => {
                if title.trim().is_empty() {
                    return Err(Error::Validation(EMPTY_TITLE_MESSAGE.to_string()));
                }

                let id = self
                    .active_session
                    .clone()
                    .unwrap_or_else(SavedSession::new_id);
                env.repo.save(SavedSession {
                    id: id.clone(),
                    title,
                    timestamp: env.now,
                    app_idea: self.idea.clone(),
                })?;

                tracing::info!(id = %id, "Saved session");
                self.active_session = Some(id);
            }
            (_, Event::ViewSaved) => self.enter(Screen::SavedList),
            (Screen::Start | Screen::SavedList, Event::Load(id)) => {
                let session = env.repo.get(&id)?;
                self.idea = session.app_idea.clone();
                self.active_session = Some(session.id.clone());
                self.chat.clear();
                tracing::info!(id = %id, "Loaded session");
                self.enter_summary(&env);
            }
            (Screen::SavedList, Event::Fork(id)) => {
                let session = env.repo.get(&id)?;
                self.idea = session.app_idea.clone();
                self.active_session = None;
                self.chat.clear();
                tracing::info!(source = %id, "Forked session");
                self.enter_summary(&env);
            }
            (Screen::SavedList, Event::Delete(id)) => {
                env.repo.delete(&id)?;
                if self.active_session.as_deref() == Some(id.as_str()) {
                    self.active_session = None;
                }
            }
            (Screen::Summary, Event::StartChat) => {
                self.enter(Screen::Chat);
                if self.chat.is_empty() {
                    let greeting = env.assistant.greeting(&self.idea);
                    self.chat
                        .push(ChatMessage::new(ChatRole::Assistant, greeting, env.now));
                }
            }
            (Screen::Chat, Event::Back) => self.enter_summary(&env),
            (Screen::SavedList, Event::Back) => self.enter(Screen::Start),
            (Screen::Chat, Event::SendMessage(text)) => {
                if text.trim().is_empty() || self.is_waiting_for_reply() {
                    tracing::debug!("Ignoring chat message while empty or awaiting a reply");
                } else {
                    let reply = env.assistant.reply(&self.idea, &text);
                    self.chat.push(ChatMessage::new(ChatRole::User, text, env.now));
                    self.pending_reply = Some(Deferred::schedule(
                        &self.generation,
                        env.now,
                        env.delays.reply_delay_ms,
                        reply,
                    ));
                }
            }
            (screen, event) => {
                tracing::debug!(?screen, ?event, "Ignoring event not valid on this screen");
            }
        }

        Ok(self)
    }

    /// Deliver deferred results that are due. Returns whether anything changed.
    pub fn poll(&mut self, now: i64) -> bool {
        let mut changed = false;

        if let Some(pending) = self.pending_suggestions.take() {
            match pending.poll(&self.generation, now) {
                Poll::Ready(suggestions) => {
                    self.suggestions = Some(suggestions);
                    changed = true;
                }
                Poll::Pending(pending) => self.pending_suggestions = Some(pending),
                Poll::Stale => tracing::debug!("Dropped suggestions for a screen no longer shown"),
            }
        }

        if let Some(pending) = self.pending_reply.take() {
            match pending.poll(&self.generation, now) {
                Poll::Ready(reply) => {
                    self.chat
                        .push(ChatMessage::new(ChatRole::Assistant, reply, now));
                    changed = true;
                }
                Poll::Pending(pending) => self.pending_reply = Some(pending),
                Poll::Stale => tracing::debug!("Dropped chat reply for a screen no longer shown"),
            }
        }

        changed
    }

    /// Question being asked, when questioning
    pub fn current_question(&self) -> Option<&'static Question> {
        match self.screen {
            Screen::Questioning(index) => questions::at(index),
            _ => None,
        }
    }

    /// One-based step and total, when questioning
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.screen {
            Screen::Questioning(index) => Some((index + 1, questions::total())),
            _ => None,
        }
    }

    /// Existing answer for the current question, used to prefill the input
    pub fn draft_answer(&self) -> &str {
        self.current_question()
            .and_then(|q| self.idea.get(q.id))
            .unwrap_or("")
    }

    pub fn is_waiting_for_reply(&self) -> bool {
        self.pending_reply
            .as_ref()
            .is_some_and(|p| p.is_current(&self.generation))
    }

    pub fn is_loading_suggestions(&self) -> bool {
        self.screen == Screen::Summary && self.suggestions.is_none()
    }

    fn enter(&mut self, screen: Screen) {
        self.generation.bump();
        self.screen = screen;
    }

    fn enter_summary<S, A: IdeaAssistant>(&mut self, env: &Env<'_, S, A>) {
        self.enter(Screen::Summary);
        if self.idea.is_empty() {
            self.suggestions = Some(Vec::new());
            self.pending_suggestions = None;
        } else {
            self.suggestions = None;
            self.pending_suggestions = Some(Deferred::schedule(
                &self.generation,
                env.now,
                env.delays.suggestion_delay_ms,
                env.assistant.suggestions(&self.idea),
            ));
        }
    }

    fn advance<S, A: IdeaAssistant>(&mut self, index: usize, env: &Env<'_, S, A>) {
        if index + 1 < questions::total() {
            self.enter(Screen::Questioning(index + 1));
        } else {
            self.enter_summary(env);
        }
    }
}

/// State plus the collaborators needed to reduce it.
pub struct Controller<S, A> {
    state: ScreenState,
    repo: SessionRepository<S>,
    assistant: A,
    delays: AssistantConfig,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore, A: IdeaAssistant> Controller<S, A> {
    pub fn new(repo: SessionRepository<S>, assistant: A, delays: &AssistantConfig) -> Self {
        Self {
            state: ScreenState::default(),
            repo,
            assistant,
            delays: delays.clone(),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the system clock (tests drive time by hand)
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Apply an event. On error the state is left as it was.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        let env = Env {
            repo: &mut self.repo,
            assistant: &self.assistant,
            delays: &self.delays,
            now: self.clock.now_millis(),
        };
        self.state = self.state.clone().reduce(event, env)?;
        Ok(())
    }

    /// Deliver any deferred text that is due
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now_millis();
        self.state.poll(now)
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    pub fn repository(&self) -> &SessionRepository<S> {
        &self.repo
    }
}
