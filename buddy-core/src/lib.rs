//! # buddy-core
//!
//! Core library for Brainstorm Buddy - a guided questionnaire that helps
//! shape an app idea.
//!
//! This library provides:
//! - Domain types for questions, answers, saved sessions and chat messages
//! - A key-value storage layer (SQLite or in-memory)
//! - The session repository with legacy-key migration
//! - The screen controller, a state reducer driven by [`Event`]s
//! - The template-based suggestion and chat reply generator
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! The controller owns the in-progress [`AppIdea`] and hands it read-only to
//! the [`IdeaAssistant`] and, on explicit save, to the [`SessionRepository`].
//! The repository is the only owner of durable state. Generated text arrives
//! through [`Deferred`] results keyed by a generation token, so a result that
//! lands after the user navigated away is dropped.
//!
//! ## Example
//!
//! ```rust,no_run
//! use buddy_core::{Config, Controller, Event, SessionRepository, SqliteStore, TemplateAssistant};
//!
//! let config = Config::load().expect("failed to load config");
//! let store = SqliteStore::open(&config.store_path()).expect("failed to open store");
//! store.migrate().expect("failed to run migrations");
//!
//! let repo = SessionRepository::open(store).expect("failed to load sessions");
//! let mut controller = Controller::new(repo, TemplateAssistant, &config.assistant);
//! controller.dispatch(Event::Start).expect("start");
//! ```

// Re-export commonly used items at the crate root
pub use assistant::{IdeaAssistant, TemplateAssistant};
pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use controller::{Controller, Event, Screen, ScreenState};
pub use deferred::Deferred;
pub use error::{Error, Result};
pub use repo::SessionRepository;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use types::*;

// Public modules
pub mod assistant;
pub mod clock;
pub mod config;
pub mod controller;
pub mod deferred;
pub mod error;
pub mod logging;
pub mod preferences;
pub mod questions;
pub mod quotes;
pub mod repo;
pub mod share;
pub mod storage;
pub mod summary;
pub mod types;
