//! Idea assistant: summary suggestions and chat replies.
//!
//! The controller only talks to the [`IdeaAssistant`] trait. The shipped
//! implementation, [`TemplateAssistant`], fills fixed templates with the
//! user's answers and picks among them by keyword; it never calls out.

mod templates;

pub use templates::{ReplyTopic, TemplateAssistant, FALLBACK_SUGGESTIONS, SUGGESTION_COUNT};

use crate::types::AppIdea;

/// Produces the text the assistant "says".
pub trait IdeaAssistant {
    /// Brainstorming suggestions for the summary screen
    fn suggestions(&self, idea: &AppIdea) -> Vec<String>;

    /// Opening message of a fresh chat
    fn greeting(&self, idea: &AppIdea) -> String;

    /// Reply to the latest user message
    fn reply(&self, idea: &AppIdea, message: &str) -> String;
}

impl<A: IdeaAssistant + ?Sized> IdeaAssistant for Box<A> {
    fn suggestions(&self, idea: &AppIdea) -> Vec<String> {
        (**self).suggestions(idea)
    }

    fn greeting(&self, idea: &AppIdea) -> String {
        (**self).greeting(idea)
    }

    fn reply(&self, idea: &AppIdea, message: &str) -> String {
        (**self).reply(idea, message)
    }
}
