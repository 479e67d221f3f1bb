//! Core domain types for Brainstorm Buddy
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Question** | One prompt of the fixed questionnaire |
//! | **AppIdea** | The answers collected so far, keyed by question id |
//! | **Session** | A named, timestamped, saved snapshot of an AppIdea |
//! | **Fork** | A working copy of a saved session that saves under a new id |
//! | **Legacy key** | An older storage key read only to migrate existing data |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================
// Questions
// ============================================

/// A single questionnaire prompt. The catalogue lives in [`crate::questions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Key under which the answer is stored in an [`AppIdea`]
    pub id: &'static str,
    /// Prompt shown to the user
    pub text: &'static str,
    /// Short category label
    pub category: &'static str,
    /// Example answer
    pub placeholder: &'static str,
}

// ============================================
// AppIdea
// ============================================

/// Answers keyed by question id.
///
/// Unknown keys are kept so data written by other versions survives a
/// load/save cycle; the questionnaire only ever shows catalogue ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppIdea(BTreeMap<String, String>);

impl AppIdea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a single answer.
    pub fn set(&mut self, id: impl Into<String>, answer: impl Into<String>) {
        self.0.insert(id.into(), answer.into());
    }

    /// Raw answer for a key, including empty strings.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Answer for a key, treating empty answers as absent.
    pub fn answer(&self, id: &str) -> Option<&str> {
        self.get(id).filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    /// Entries in questionnaire order, then any keys no question asks for.
    pub fn in_question_order(&self) -> Vec<(&str, &str)> {
        let known = crate::questions::QUESTIONS
            .iter()
            .filter_map(|q| self.0.get_key_value(q.id));
        let unknown = self
            .0
            .iter()
            .filter(|(key, _)| crate::questions::by_id(key).is_none());

        known
            .chain(unknown)
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AppIdea {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================
// Saved sessions
// ============================================

/// A saved snapshot of an [`AppIdea`].
///
/// Field names match the persisted JSON (`appIdea` is camelCase), so lists
/// written by earlier versions of the app load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    /// Unique within the repository, stable across updates
    pub id: String,
    /// User-supplied title
    pub title: String,
    /// Save time in epoch milliseconds
    pub timestamp: i64,
    /// Owned copy of the answers
    pub app_idea: AppIdea,
}

impl SavedSession {
    /// Mint a fresh session id.
    pub fn new_id() -> String {
        format!("session-{}", uuid::Uuid::new_v4().simple())
    }

    /// List view preview of this session.
    pub fn preview(&self) -> SessionPreview {
        SessionPreview::from_idea(&self.app_idea)
    }

    /// Case-insensitive match against the title or any answer.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self
                .app_idea
                .values()
                .any(|value| value.to_lowercase().contains(&term))
    }
}

/// Compact description of a session for list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPreview {
    /// "Solves: ..." or a placeholder when no problem was given
    pub headline: String,
    /// Up to three `key: value` chips for the other answers
    pub chips: Vec<String>,
    /// Number of keys beyond the first four, if any
    pub more: Option<usize>,
}

const CHIP_LIMIT: usize = 3;
const CHIP_VALUE_CHARS: usize = 20;

impl SessionPreview {
    pub fn from_idea(idea: &AppIdea) -> Self {
        let headline = match idea.answer("problem") {
            Some(problem) => format!("Solves: {}", problem),
            None => "No problem statement defined".to_string(),
        };

        let chips = idea
            .in_question_order()
            .into_iter()
            .filter(|(key, value)| !value.is_empty() && *key != "problem")
            .take(CHIP_LIMIT)
            .map(|(key, value)| format!("{}: {}", key, truncate_chars(value, CHIP_VALUE_CHARS)))
            .collect();

        let more = (idea.len() > CHIP_LIMIT + 1).then(|| idea.len() - (CHIP_LIMIT + 1));

        Self {
            headline,
            chips,
            more,
        }
    }
}

/// Cut `value` to `max` characters, appending "..." when anything was dropped.
pub fn truncate_chars(value: &str, max: usize) -> String {
    let mut chars = value.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

// ============================================
// Chat
// ============================================

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl std::str::FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            _ => Err(format!("unknown chat role: {}", s)),
        }
    }
}

/// One entry of a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: format!("msg-{}", uuid::Uuid::new_v4().simple()),
            role,
            content: content.into(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea(pairs: &[(&str, &str)]) -> AppIdea {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_saved_session_json_shape() {
        let session = SavedSession {
            id: "session-1".to_string(),
            title: "Recipes".to_string(),
            timestamp: 1_700_000_000_000,
            app_idea: idea(&[("problem", "finding recipes")]),
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["appIdea"]["problem"], "finding recipes");
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_app_idea_tolerates_unknown_keys() {
        let parsed: AppIdea =
            serde_json::from_str(r#"{"problem":"p","mood":"sunny"}"#).unwrap();
        assert_eq!(parsed.get("mood"), Some("sunny"));
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_answer_ignores_empty_values() {
        let parsed = idea(&[("problem", ""), ("audience", "cooks")]);
        assert_eq!(parsed.get("problem"), Some(""));
        assert_eq!(parsed.answer("problem"), None);
        assert_eq!(parsed.answer("audience"), Some("cooks"));
    }

    #[test]
    fn test_preview_headline_and_chips() {
        let preview = SessionPreview::from_idea(&idea(&[
            ("problem", "slow checkouts"),
            ("audience", "small shop owners everywhere"),
            ("benefit", ""),
            ("features", "one-tap pay"),
        ]));

        assert_eq!(preview.headline, "Solves: slow checkouts");
        assert_eq!(
            preview.chips,
            vec![
                "audience: small shop owners ev...".to_string(),
                "features: one-tap pay".to_string(),
            ]
        );
        assert_eq!(preview.more, None);
    }

    #[test]
    fn test_preview_chips_follow_question_order() {
        let preview = SessionPreview::from_idea(&idea(&[
            ("problem", "p"),
            ("audience", "a"),
            ("benefit", "b"),
            ("features", "f"),
            ("uniqueness", "u"),
            ("goal", "g"),
            ("monetization", "m"),
            ("challenges", "c"),
        ]));

        assert_eq!(
            preview.chips,
            vec![
                "audience: a".to_string(),
                "benefit: b".to_string(),
                "features: f".to_string(),
            ]
        );
        assert_eq!(preview.more, Some(4));
    }

    #[test]
    fn test_question_order_puts_unknown_keys_last() {
        let parsed = idea(&[("zeta", "z"), ("alpha", "x"), ("goal", "g"), ("problem", "p")]);
        let keys: Vec<&str> = parsed.in_question_order().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["problem", "goal", "alpha", "zeta"]);
    }

    #[test]
    fn test_preview_counts_extra_keys() {
        let preview = SessionPreview::from_idea(&idea(&[
            ("audience", "a"),
            ("benefit", "b"),
            ("features", "c"),
            ("goal", "d"),
            ("uniqueness", "e"),
            ("challenges", "f"),
        ]));

        assert_eq!(preview.headline, "No problem statement defined");
        assert_eq!(preview.chips.len(), 3);
        assert_eq!(preview.more, Some(2));
    }

    #[test]
    fn test_matches_title_and_answers() {
        let session = SavedSession {
            id: "s".to_string(),
            title: "Meal Planner".to_string(),
            timestamp: 0,
            app_idea: idea(&[("audience", "Busy Parents")]),
        };

        assert!(session.matches("meal"));
        assert!(session.matches("PARENTS"));
        assert!(!session.matches("fitness"));
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(SavedSession::new_id(), SavedSession::new_id());
    }

    #[test]
    fn test_chat_role_round_trip_names() {
        assert_eq!("user".parse::<ChatRole>().unwrap(), ChatRole::User);
        assert_eq!(ChatRole::Assistant.as_str(), "assistant");
        assert!("system".parse::<ChatRole>().is_err());
    }
}
