//! User preferences kept in the same key-value store as the sessions.

use crate::error::Result;
use crate::storage::{KeyValueStore, DARK_MODE_KEY};

/// Stored dark-mode flag, or `fallback` when none has been stored yet.
///
/// Anything other than the literal `"true"` reads as light mode.
pub fn dark_mode(store: &impl KeyValueStore, fallback: bool) -> Result<bool> {
    Ok(match store.get(DARK_MODE_KEY)? {
        Some(value) => value == "true",
        None => fallback,
    })
}

/// Persist the dark-mode flag as `"true"` or `"false"`.
pub fn set_dark_mode(store: &impl KeyValueStore, enabled: bool) -> Result<()> {
    store.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })?;
    tracing::debug!(enabled, "Saved dark mode preference");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_fallback_when_unset() {
        let store = MemoryStore::new();
        assert!(dark_mode(&store, true).unwrap());
        assert!(!dark_mode(&store, false).unwrap());
    }

    #[test]
    fn test_stored_flag_wins() {
        let store = MemoryStore::new();
        set_dark_mode(&store, false).unwrap();
        assert!(!dark_mode(&store, true).unwrap());
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));

        set_dark_mode(&store, true).unwrap();
        assert!(dark_mode(&store, false).unwrap());
    }
}
