//! Saved session repository
//!
//! Keeps the full session list in memory and writes the whole list back to
//! the store as one JSON value after every change.

use crate::error::{Error, Result};
use crate::storage::{KeyValueStore, LEGACY_SESSIONS_KEY, SESSIONS_KEY};
use crate::types::SavedSession;

/// Durable collection of [`SavedSession`]s.
pub struct SessionRepository<S> {
    store: S,
    sessions: Vec<SavedSession>,
}

impl<S: KeyValueStore> SessionRepository<S> {
    /// Load the session list from `store`, migrating the legacy key if needed.
    ///
    /// A stored value that is not a valid session list is returned as
    /// [`Error::Json`]; nothing is overwritten in that case.
    pub fn open(store: S) -> Result<Self> {
        let sessions = match store.get(SESSIONS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Self::migrate_legacy(&store)?,
        };

        tracing::info!(sessions = sessions.len(), "Loaded saved sessions");

        Ok(Self { store, sessions })
    }

    /// Adopt the legacy list when the current key is empty. The legacy key is left as-is.
    fn migrate_legacy(store: &S) -> Result<Vec<SavedSession>> {
        let Some(raw) = store.get(LEGACY_SESSIONS_KEY)? else {
            return Ok(Vec::new());
        };

        let sessions: Vec<SavedSession> = serde_json::from_str(&raw)?;
        store.set(SESSIONS_KEY, &serde_json::to_string(&sessions)?)?;

        tracing::info!(
            sessions = sessions.len(),
            from = LEGACY_SESSIONS_KEY,
            to = SESSIONS_KEY,
            "Migrated legacy session list"
        );

        Ok(sessions)
    }

    /// All sessions in storage order
    pub fn list(&self) -> &[SavedSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Session with the given id
    pub fn find_by_id(&self, id: &str) -> Option<&SavedSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Like [`find_by_id`](Self::find_by_id) but a miss is an error
    pub fn get(&self, id: &str) -> Result<&SavedSession> {
        self.find_by_id(id)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }

    /// Replace the session with the same id in place, or append it.
    pub fn save(&mut self, session: SavedSession) -> Result<()> {
        let mut next = self.sessions.clone();
        match next.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => {
                tracing::debug!(id = %session.id, "Updating saved session");
                *existing = session;
            }
            None => {
                tracing::debug!(id = %session.id, "Appending saved session");
                next.push(session);
            }
        }
        self.commit(next)
    }

    /// Remove the session with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if self.find_by_id(id).is_none() {
            return Ok(false);
        }

        let next = self
            .sessions
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        tracing::debug!(id, "Deleted saved session");
        Ok(true)
    }

    /// The `n` most recently saved sessions, newest first
    pub fn recent(&self, n: usize) -> Vec<&SavedSession> {
        let mut sorted = newest_first(self.sessions.iter());
        sorted.truncate(n);
        sorted
    }

    /// Sessions whose title or answers contain `term` (case-insensitive), newest first.
    ///
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&SavedSession> {
        newest_first(self.sessions.iter().filter(|s| s.matches(term)))
    }

    /// Persist `next` first, then adopt it, so a failed write leaves memory untouched.
    fn commit(&mut self, next: Vec<SavedSession>) -> Result<()> {
        let raw = serde_json::to_string(&next)?;
        self.store.set(SESSIONS_KEY, &raw)?;
        self.sessions = next;
        Ok(())
    }

    /// Underlying store (for preferences that share the same medium)
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn newest_first<'a>(sessions: impl Iterator<Item = &'a SavedSession>) -> Vec<&'a SavedSession> {
    let mut sorted: Vec<_> = sessions.collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}
