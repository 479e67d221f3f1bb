//! Storage layer for Brainstorm Buddy
//!
//! Everything durable is a string value under a string key, the same shape a
//! browser's local storage offers. Two backends:
//! - [`SqliteStore`]: one `kv` table in a SQLite file, migrated via `PRAGMA user_version`
//! - [`MemoryStore`]: a map behind a mutex, for tests and `--memory` runs

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;

/// Key holding the current JSON list of saved sessions
pub const SESSIONS_KEY: &str = "brainstormBuddySessions";

/// Key an older release stored the session list under; read once for migration
pub const LEGACY_SESSIONS_KEY: &str = "savedSessions";

/// Key holding the dark-mode flag (`"true"` / `"false"`)
pub const DARK_MODE_KEY: &str = "darkMode";

/// Synchronous string key-value storage.
///
/// A `set` must be all-or-nothing: readers see either the old value or the
/// new one, never a mix.
pub trait KeyValueStore {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
