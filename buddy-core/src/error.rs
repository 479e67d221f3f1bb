//! Error types for buddy-core

use thiserror::Error;

/// Main error type for the buddy-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Storage backend error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Session not found
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// User input rejected before any state was touched
    #[error("{0}")]
    Validation(String),

    /// Share target cannot accept a payload on this system
    #[error("sharing is not available: {0}")]
    ShareUnavailable(String),
}

/// Result type alias for buddy-core
pub type Result<T> = std::result::Result<T, Error>;
