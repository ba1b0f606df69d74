//! Common error types used throughout episort.
//!
//! This module provides a unified error type that covers the failure cases
//! of the collaborators around the sorting core: the record store and the
//! chat transport.

/// Common error type for episort.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// The chat transport rejected or failed a request.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new Transport error.
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
