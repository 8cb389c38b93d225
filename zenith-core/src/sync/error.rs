//! Sync error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`ProfileStore`](super::ProfileStore).
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The store could not be reached
    #[error("Profile store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with an error status
    #[error("Profile store returned status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The response could not be decoded
    #[error("Malformed profile response: {0}")]
    Malformed(String),
}

/// Errors raised by a [`LocalStore`](super::LocalStore).
#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("I/O error for {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}
