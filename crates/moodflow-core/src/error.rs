//! Error types for Moodflow core operations.
//!
//! Errors are descriptive at the core level; the CLI and the HTTP layer map
//! them to exit codes and status codes respectively.

use thiserror::Error;

/// Result type alias for Moodflow operations.
pub type Result<T> = std::result::Result<T, MoodError>;

/// Core error type for Moodflow operations.
#[derive(Debug, Error)]
pub enum MoodError {
    /// Missing or out-of-range input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error (file, SQLite, serialization)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad credentials or an invalid token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Password hashing failure
    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl MoodError {
    pub fn validation(message: impl Into<String>) -> Self {
        MoodError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        MoodError::NotFound(message.into())
    }
}

impl From<std::io::Error> for MoodError {
    fn from(err: std::io::Error) -> Self {
        MoodError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for MoodError {
    fn from(err: serde_json::Error) -> Self {
        MoodError::Storage(format!("Invalid JSON: {}", err))
    }
}

impl From<rusqlite::Error> for MoodError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref failure, ref message)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                MoodError::Validation(
                    message
                        .clone()
                        .unwrap_or_else(|| "Constraint violation".to_string()),
                )
            }
            other => MoodError::Storage(other.to_string()),
        }
    }
}

impl From<argon2::password_hash::Error> for MoodError {
    fn from(err: argon2::password_hash::Error) -> Self {
        MoodError::Crypto(err.to_string())
    }
}
