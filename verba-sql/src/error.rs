//! Error types for the table message store.

use thiserror::Error;
use verba_core::MessageError;

/// Errors that can occur when using the table message store.
#[derive(Error, Debug)]
pub enum SqlError {
    /// Database connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Database error from SQLx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for table store operations.
pub type SqlResult<T> = Result<T, SqlError>;

impl From<SqlError> for MessageError {
    fn from(err: SqlError) -> Self {
        match err {
            SqlError::Config(msg) => MessageError::Config(msg),
            other => MessageError::Store(other.to_string()),
        }
    }
}
