//! Error types for Verba CLI.

use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Loading, storing or resolving messages failed
    Messages(verba_core::MessageError),

    /// Table layout or config file problem
    Config(String),

    /// Invalid argument
    InvalidArgument(String),

    /// The code has no message and fallback is off
    Unresolved(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Messages(e) => write!(f, "{}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Unresolved(code) => write!(f, "No message found for code '{}'", code),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<verba_core::MessageError> for CliError {
    fn from(e: verba_core::MessageError) -> Self {
        CliError::Messages(e)
    }
}

impl From<verba_files::FileError> for CliError {
    fn from(e: verba_files::FileError) -> Self {
        CliError::Messages(e.into())
    }
}

impl From<verba_sql::SqlError> for CliError {
    fn from(e: verba_sql::SqlError) -> Self {
        CliError::Messages(e.into())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Config(e.to_string())
    }
}
