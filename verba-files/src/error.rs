//! Error types for file-backed message stores

use thiserror::Error;
use verba_core::MessageError;

/// File store error types
#[derive(Error, Debug)]
pub enum FileError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive error
    #[error("Archive error: {0}")]
    Archive(String),

    /// Malformed properties content
    #[error("Properties error at line {line}: {reason}")]
    Properties { line: usize, reason: String },

    /// Encoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Base directory missing or not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// A message file path is occupied by a directory
    #[error("Cannot write {path}: a directory is in the way")]
    PathIsDirectory { path: String },
}

impl From<FileError> for MessageError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::Io(e) => MessageError::Io(e),
            FileError::NotADirectory(_) => MessageError::Config(err.to_string()),
            FileError::Properties { .. } | FileError::Encoding(_) => MessageError::Parse(err.to_string()),
            FileError::Archive(_) | FileError::PathIsDirectory { .. } => MessageError::Store(err.to_string()),
        }
    }
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_message_error() {
        let err: MessageError = FileError::NotADirectory("/nope".to_string()).into();
        assert!(matches!(err, MessageError::Config(_)));

        let err: MessageError = FileError::Properties {
            line: 3,
            reason: "bad escape".to_string(),
        }
        .into();
        assert!(matches!(err, MessageError::Parse(ref s) if s.contains("line 3")));

        let err: MessageError = FileError::PathIsDirectory { path: "x".to_string() }.into();
        assert!(matches!(err, MessageError::Store(_)));
    }
}
