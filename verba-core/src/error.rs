//! Error types for message loading and storage

use thiserror::Error;

/// Errors raised while configuring, loading or persisting messages.
///
/// Resolving a code that has no message is never an error; see
/// [`MessageSource::resolve`](crate::MessageSource::resolve).
#[derive(Debug, Error)]
pub enum MessageError {
    /// Invalid or missing configuration (no provider, bad identifiers, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A load or reload could not complete; the previous catalog stays active
    #[error("Message initialization failed for {context}: {source}")]
    Initialization {
        context: String,
        #[source]
        source: Box<MessageError>,
    },

    /// A message text could not be compiled into a template
    #[error("Invalid message template {pattern:?}: {reason}")]
    Template { pattern: String, reason: String },

    /// Invalid locale string
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// Malformed input (properties files, config values)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Backend failure reported by a message store
    #[error("Store error: {0}")]
    Store(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl MessageError {
    /// Wrap an error as a load failure for the given context.
    pub fn initialization(context: impl Into<String>, source: MessageError) -> Self {
        MessageError::Initialization {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error aborted a catalog load.
    pub fn is_initialization(&self) -> bool {
        matches!(self, MessageError::Initialization { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_initialization_keeps_source() {
        let err = MessageError::initialization(
            "basename 'app', locale 'de', key 'broken'",
            MessageError::Template {
                pattern: "{x".to_string(),
                reason: "unmatched brace".to_string(),
            },
        );

        assert!(err.is_initialization());
        let display = err.to_string();
        assert!(display.contains("basename 'app'"));
        assert!(display.contains("key 'broken'"));
        assert!(err.source().is_some());
    }
}
