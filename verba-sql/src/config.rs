//! Configuration for the message table and its database connection.

use crate::{SqlError, SqlResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bind parameter syntax of the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    /// `?` (SQLite, MySQL)
    #[default]
    Question,
    /// `$1`, `$2`, ... (PostgreSQL)
    Dollar,
}

impl PlaceholderStyle {
    /// Placeholder for the 1-based parameter `index`.
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            PlaceholderStyle::Question => "?".to_string(),
            PlaceholderStyle::Dollar => format!("${}", index),
        }
    }
}

/// Table and column names of the message table.
///
/// Every identifier is wrapped in `delimiter` when statements are generated;
/// an empty delimiter leaves identifiers unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Table name.
    pub table_name: String,
    /// Basename column.
    pub basename_column: String,
    /// Language column.
    pub language_column: String,
    /// Country column.
    pub country_column: String,
    /// Variant column.
    pub variant_column: String,
    /// Message key column.
    pub key_column: String,
    /// Message text column.
    pub message_column: String,
    /// Identifier quoting delimiter.
    pub delimiter: String,
    /// Bind parameter syntax.
    pub placeholders: PlaceholderStyle,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            table_name: "Message".to_string(),
            basename_column: "basename".to_string(),
            language_column: "language".to_string(),
            country_column: "country".to_string(),
            variant_column: "variant".to_string(),
            key_column: "key".to_string(),
            message_column: "message".to_string(),
            delimiter: "`".to_string(),
            placeholders: PlaceholderStyle::Question,
        }
    }
}

impl TableConfig {
    /// Defaults: table `Message`, backtick quoting, `?` placeholders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table name.
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Set the basename column.
    pub fn basename_column(mut self, name: impl Into<String>) -> Self {
        self.basename_column = name.into();
        self
    }

    /// Set the language column.
    pub fn language_column(mut self, name: impl Into<String>) -> Self {
        self.language_column = name.into();
        self
    }

    /// Set the country column.
    pub fn country_column(mut self, name: impl Into<String>) -> Self {
        self.country_column = name.into();
        self
    }

    /// Set the variant column.
    pub fn variant_column(mut self, name: impl Into<String>) -> Self {
        self.variant_column = name.into();
        self
    }

    /// Set the key column.
    pub fn key_column(mut self, name: impl Into<String>) -> Self {
        self.key_column = name.into();
        self
    }

    /// Set the message column.
    pub fn message_column(mut self, name: impl Into<String>) -> Self {
        self.message_column = name.into();
        self
    }

    /// Set the identifier delimiter; `""` disables quoting.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the placeholder style.
    pub fn placeholders(mut self, style: PlaceholderStyle) -> Self {
        self.placeholders = style;
        self
    }

    fn identifiers(&self) -> [(&'static str, &str); 7] {
        [
            ("table_name", &self.table_name),
            ("basename_column", &self.basename_column),
            ("language_column", &self.language_column),
            ("country_column", &self.country_column),
            ("variant_column", &self.variant_column),
            ("key_column", &self.key_column),
            ("message_column", &self.message_column),
        ]
    }

    /// Reject empty identifiers and identifiers containing the delimiter.
    pub fn validate(&self) -> SqlResult<()> {
        for (field, value) in self.identifiers() {
            if value.trim().is_empty() {
                return Err(SqlError::Config(format!("{} must not be empty", field)));
            }
            if !self.delimiter.is_empty() && value.contains(self.delimiter.as_str()) {
                return Err(SqlError::Config(format!(
                    "{} '{}' contains the delimiter '{}'",
                    field, value, self.delimiter
                )));
            }
        }
        Ok(())
    }

    /// Wrap an identifier in the delimiter.
    pub fn quote(&self, identifier: &str) -> String {
        format!("{}{}{}", self.delimiter, identifier, self.delimiter)
    }
}

/// Connection pool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (`sqlite:messages.db`, `postgres://...`).
    pub database_url: String,

    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    0
}

fn default_connect_timeout() -> u64 {
    30
}

impl DatabaseConfig {
    /// Create a new configuration with the given database URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Uses the following environment variables:
    /// - `VERBA_DATABASE_URL`: Required database URL
    /// - `VERBA_DATABASE_MAX_CONNECTIONS`: Max connections (default: 5)
    /// - `VERBA_DATABASE_CONNECT_TIMEOUT`: Connect timeout in seconds
    pub fn from_env() -> SqlResult<Self> {
        let database_url = std::env::var("VERBA_DATABASE_URL")
            .map_err(|_| SqlError::Config("VERBA_DATABASE_URL not set".into()))?;

        let mut config = Self::new(database_url);

        if let Ok(max) = std::env::var("VERBA_DATABASE_MAX_CONNECTIONS") {
            config.max_connections = max
                .parse()
                .map_err(|_| SqlError::Config("Invalid VERBA_DATABASE_MAX_CONNECTIONS".into()))?;
        }

        if let Ok(timeout) = std::env::var("VERBA_DATABASE_CONNECT_TIMEOUT") {
            config.connect_timeout_secs = timeout
                .parse()
                .map_err(|_| SqlError::Config("Invalid VERBA_DATABASE_CONNECT_TIMEOUT".into()))?;
        }

        Ok(config)
    }

    /// Set maximum connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set minimum connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Set connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_secs = timeout.as_secs();
        self
    }

    /// Whether the URL points at an in-memory SQLite database.
    pub fn is_in_memory(&self) -> bool {
        self.database_url.starts_with("sqlite::memory:") || self.database_url.contains("mode=memory")
    }
}
