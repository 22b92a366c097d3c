//! In-memory message store

use crate::{Locale, MessageAcceptor, MessageProvider, Messages, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Message store backed by a map, readable and writable.
///
/// Useful for tests and for applications that assemble messages in code.
///
/// ```
/// use verba_core::{InMemoryProvider, Locale};
///
/// let store = InMemoryProvider::new()
///     .with_message("app", None, "greeting", "hi")
///     .with_message("app", Some(Locale::de_de()), "greeting", "hallo");
///
/// assert_eq!(store.basename_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    basenames: RwLock<BTreeMap<String, Messages>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the messages of one basename.
    pub fn insert(&self, basename: impl Into<String>, messages: Messages) {
        self.basenames.write().insert(basename.into(), messages);
    }

    /// Add a single message.
    pub fn add_message(
        &self,
        basename: impl Into<String>,
        locale: Option<Locale>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.basenames
            .write()
            .entry(basename.into())
            .or_default()
            .add(locale, key, text);
    }

    /// Builder form of [`InMemoryProvider::add_message`].
    pub fn with_message(
        self,
        basename: impl Into<String>,
        locale: Option<Locale>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.add_message(basename, locale, key, text);
        self
    }

    pub fn remove(&self, basename: &str) -> Option<Messages> {
        self.basenames.write().remove(basename)
    }

    pub fn basename_count(&self) -> usize {
        self.basenames.read().len()
    }

    /// Snapshot of one basename.
    pub fn snapshot(&self, basename: &str) -> Option<Messages> {
        self.basenames.read().get(basename).cloned()
    }
}

#[async_trait]
impl MessageProvider for InMemoryProvider {
    async fn available_basenames(&self) -> Result<Vec<String>> {
        Ok(self.basenames.read().keys().cloned().collect())
    }

    async fn messages(&self, basename: &str) -> Result<Messages> {
        Ok(self.snapshot(basename).unwrap_or_default())
    }
}

#[async_trait]
impl MessageAcceptor for InMemoryProvider {
    async fn set_messages(&self, basename: &str, messages: &Messages) -> Result<()> {
        let mut basenames = self.basenames.write();
        if messages.is_empty() {
            basenames.remove(basename);
        } else {
            basenames.insert(basename.to_string(), messages.clone());
        }
        Ok(())
    }
}
