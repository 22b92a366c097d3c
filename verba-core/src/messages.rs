//! Raw message sets
//!
//! [`Messages`] is what stores hand out and accept: every raw text of one
//! basename, grouped by locale. The `None` locale holds the basename-wide
//! base messages.

use crate::Locale;
use crate::locale::describe;
use std::collections::BTreeMap;
use std::fmt;

/// Raw message texts of one basename, keyed by locale and then by code.
///
/// A locale is present only while it holds at least one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages {
    entries: BTreeMap<Option<Locale>, BTreeMap<String, String>>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one message.
    pub fn add(&mut self, locale: Option<Locale>, key: impl Into<String>, text: impl Into<String>) {
        self.entries
            .entry(locale)
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Builder form of [`Messages::add`].
    ///
    /// ```
    /// use verba_core::{Locale, Messages};
    ///
    /// let messages = Messages::new()
    ///     .with_message(None, "greeting", "hi")
    ///     .with_message(Some(Locale::de_de()), "greeting", "hallo");
    ///
    /// assert_eq!(messages.get(Some(&Locale::de_de()), "greeting"), Some("hallo"));
    /// assert_eq!(messages.len(), 2);
    /// ```
    pub fn with_message(mut self, locale: Option<Locale>, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.add(locale, key, text);
        self
    }

    /// Remove one message, returning its text.
    pub fn remove(&mut self, locale: Option<&Locale>, key: &str) -> Option<String> {
        let locale = locale.cloned();
        let texts = self.entries.get_mut(&locale)?;
        let removed = texts.remove(key);
        if texts.is_empty() {
            self.entries.remove(&locale);
        }
        removed
    }

    pub fn get(&self, locale: Option<&Locale>, key: &str) -> Option<&str> {
        self.locale_messages(locale)?.get(key).map(String::as_str)
    }

    pub fn has(&self, locale: Option<&Locale>, key: &str) -> bool {
        self.get(locale, key).is_some()
    }

    /// All messages of one locale.
    pub fn locale_messages(&self, locale: Option<&Locale>) -> Option<&BTreeMap<String, String>> {
        self.entries.get(&locale.cloned())
    }

    /// Replace every message of one locale; an empty map removes the locale.
    pub fn set_locale_messages(&mut self, locale: Option<Locale>, texts: BTreeMap<String, String>) {
        if texts.is_empty() {
            self.entries.remove(&locale);
        } else {
            self.entries.insert(locale, texts);
        }
    }

    /// Locales holding messages, base first.
    pub fn locales(&self) -> impl Iterator<Item = Option<&Locale>> {
        self.entries.keys().map(Option::as_ref)
    }

    pub fn locale_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of messages across all locales.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every `(locale, key, text)` triple, grouped by locale.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&Locale>, &str, &str)> {
        self.entries.iter().flat_map(|(locale, texts)| {
            texts
                .iter()
                .map(move |(key, text)| (locale.as_ref(), key.as_str(), text.as_str()))
        })
    }

    /// One line per locale: `"N messages for locale de_DE"`.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (locale, texts) in &self.entries {
            out.push_str(&format!(
                "{} messages for locale {}\n",
                texts.len(),
                describe(locale.as_ref())
            ));
        }
        out
    }

    /// Every message, grouped under a header per locale.
    ///
    /// Continuation lines of multi-line texts are indented by two spaces.
    pub fn full_info(&self) -> String {
        let rule = "=".repeat(80);
        let mut out = String::new();
        for (locale, texts) in &self.entries {
            out.push_str(&format!("Messages for locale {}\n{}\n", describe(locale.as_ref()), rule));
            for (key, text) in texts {
                out.push_str(&format!("{}={}\n", key, text.replace('\n', "\n  ")));
            }
            out.push_str("\n\n");
        }
        out
    }
}

impl fmt::Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl Extend<(Option<Locale>, String, String)> for Messages {
    fn extend<I: IntoIterator<Item = (Option<Locale>, String, String)>>(&mut self, iter: I) {
        for (locale, key, text) in iter {
            self.add(locale, key, text);
        }
    }
}

impl FromIterator<(Option<Locale>, String, String)> for Messages {
    fn from_iter<I: IntoIterator<Item = (Option<Locale>, String, String)>>(iter: I) -> Self {
        let mut messages = Messages::new();
        messages.extend(iter);
        messages
    }
}
