//! Compiled message catalog
//!
//! A [`Catalog`] is one immutable snapshot of every message a store held at
//! load time, compiled and indexed by basename, locale selector and code.

use crate::locale::describe;
use crate::path::Selector;
use crate::{MessageError, MessageProvider, MessageTemplate, Messages, Result};
use std::collections::HashMap;

type LocaleTable = HashMap<Selector, HashMap<String, MessageTemplate>>;

/// Compiled templates keyed by `(basename, selector)` and code.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    basenames: Vec<String>,
    tables: HashMap<String, LocaleTable>,
}

impl Catalog {
    /// A catalog with no basenames.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read and compile messages from `provider`.
    ///
    /// Without an explicit `basenames` list the store is asked which
    /// basenames it holds, and those are loaded in sorted order. An explicit
    /// list is used as given; basenames the store does not know end up empty.
    ///
    /// Any store failure or template that does not compile fails the whole
    /// load with [`MessageError::Initialization`].
    pub async fn load<P>(provider: &P, basenames: Option<&[String]>) -> Result<Self>
    where
        P: MessageProvider + ?Sized,
    {
        let names = match basenames {
            Some(names) => names.to_vec(),
            None => {
                let mut names = provider
                    .available_basenames()
                    .await
                    .map_err(|e| MessageError::initialization("basename discovery", e))?;
                names.sort();
                names.dedup();
                names
            }
        };

        let mut catalog = Catalog::empty();
        for basename in names {
            let messages = provider
                .messages(&basename)
                .await
                .map_err(|e| MessageError::initialization(format!("basename '{}'", basename), e))?;
            catalog.insert(basename, &messages)?;
        }

        verba_log::info!(
            target: "verba::catalog",
            "loaded {} messages from {} basenames",
            catalog.len(),
            catalog.basenames.len()
        );
        Ok(catalog)
    }

    /// Compile already-fetched message sets, keeping their order.
    ///
    /// ```
    /// use verba_core::{Catalog, Locale, Messages, Selector};
    ///
    /// let app = Messages::new().with_message(Some(Locale::de()), "greeting", "hallo");
    /// let catalog = Catalog::from_messages([("app".to_string(), app)]).unwrap();
    ///
    /// let selector = Selector::for_locale(Some(&Locale::de()));
    /// let template = catalog.lookup("app", &selector, "greeting").unwrap();
    /// assert_eq!(template.format(&[]), "hallo");
    /// ```
    pub fn from_messages<I>(sets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Messages)>,
    {
        let mut catalog = Catalog::empty();
        for (basename, messages) in sets {
            catalog.insert(basename, &messages)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, basename: String, messages: &Messages) -> Result<()> {
        let mut table = self.tables.remove(&basename).unwrap_or_default();

        for (locale, key, text) in messages.iter() {
            let template = MessageTemplate::compile(text, locale.cloned()).map_err(|e| {
                MessageError::initialization(
                    format!("basename '{}', locale '{}', key '{}'", basename, describe(locale), key),
                    e,
                )
            })?;
            table
                .entry(Selector::for_locale(locale))
                .or_default()
                .insert(key.to_string(), template);
        }

        verba_log::debug!(
            target: "verba::catalog",
            "basename '{}': {} messages in {} locales",
            basename,
            messages.len(),
            messages.locale_count()
        );

        if !self.basenames.contains(&basename) {
            self.basenames.push(basename.clone());
        }
        self.tables.insert(basename, table);
        Ok(())
    }

    pub fn lookup(&self, basename: &str, selector: &Selector, code: &str) -> Option<&MessageTemplate> {
        self.tables.get(basename)?.get(selector)?.get(code)
    }

    /// Basenames in lookup order.
    pub fn basenames(&self) -> &[String] {
        &self.basenames
    }

    pub fn contains_basename(&self, basename: &str) -> bool {
        self.tables.contains_key(basename)
    }

    /// Selectors with at least one message for `basename`, sorted.
    pub fn locales(&self, basename: &str) -> Vec<&Selector> {
        let mut selectors: Vec<&Selector> = self
            .tables
            .get(basename)
            .map(|table| table.keys().collect())
            .unwrap_or_default();
        selectors.sort();
        selectors
    }

    /// Number of compiled templates.
    pub fn len(&self) -> usize {
        self.tables
            .values()
            .flat_map(|table| table.values())
            .map(HashMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
