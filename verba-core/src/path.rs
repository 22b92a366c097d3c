//! Locale fallback paths
//!
//! For a requested locale and an optional default locale this module
//! computes the ordered list of catalog selectors to try:
//!
//! ```text
//! de_DE_POSIX, default en_US  ->  _de_DE_POSIX, _de_DE, _de, _en_US, _en, ""
//! de_DE,       no default     ->  _de_DE, _de, ""
//! (absent),    any default    ->  ""
//! ```
//!
//! Paths are pure functions of their two inputs, which is what lets
//! [`PathCache`] memoize them for as long as the default locale stays put.

use crate::Locale;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Catalog lookup key for an optional locale.
///
/// The base (absent) locale maps to the empty string, every present locale
/// to `_` followed by its tag, so `Some(Locale::root())` (`"_"`) and `None`
/// (`""`) stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector(String);

impl Selector {
    /// Selector of the base locale.
    pub fn base() -> Self {
        Selector(String::new())
    }

    pub fn for_locale(locale: Option<&Locale>) -> Self {
        match locale {
            None => Self::base(),
            Some(locale) => Selector(format!("_{}", locale.tag())),
        }
    }

    pub fn is_base(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Option<&Locale>> for Selector {
    fn from(locale: Option<&Locale>) -> Self {
        Selector::for_locale(locale)
    }
}

/// Ordered candidate locales for `locale`, most specific first, ending with
/// the absent locale.
///
/// The default locale chain is only consulted for a present `locale` that is
/// not equal to `default`. A locale already on the path is not repeated.
pub fn locale_path(locale: Option<&Locale>, default: Option<&Locale>) -> Vec<Option<Locale>> {
    fn push_chain(start: &Locale, path: &mut Vec<Option<Locale>>) {
        let mut current = Some(start.clone());
        while let Some(candidate) = current {
            current = candidate.parent();
            let candidate = Some(candidate);
            if !path.contains(&candidate) {
                path.push(candidate);
            }
        }
    }

    let mut path: Vec<Option<Locale>> = Vec::new();

    if let Some(requested) = locale {
        push_chain(requested, &mut path);

        if let Some(default) = default.filter(|default| *default != requested) {
            push_chain(default, &mut path);
        }
    }

    path.push(None);
    path
}

/// Selector form of [`locale_path`].
///
/// ```
/// use verba_core::{Locale, build_path};
///
/// let path = build_path(Some(&Locale::fr_fr()), Some(&Locale::en_us()));
/// let path: Vec<&str> = path.iter().map(|s| s.as_str()).collect();
/// assert_eq!(path, ["_fr_FR", "_fr", "_en_US", "_en", ""]);
/// ```
pub fn build_path(locale: Option<&Locale>, default: Option<&Locale>) -> Vec<Selector> {
    locale_path(locale, default)
        .iter()
        .map(|candidate| Selector::for_locale(candidate.as_ref()))
        .collect()
}

/// Memoized paths for one default locale.
///
/// A cache is created for a fixed default locale and never outlives it:
/// changing the default means building a new cache.
#[derive(Debug)]
pub struct PathCache {
    default_locale: Option<Locale>,
    paths: RwLock<HashMap<Option<Locale>, Arc<[Selector]>>>,
}

impl PathCache {
    pub fn new(default_locale: Option<Locale>) -> Self {
        Self {
            default_locale,
            paths: RwLock::new(HashMap::new()),
        }
    }

    /// The default locale every cached path was computed with.
    pub fn default_locale(&self) -> Option<&Locale> {
        self.default_locale.as_ref()
    }

    /// Cached path for `locale`, computing it on first use.
    pub fn get_or_build(&self, locale: Option<&Locale>) -> Arc<[Selector]> {
        let key = locale.cloned();
        if let Some(path) = self.paths.read().get(&key) {
            return Arc::clone(path);
        }

        let path: Arc<[Selector]> = build_path(locale, self.default_locale.as_ref()).into();
        verba_log::trace!(
            target: "verba::path",
            "computed path for {}: {:?}",
            crate::locale::describe(locale),
            path.iter().map(Selector::as_str).collect::<Vec<_>>()
        );

        let mut paths = self.paths.write();
        Arc::clone(paths.entry(key).or_insert(path))
    }

    pub fn len(&self) -> usize {
        self.paths.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.read().is_empty()
    }

    pub fn clear(&self) {
        self.paths.write().clear();
    }
}
