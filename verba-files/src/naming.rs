//! Message file naming
//!
//! `app.properties` holds the base messages of basename `app`,
//! `app_de.properties`, `app_de_DE.properties` and
//! `app_de_DE_POSIX.properties` hold the locale-specific ones.

use verba_core::Locale;

/// File extension of message files
pub const EXTENSION: &str = "properties";

/// File name for one `(basename, locale)` pair.
///
/// ```
/// use verba_core::Locale;
/// use verba_files::naming::file_name;
///
/// assert_eq!(file_name("app", None), "app.properties");
/// assert_eq!(file_name("app", Some(&Locale::de_de())), "app_de_DE.properties");
/// ```
pub fn file_name(basename: &str, locale: Option<&Locale>) -> String {
    match locale {
        Some(locale) => format!("{}_{}.{}", basename, locale.tag(), EXTENSION),
        None => format!("{}.{}", basename, EXTENSION),
    }
}

/// Stem of a message file name, `None` for other files.
pub fn stem(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(EXTENSION)?
        .strip_suffix('.')
        .filter(|stem| !stem.is_empty())
}

/// Basename a message file contributes to discovery: the part before the
/// first `_`.
pub fn basename_of(file_name: &str) -> Option<&str> {
    let stem = stem(file_name)?;
    let basename = stem.split('_').next().unwrap_or(stem);
    (!basename.is_empty()).then_some(basename)
}

/// The locale a file holds for `basename`.
///
/// `None` when the file does not belong to `basename`; `Some(None)` for the
/// base file; `Some(Some(locale))` otherwise. A suffix that is not a valid
/// locale yields `None` as well.
pub fn locale_of(basename: &str, file_name: &str) -> Option<Option<Locale>> {
    let stem = stem(file_name)?;
    if stem == basename {
        return Some(None);
    }

    let suffix = stem.strip_prefix(basename)?.strip_prefix('_')?;
    if suffix.is_empty() {
        return Some(Some(Locale::root()));
    }
    Locale::parse(suffix).ok().map(Some)
}
