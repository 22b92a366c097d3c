//! Locale representation
//!
//! A [`Locale`] is the classic language / country / variant triple. The
//! "absent" locale that holds basename-wide defaults is modelled as
//! `Option<Locale>::None` everywhere in this crate, so it can never be
//! confused with a locale whose three parts happen to be empty.

use crate::{MessageError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language, an optional country and an optional variant.
///
/// # Examples
///
/// ```
/// use verba_core::Locale;
///
/// let de_de = Locale::parse("de_DE").unwrap();
/// assert_eq!(de_de.language, "de");
/// assert_eq!(de_de.country, "DE");
/// assert_eq!(de_de.parent(), Some(Locale::de()));
/// assert_eq!(Locale::parse("en-us").unwrap().tag(), "en_US");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    /// Language code, lower case (e.g. "en", "de"); may be empty
    pub language: String,
    /// Country code, upper case (e.g. "US", "DE"); may be empty
    pub country: String,
    /// Vendor or platform variant (e.g. "POSIX"); may be empty
    pub variant: String,
}

impl Locale {
    /// Create a locale from its parts, normalizing case.
    ///
    /// No validation happens here; components are expected not to contain
    /// `_` (use [`Locale::parse`] for untrusted input).
    pub fn new(language: impl Into<String>, country: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            country: country.into().to_uppercase(),
            variant: variant.into(),
        }
    }

    /// Language-only locale.
    pub fn language(language: impl Into<String>) -> Self {
        Self::new(language, "", "")
    }

    /// The locale with all three parts empty.
    ///
    /// Used as the formatting locale for templates that were never bound to
    /// a concrete locale.
    pub fn root() -> Self {
        Self::new("", "", "")
    }

    /// Parse `language[_COUNTRY[_variant]]`; `-` is accepted as separator too.
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let invalid = || MessageError::InvalidLocale(tag.to_string());

        if trimmed.is_empty() {
            return Err(invalid());
        }

        let mut parts = trimmed.splitn(3, |c| c == '_' || c == '-');
        let language = parts.next().unwrap_or_default();
        let country = parts.next().unwrap_or_default();
        let variant = parts.next().unwrap_or_default();

        if !(language.is_empty() || (2..=8).contains(&language.len()))
            || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid());
        }

        if country.len() > 3 || !country.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid());
        }

        if !variant.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(invalid());
        }

        if language.is_empty() && country.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(language, country, variant))
    }

    /// Parse a locale where the empty string means the absent locale.
    ///
    /// ```
    /// use verba_core::Locale;
    ///
    /// assert_eq!(Locale::parse_optional("").unwrap(), None);
    /// assert_eq!(Locale::parse_optional("fr").unwrap(), Some(Locale::fr()));
    /// ```
    pub fn parse_optional(tag: &str) -> Result<Option<Self>> {
        if tag.trim().is_empty() {
            Ok(None)
        } else {
            Self::parse(tag).map(Some)
        }
    }

    /// The `language_COUNTRY_variant` form, omitting empty trailing parts.
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        if !self.country.is_empty() || !self.variant.is_empty() {
            tag.push('_');
            tag.push_str(&self.country);
        }
        if !self.variant.is_empty() {
            tag.push('_');
            tag.push_str(&self.variant);
        }
        tag
    }

    /// Next less specific locale: strips the variant, then the country.
    ///
    /// A locale without country and variant has no parent, and stripping
    /// never yields the fully empty locale.
    pub fn parent(&self) -> Option<Self> {
        let parent = if !self.variant.is_empty() {
            Self::new(self.language.clone(), self.country.clone(), "")
        } else if !self.country.is_empty() {
            Self::new(self.language.clone(), "", "")
        } else {
            return None;
        };
        (!parent.is_empty()).then_some(parent)
    }

    /// Whether all three parts are empty.
    pub fn is_empty(&self) -> bool {
        self.language.is_empty() && self.country.is_empty() && self.variant.is_empty()
    }

    // Common locales

    /// English (no country)
    pub fn en() -> Self {
        Self::language("en")
    }

    /// English (US)
    pub fn en_us() -> Self {
        Self::new("en", "US", "")
    }

    /// English (GB)
    pub fn en_gb() -> Self {
        Self::new("en", "GB", "")
    }

    /// French (no country)
    pub fn fr() -> Self {
        Self::language("fr")
    }

    /// French (France)
    pub fn fr_fr() -> Self {
        Self::new("fr", "FR", "")
    }

    /// German (no country)
    pub fn de() -> Self {
        Self::language("de")
    }

    /// German (Germany)
    pub fn de_de() -> Self {
        Self::new("de", "DE", "")
    }

    /// German (Austria)
    pub fn de_at() -> Self {
        Self::new("de", "AT", "")
    }

    /// Spanish (no country)
    pub fn es() -> Self {
        Self::language("es")
    }

    /// Japanese (Japan)
    pub fn ja_jp() -> Self {
        Self::new("ja", "JP", "")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl FromStr for Locale {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = MessageError;

    fn try_from(value: String) -> Result<Self> {
        Locale::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}

/// Render an optional locale for log lines and summaries.
pub fn describe(locale: Option<&Locale>) -> String {
    match locale {
        Some(locale) => locale.tag(),
        None => "default (base)".to_string(),
    }
}

/// Builder for creating locales.
#[derive(Debug, Default)]
pub struct LocaleBuilder {
    language: Option<String>,
    country: Option<String>,
    variant: Option<String>,
}

impl LocaleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Build the locale; fails when neither language nor country was set.
    pub fn build(self) -> Result<Locale> {
        let language = self.language.unwrap_or_default();
        let country = self.country.unwrap_or_default();
        if language.is_empty() && country.is_empty() {
            return Err(MessageError::InvalidLocale(
                "locale needs a language or a country".to_string(),
            ));
        }
        Ok(Locale::new(language, country, self.variant.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        let de = Locale::parse("de").unwrap();
        assert_eq!(de, Locale::de());

        let de_de = Locale::parse("de_DE").unwrap();
        assert_eq!(de_de.country, "DE");
        assert!(de_de.variant.is_empty());

        let posix = Locale::parse("de_DE_POSIX").unwrap();
        assert_eq!(posix.variant, "POSIX");

        let dashed = Locale::parse("EN-gb").unwrap();
        assert_eq!(dashed, Locale::en_gb());
    }

    #[test]
    fn test_locale_parse_country_only_and_variant_only() {
        let country_only = Locale::parse("_DE").unwrap();
        assert_eq!(country_only.language, "");
        assert_eq!(country_only.country, "DE");
        assert_eq!(country_only.tag(), "_DE");

        let no_country = Locale::parse("de__POSIX").unwrap();
        assert_eq!(no_country.country, "");
        assert_eq!(no_country.variant, "POSIX");
        assert_eq!(no_country.tag(), "de__POSIX");
    }

    #[test]
    fn test_locale_parse_rejects_garbage() {
        assert!(Locale::parse("").is_err());
        assert!(Locale::parse("d").is_err());
        assert!(Locale::parse("de_D!").is_err());
        assert!(Locale::parse("12").is_err());
        assert!(Locale::parse("_").is_err());
    }

    #[test]
    fn test_parent_chain() {
        let posix = Locale::parse("de_DE_POSIX").unwrap();
        let de_de = posix.parent().unwrap();
        assert_eq!(de_de, Locale::de_de());
        assert_eq!(de_de.parent(), Some(Locale::de()));
        assert_eq!(Locale::de().parent(), None);

        let no_country = Locale::parse("de__POSIX").unwrap();
        assert_eq!(no_country.parent(), Some(Locale::de()));

        let country_only = Locale::parse("_DE").unwrap();
        assert_eq!(country_only.parent(), None);
        let country_variant = Locale::parse("_DE_POSIX").unwrap();
        assert_eq!(country_variant.parent(), Some(country_only));
    }

    #[test]
    fn test_root_is_empty_but_present() {
        assert!(Locale::root().is_empty());
        assert_eq!(Locale::root().tag(), "");
        assert_ne!(Some(Locale::root()), None);
    }

    #[test]
    fn test_serde_as_tag() {
        let json = serde_json::to_string(&Locale::de_de()).unwrap();
        assert_eq!(json, "\"de_DE\"");

        let back: Locale = serde_json::from_str("\"fr_FR\"").unwrap();
        assert_eq!(back, Locale::fr_fr());

        assert!(serde_json::from_str::<Locale>("\"x\"").is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(None), "default (base)");
        assert_eq!(describe(Some(&Locale::en_us())), "en_US");
    }

    #[test]
    fn test_locale_builder() {
        let locale = LocaleBuilder::new()
            .language("EN")
            .country("us")
            .variant("WIN")
            .build()
            .unwrap();
        assert_eq!(locale.tag(), "en_US_WIN");

        assert!(LocaleBuilder::new().variant("X").build().is_err());
    }
}
