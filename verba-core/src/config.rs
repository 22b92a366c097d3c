//! Message source configuration
//!
//! [`MessageSourceConfig`] can be read from a TOML or JSON file (chosen by
//! extension) and overridden from the environment:
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `VERBA_BASENAMES` | comma separated basename list; empty means discover |
//! | `VERBA_DEFAULT_LOCALE` | default locale tag; empty means none |
//! | `VERBA_UNRESOLVED_CODE_FALLBACK` | `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off` |

use crate::{Locale, MessageError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Resolver settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSourceConfig {
    /// Basenames to search, in order; `None` discovers them from the store
    /// on every load
    pub basenames: Option<Vec<String>>,

    /// Locale whose chain is tried after the requested one
    pub default_locale: Option<Locale>,

    /// Return the code itself when nothing matches
    pub unresolved_code_fallback: bool,
}

impl MessageSourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| MessageError::Config(format!("No file extension found: {}", path.display())))?;
        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| MessageError::Config(format!("Unsupported config format: {}", ext)))?;

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content, format)?;
        verba_log::debug!(target: "verba::config", "loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text in the given format.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(content)?,
            FileFormat::Toml => toml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_lookup(|key| std::env::var(key).ok())
    }

    /// Override fields from an arbitrary variable lookup.
    pub fn apply_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("VERBA_BASENAMES") {
            let names: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
            self.basenames = if names.is_empty() { None } else { Some(names) };
        }

        if let Some(value) = lookup("VERBA_DEFAULT_LOCALE") {
            self.default_locale = Locale::parse_optional(&value)?;
        }

        if let Some(value) = lookup("VERBA_UNRESOLVED_CODE_FALLBACK") {
            self.unresolved_code_fallback = parse_flag(&value).ok_or_else(|| {
                MessageError::Config(format!(
                    "VERBA_UNRESOLVED_CODE_FALLBACK must be a boolean, got '{}'",
                    value
                ))
            })?;
        }

        self.validate()
    }

    /// Check basename entries are non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        if let Some(names) = &self.basenames {
            for (i, name) in names.iter().enumerate() {
                if name.trim().is_empty() {
                    return Err(MessageError::Config(format!("basename #{} is empty", i + 1)));
                }
                if names[..i].contains(name) {
                    return Err(MessageError::Config(format!("duplicate basename '{}'", name)));
                }
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_parse_toml() {
        let config = MessageSourceConfig::parse(
            r#"
                basenames = ["app", "errors"]
                default_locale = "en_US"
                unresolved_code_fallback = true
            "#,
            FileFormat::Toml,
        )
        .unwrap();

        assert_eq!(config.basenames, Some(vec!["app".to_string(), "errors".to_string()]));
        assert_eq!(config.default_locale, Some(Locale::en_us()));
        assert!(config.unresolved_code_fallback);
    }

    #[test]
    fn test_parse_json_defaults() {
        let config = MessageSourceConfig::parse("{}", FileFormat::Json).unwrap();
        assert_eq!(config, MessageSourceConfig::default());

        assert!(MessageSourceConfig::parse(r#"{"default_locale": "x"}"#, FileFormat::Json).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_basenames() {
        let config = MessageSourceConfig {
            basenames: Some(vec!["app".to_string(), "app".to_string()]),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MessageError::Config(_))));

        let config = MessageSourceConfig {
            basenames: Some(vec![" ".to_string()]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = MessageSourceConfig::default();
        config
            .apply_lookup(lookup(&[
                ("VERBA_BASENAMES", "app, errors,"),
                ("VERBA_DEFAULT_LOCALE", "de-AT"),
                ("VERBA_UNRESOLVED_CODE_FALLBACK", "yes"),
            ]))
            .unwrap();

        assert_eq!(config.basenames, Some(vec!["app".to_string(), "errors".to_string()]));
        assert_eq!(config.default_locale, Some(Locale::de_at()));
        assert!(config.unresolved_code_fallback);

        config
            .apply_lookup(lookup(&[("VERBA_BASENAMES", ""), ("VERBA_DEFAULT_LOCALE", "")]))
            .unwrap();
        assert_eq!(config.basenames, None);
        assert_eq!(config.default_locale, None);
    }

    #[test]
    fn test_env_rejects_bad_flag() {
        let mut config = MessageSourceConfig::default();
        let result = config.apply_lookup(lookup(&[("VERBA_UNRESOLVED_CODE_FALLBACK", "maybe")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verba.json");
        std::fs::write(&path, r#"{"basenames": ["app"]}"#).unwrap();

        let config = MessageSourceConfig::from_file(&path).unwrap();
        assert_eq!(config.basenames, Some(vec!["app".to_string()]));

        let yaml = dir.path().join("verba.yaml");
        std::fs::write(&yaml, "").unwrap();
        assert!(MessageSourceConfig::from_file(&yaml).is_err());
    }
}
