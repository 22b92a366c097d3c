//! Resolve command - look up a code through locale fallback and render it.

use crate::SourceArgs;
use crate::error::{CliError, CliResult};
use crate::store::open_source;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::path::PathBuf;
use verba_core::{FormatArg, Locale, MessageSource, MessageSourceConfig};

/// Options of a single resolution.
#[derive(Debug, Default)]
pub struct ResolveOptions {
    pub code: String,
    pub locale: Option<Locale>,
    pub default_locale: Option<Locale>,
    pub basenames: Vec<String>,
    pub fallback_to_code: bool,
    pub args: Vec<String>,
    pub config: Option<PathBuf>,
}

/// Load the source and print the rendered message.
pub async fn run(source: &SourceArgs, options: ResolveOptions) -> CliResult<()> {
    let config = source_config(&options)?;
    let store = open_source(source).await?;

    let messages = MessageSource::from_config(&config, store)?;
    messages.load().await?;

    let args: Vec<FormatArg> = options.args.iter().map(|arg| parse_arg(arg)).collect();
    match messages.message(&options.code, &args, options.locale.as_ref()) {
        Some(text) => {
            println!("{}", text);
            Ok(())
        }
        None => Err(CliError::Unresolved(options.code)),
    }
}

/// Config file, then environment, then command line flags.
fn source_config(options: &ResolveOptions) -> CliResult<MessageSourceConfig> {
    let mut config = match &options.config {
        Some(path) => MessageSourceConfig::from_file(path)?,
        None => MessageSourceConfig::new(),
    };
    config.apply_env()?;

    if !options.basenames.is_empty() {
        config.basenames = Some(options.basenames.clone());
    }
    if options.default_locale.is_some() {
        config.default_locale = options.default_locale.clone();
    }
    if options.fallback_to_code {
        config.unresolved_code_fallback = true;
    }
    Ok(config)
}

/// Integers, decimals and ISO dates and times keep their type; anything
/// else is text.
fn parse_arg(value: &str) -> FormatArg {
    if let Ok(n) = value.parse::<i64>() {
        return FormatArg::Integer(n);
    }
    if value.contains('.') {
        if let Ok(x) = value.parse::<f64>() {
            return FormatArg::Float(x);
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return FormatArg::DateTime(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return FormatArg::Date(date);
    }
    if let Ok(time) = NaiveTime::parse_from_str(value, "%H:%M:%S") {
        return FormatArg::Time(time);
    }
    FormatArg::Text(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arg() {
        assert!(matches!(parse_arg("42"), FormatArg::Integer(42)));
        assert!(matches!(parse_arg("-7"), FormatArg::Integer(-7)));
        assert!(matches!(parse_arg("1.5"), FormatArg::Float(x) if x == 1.5));
        assert!(matches!(parse_arg("2024-03-01"), FormatArg::Date(_)));
        assert!(matches!(parse_arg("2024-03-01T10:30:00"), FormatArg::DateTime(_)));
        assert!(matches!(parse_arg("10:30:00"), FormatArg::Time(_)));
        assert!(matches!(parse_arg("World"), FormatArg::Text(ref s) if s == "World"));
        assert!(matches!(parse_arg("inf"), FormatArg::Text(_)));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verba.toml");
        std::fs::write(
            &path,
            "basenames = [\"app\"]\ndefault_locale = \"en\"\nunresolved_code_fallback = false\n",
        )
        .unwrap();

        let options = ResolveOptions {
            code: "greeting".to_string(),
            basenames: vec!["errors".to_string(), "app".to_string()],
            fallback_to_code: true,
            config: Some(path),
            ..Default::default()
        };
        let config = source_config(&options).unwrap();
        assert_eq!(config.basenames, Some(vec!["errors".to_string(), "app".to_string()]));
        assert_eq!(config.default_locale, Some(Locale::en()));
        assert!(config.unresolved_code_fallback);
    }
}
