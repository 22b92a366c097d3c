//! Compiled message templates
//!
//! Message texts are compiled once, when a catalog is loaded, into a list of
//! literal and placeholder segments. Placeholders are positional:
//!
//! ```text
//! {0}                      argument 0, rendered by its own type
//! {1,number}               locale number format
//! {1,number,integer}       also: percent, currency
//! {2,date}  {2,date,long}  styles: short, medium, long, full
//! {3,time}  {3,time,short}
//! ```
//!
//! `''` is a literal apostrophe and `'...'` quotes literal text, so
//! `'{0}'` renders as `{0}`.

use crate::format::{
    CurrencyFormatter, DateFormatter, DateStyle, TimeStyle, currency_for_locale, format_integer,
    format_number, format_percent, format_whole,
};
use crate::{Locale, MessageError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::sync::Arc;

/// A value substituted into a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Text(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Text(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        FormatArg::Text(value.clone())
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        FormatArg::Integer(value)
    }
}

impl From<i32> for FormatArg {
    fn from(value: i32) -> Self {
        FormatArg::Integer(value.into())
    }
}

impl From<u32> for FormatArg {
    fn from(value: u32) -> Self {
        FormatArg::Integer(value.into())
    }
}

impl From<usize> for FormatArg {
    fn from(value: usize) -> Self {
        FormatArg::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        FormatArg::Float(value)
    }
}

impl From<f32> for FormatArg {
    fn from(value: f32) -> Self {
        FormatArg::Float(value.into())
    }
}

impl From<NaiveDate> for FormatArg {
    fn from(value: NaiveDate) -> Self {
        FormatArg::Date(value)
    }
}

impl From<NaiveTime> for FormatArg {
    fn from(value: NaiveTime) -> Self {
        FormatArg::Time(value)
    }
}

impl From<NaiveDateTime> for FormatArg {
    fn from(value: NaiveDateTime) -> Self {
        FormatArg::DateTime(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberStyle {
    Default,
    Integer,
    Percent,
    Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgFormat {
    Plain,
    Number(NumberStyle),
    Date(DateStyle),
    Time(TimeStyle),
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Argument { index: usize, format: ArgFormat },
}

/// A compiled message text, optionally bound to the locale used for
/// argument formatting.
///
/// Clones share the compiled segments.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pattern: Arc<str>,
    segments: Arc<[Segment]>,
    locale: Option<Locale>,
}

impl MessageTemplate {
    /// Compile `pattern`, binding it to `locale`.
    ///
    /// ```
    /// use verba_core::{FormatArg, Locale, MessageTemplate};
    ///
    /// let template = MessageTemplate::compile("{0} has {1,number} points", Some(Locale::de())).unwrap();
    /// assert_eq!(template.format(&["Anna".into(), 1234.into()]), "Anna has 1.234 points");
    ///
    /// assert!(MessageTemplate::compile("{0", None).is_err());
    /// ```
    pub fn compile(pattern: &str, locale: Option<Locale>) -> Result<Self> {
        let segments = parse(pattern)?;
        Ok(Self {
            pattern: Arc::from(pattern),
            segments: segments.into(),
            locale,
        })
    }

    /// A template rendering `text` verbatim, without interpreting braces or
    /// quotes.
    pub fn literal(text: &str, locale: Option<Locale>) -> Self {
        Self {
            pattern: Arc::from(text),
            segments: vec![Segment::Literal(text.to_string())].into(),
            locale,
        }
    }

    /// The text this template was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The locale used for argument formatting, if bound.
    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.locale.is_some()
    }

    /// Same template bound to a different formatting locale.
    pub fn with_locale(&self, locale: Option<Locale>) -> Self {
        Self {
            pattern: Arc::clone(&self.pattern),
            segments: Arc::clone(&self.segments),
            locale,
        }
    }

    /// Highest placeholder index plus one.
    pub fn argument_count(&self) -> usize {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Argument { index, .. } => Some(index + 1),
                Segment::Literal(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Render with positional arguments.
    ///
    /// A placeholder without a matching argument renders as `{n}`. Unbound
    /// templates format with [`Locale::root`] conventions.
    pub fn format(&self, args: &[FormatArg]) -> String {
        let root;
        let locale = match &self.locale {
            Some(locale) => locale,
            None => {
                root = Locale::root();
                &root
            }
        };

        let mut out = String::with_capacity(self.pattern.len());
        for segment in self.segments.iter() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Argument { index, format } => match args.get(*index) {
                    Some(arg) => out.push_str(&render(arg, *format, locale)),
                    None => {
                        out.push('{');
                        out.push_str(&index.to_string());
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&[]))
    }
}

fn render(arg: &FormatArg, format: ArgFormat, locale: &Locale) -> String {
    match (arg, format) {
        (FormatArg::Text(text), _) => text.clone(),

        (FormatArg::Integer(n), ArgFormat::Number(style @ (NumberStyle::Percent | NumberStyle::Currency))) => {
            render_number(*n as f64, style, locale)
        }
        (FormatArg::Integer(n), _) => format_whole(*n, locale),
        (FormatArg::Float(n), ArgFormat::Number(style)) => render_number(*n, style, locale),
        (FormatArg::Float(n), _) => format_number(*n, locale),

        (FormatArg::Date(date), ArgFormat::Date(style)) => render_date(*date, style, locale),
        (FormatArg::Date(date), _) => render_date(*date, DateStyle::Short, locale),
        (FormatArg::Time(time), ArgFormat::Time(style)) => render_time(*time, style, locale),
        (FormatArg::Time(time), _) => render_time(*time, TimeStyle::Short, locale),

        (FormatArg::DateTime(dt), ArgFormat::Date(style)) => render_date(dt.date(), style, locale),
        (FormatArg::DateTime(dt), ArgFormat::Time(style)) => render_time(dt.time(), style, locale),
        (FormatArg::DateTime(dt), _) => format!(
            "{}, {}",
            render_date(dt.date(), DateStyle::Short, locale),
            render_time(dt.time(), TimeStyle::Short, locale)
        ),
    }
}

fn render_number(n: f64, style: NumberStyle, locale: &Locale) -> String {
    match style {
        NumberStyle::Default => format_number(n, locale),
        NumberStyle::Integer => format_integer(n, locale),
        NumberStyle::Percent => format_percent(n, locale),
        NumberStyle::Currency => {
            CurrencyFormatter::new(currency_for_locale(locale).unwrap_or("¤")).format(n, locale)
        }
    }
}

fn render_date(date: NaiveDate, style: DateStyle, locale: &Locale) -> String {
    DateFormatter::new()
        .date_style(style)
        .format_date(date.year(), date.month(), date.day(), locale)
}

fn render_time(time: NaiveTime, style: TimeStyle, locale: &Locale) -> String {
    DateFormatter::new()
        .time_style(style)
        .format_time(time.hour(), time.minute(), time.second(), locale)
}

fn parse(pattern: &str) -> Result<Vec<Segment>> {
    let error = |reason: &str| MessageError::Template {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut in_quote = false;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                literal.push('\'');
            }
            '\'' => in_quote = !in_quote,
            _ if in_quote => literal.push(c),
            '{' => {
                let mut body = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    match c {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => return Err(error("nested '{' inside a placeholder")),
                        _ => body.push(c),
                    }
                }
                if !closed {
                    return Err(error("unmatched '{'"));
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(parse_placeholder(&body).map_err(|reason| error(&reason))?);
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn parse_placeholder(body: &str) -> std::result::Result<Segment, String> {
    let mut parts = body.splitn(3, ',').map(str::trim);

    let index = parts.next().unwrap_or_default();
    if index.is_empty() {
        return Err("empty argument index".to_string());
    }
    let index: usize = index
        .parse()
        .map_err(|_| format!("invalid argument index '{}'", index))?;

    let kind = parts.next().map(str::to_ascii_lowercase);
    let style = parts.next().map(str::to_ascii_lowercase).filter(|s| !s.is_empty());

    let format = match (kind.as_deref(), style.as_deref()) {
        (None, _) => ArgFormat::Plain,
        (Some("number"), None) => ArgFormat::Number(NumberStyle::Default),
        (Some("number"), Some("integer")) => ArgFormat::Number(NumberStyle::Integer),
        (Some("number"), Some("percent")) => ArgFormat::Number(NumberStyle::Percent),
        (Some("number"), Some("currency")) => ArgFormat::Number(NumberStyle::Currency),
        (Some("date"), None) => ArgFormat::Date(DateStyle::Medium),
        (Some("date"), Some(style)) => ArgFormat::Date(match style {
            "short" => DateStyle::Short,
            "medium" => DateStyle::Medium,
            "long" => DateStyle::Long,
            "full" => DateStyle::Full,
            other => return Err(format!("unknown date style '{}'", other)),
        }),
        (Some("time"), None) => ArgFormat::Time(TimeStyle::Medium),
        (Some("time"), Some(style)) => ArgFormat::Time(match style {
            "short" => TimeStyle::Short,
            "medium" => TimeStyle::Medium,
            "long" => TimeStyle::Long,
            "full" => TimeStyle::Full,
            other => return Err(format!("unknown time style '{}'", other)),
        }),
        (Some("number"), Some(other)) => return Err(format!("unknown number style '{}'", other)),
        (Some(other), _) => return Err(format!("unknown format type '{}'", other)),
    };

    Ok(Segment::Argument { index, format })
}
