//! Locale-aware argument formatting
//!
//! Number, percent, currency, date and time rendering used when a
//! [`MessageTemplate`](crate::MessageTemplate) substitutes its arguments.
//! The rules are intentionally coarse: separators and date order are picked
//! by language, currency by country.

use crate::Locale;

/// Date formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// "Monday, January 15, 2024"
    Full,
    /// "January 15, 2024"
    Long,
    /// "Jan 15, 2024"
    #[default]
    Medium,
    /// "1/15/24"
    Short,
}

/// Time formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeStyle {
    Full,
    Long,
    /// "2:30:00 PM"
    #[default]
    Medium,
    /// "2:30 PM"
    Short,
}

// ============================================================================
// Number Formatting
// ============================================================================

/// Number formatting configuration.
#[derive(Debug, Clone)]
pub struct NumberFormatter {
    /// Minimum fraction digits
    pub min_fraction_digits: usize,
    /// Maximum fraction digits
    pub max_fraction_digits: usize,
    /// Use grouping separators
    pub use_grouping: bool,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 3,
            use_grouping: true,
        }
    }
}

impl NumberFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_fraction_digits(mut self, digits: usize) -> Self {
        self.min_fraction_digits = digits;
        self
    }

    pub fn max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    pub fn use_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = use_grouping;
        self
    }

    /// Format a number for the given locale.
    pub fn format(&self, n: f64, locale: &Locale) -> String {
        let (decimal_sep, group_sep) = number_separators(locale);

        let digits = self.max_fraction_digits.max(self.min_fraction_digits);
        let formatted = format!("{:.*}", digits, n.abs());
        let (integer_part, fraction_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));

        let mut fraction = fraction_part.to_string();
        while fraction.len() > self.min_fraction_digits && fraction.ends_with('0') {
            fraction.pop();
        }

        let integer = if self.use_grouping {
            add_grouping(integer_part, group_sep)
        } else {
            integer_part.to_string()
        };

        // "-0" is not a thing
        let negative = n < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if negative { "-" } else { "" };

        if fraction.is_empty() {
            format!("{}{}", sign, integer)
        } else {
            format!("{}{}{}{}", sign, integer, decimal_sep, fraction)
        }
    }

    /// Format a whole number for the given locale without going through `f64`.
    pub fn format_i64(&self, n: i64, locale: &Locale) -> String {
        let (decimal_sep, group_sep) = number_separators(locale);

        let digits = n.unsigned_abs().to_string();
        let integer = if self.use_grouping {
            add_grouping(&digits, group_sep)
        } else {
            digits
        };
        let sign = if n < 0 { "-" } else { "" };

        if self.min_fraction_digits == 0 {
            format!("{}{}", sign, integer)
        } else {
            format!("{}{}{}{}", sign, integer, decimal_sep, "0".repeat(self.min_fraction_digits))
        }
    }
}

/// Format a number with at most three fraction digits.
///
/// ```
/// use verba_core::{format_number, Locale};
///
/// assert_eq!(format_number(1234567.891, &Locale::en_us()), "1,234,567.891");
/// assert_eq!(format_number(1234567.891, &Locale::de_de()), "1.234.567,891");
/// assert_eq!(format_number(1234567.5, &Locale::fr_fr()), "1 234 567,5");
/// ```
pub fn format_number(n: f64, locale: &Locale) -> String {
    NumberFormatter::default().format(n, locale)
}

/// Format a whole number, rounding away any fraction.
pub fn format_integer(n: f64, locale: &Locale) -> String {
    NumberFormatter::new().max_fraction_digits(0).format(n, locale)
}

/// Format an exact whole number with grouping.
///
/// ```
/// use verba_core::{format_whole, Locale};
///
/// assert_eq!(format_whole(9_007_199_254_740_993, &Locale::en_us()), "9,007,199,254,740,993");
/// assert_eq!(format_whole(-12345, &Locale::de_de()), "-12.345");
/// ```
pub fn format_whole(n: i64, locale: &Locale) -> String {
    NumberFormatter::default().format_i64(n, locale)
}

/// Format a ratio as a percentage.
///
/// ```
/// use verba_core::{format_percent, Locale};
///
/// assert_eq!(format_percent(0.75, &Locale::en_us()), "75%");
/// assert_eq!(format_percent(0.125, &Locale::de_de()), "12,5%");
/// ```
pub fn format_percent(n: f64, locale: &Locale) -> String {
    let formatted = NumberFormatter::new()
        .max_fraction_digits(1)
        .format(n * 100.0, locale);
    format!("{}%", formatted)
}

// ============================================================================
// Currency Formatting
// ============================================================================

/// Currency formatting configuration.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    /// Currency code (ISO 4217)
    pub currency_code: String,
    /// Show currency symbol instead of code
    pub use_symbol: bool,
}

impl CurrencyFormatter {
    pub fn new(currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into().to_uppercase(),
            use_symbol: true,
        }
    }

    pub fn use_symbol(mut self, use_symbol: bool) -> Self {
        self.use_symbol = use_symbol;
        self
    }

    /// Format a currency amount.
    pub fn format(&self, amount: f64, locale: &Locale) -> String {
        let (symbol, before) = currency_symbol(&self.currency_code, locale);

        let formatted = NumberFormatter::new()
            .min_fraction_digits(2)
            .max_fraction_digits(2)
            .format(amount.abs(), locale);

        let sign = if amount < 0.0 { "-" } else { "" };

        if !self.use_symbol {
            format!("{}{} {}", sign, formatted, self.currency_code)
        } else if before {
            format!("{}{}{}", sign, symbol, formatted)
        } else {
            format!("{}{} {}", sign, formatted, symbol)
        }
    }
}

/// Format an amount in an explicit currency.
///
/// ```
/// use verba_core::{format_currency, Locale};
///
/// assert_eq!(format_currency(99.99, "USD", &Locale::en_us()), "$99.99");
/// assert_eq!(format_currency(99.99, "EUR", &Locale::de_de()), "99,99 €");
/// ```
pub fn format_currency(amount: f64, currency_code: &str, locale: &Locale) -> String {
    CurrencyFormatter::new(currency_code).format(amount, locale)
}

/// The currency used in the locale's country, `None` when unknown.
pub fn currency_for_locale(locale: &Locale) -> Option<&'static str> {
    let code = match locale.country.as_str() {
        "US" => "USD",
        "GB" => "GBP",
        "DE" | "AT" | "FR" | "ES" | "IT" | "NL" | "BE" | "FI" | "IE" | "PT" | "GR" | "LU" => "EUR",
        "CH" | "LI" => "CHF",
        "JP" => "JPY",
        "CN" => "CNY",
        "KR" => "KRW",
        "IN" => "INR",
        "BR" => "BRL",
        "CA" => "CAD",
        "AU" => "AUD",
        "SE" => "SEK",
        "NO" => "NOK",
        "DK" => "DKK",
        "PL" => "PLN",
        "CZ" => "CZK",
        "MX" => "MXN",
        _ => return None,
    };
    Some(code)
}

// ============================================================================
// Date Formatting
// ============================================================================

/// Date and time formatting configuration.
#[derive(Debug, Clone, Default)]
pub struct DateFormatter {
    pub date_style: Option<DateStyle>,
    pub time_style: Option<TimeStyle>,
}

impl DateFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_style(mut self, style: DateStyle) -> Self {
        self.date_style = Some(style);
        self
    }

    pub fn time_style(mut self, style: TimeStyle) -> Self {
        self.time_style = Some(style);
        self
    }

    /// Format a date (year, month, day).
    pub fn format_date(&self, year: i32, month: u32, day: u32, locale: &Locale) -> String {
        format_date_impl(year, month, day, self.date_style.unwrap_or_default(), locale)
    }

    /// Format a time (hour, minute, second).
    pub fn format_time(&self, hour: u32, minute: u32, second: u32, locale: &Locale) -> String {
        format_time_impl(hour, minute, second, self.time_style.unwrap_or_default(), locale)
    }
}

/// Format a date in medium style.
///
/// ```
/// use verba_core::{format_date, Locale};
///
/// assert_eq!(format_date(2024, 1, 15, &Locale::en_us()), "Jan 15, 2024");
/// assert_eq!(format_date(2024, 1, 15, &Locale::de_de()), "15 Jan 2024");
/// ```
pub fn format_date(year: i32, month: u32, day: u32, locale: &Locale) -> String {
    format_date_impl(year, month, day, DateStyle::Medium, locale)
}

/// Format a time in medium style.
pub fn format_time(hour: u32, minute: u32, second: u32, locale: &Locale) -> String {
    format_time_impl(hour, minute, second, TimeStyle::Medium, locale)
}

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_LONG: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const WEEKDAYS: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

fn format_date_impl(year: i32, month: u32, day: u32, style: DateStyle, locale: &Locale) -> String {
    let month_idx = (month.saturating_sub(1) as usize).min(11);

    let is_dmy = (locale.language == "en" && locale.country == "GB")
        || matches!(locale.language.as_str(), "fr" | "de" | "es" | "it" | "pt" | "ru" | "pl" | "nl");
    let is_ymd = matches!(locale.language.as_str(), "ja" | "zh" | "ko");

    match style {
        DateStyle::Full => {
            let weekday = chrono::NaiveDate::from_ymd_opt(year, month, day)
                .map(|date| {
                    use chrono::Datelike;
                    WEEKDAYS[date.weekday().num_days_from_monday() as usize]
                })
                .unwrap_or_default();
            if is_dmy {
                format!("{}, {} {} {}", weekday, day, MONTHS_LONG[month_idx], year)
            } else {
                format!("{}, {} {}, {}", weekday, MONTHS_LONG[month_idx], day, year)
            }
        }
        DateStyle::Long => {
            if is_dmy {
                format!("{} {} {}", day, MONTHS_LONG[month_idx], year)
            } else {
                format!("{} {}, {}", MONTHS_LONG[month_idx], day, year)
            }
        }
        DateStyle::Medium => {
            if is_ymd {
                format!("{}/{}/{}", year, month, day)
            } else if is_dmy {
                format!("{} {} {}", day, MONTHS_SHORT[month_idx], year)
            } else {
                format!("{} {}, {}", MONTHS_SHORT[month_idx], day, year)
            }
        }
        DateStyle::Short => {
            if is_ymd {
                format!("{}/{}/{}", year % 100, month, day)
            } else if is_dmy {
                format!("{}/{}/{}", day, month, year % 100)
            } else {
                format!("{}/{}/{}", month, day, year % 100)
            }
        }
    }
}

fn format_time_impl(hour: u32, minute: u32, second: u32, style: TimeStyle, locale: &Locale) -> String {
    let use_12h = locale.language == "en" || locale.language.is_empty();

    let (h, period) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };

    match (style, use_12h) {
        (TimeStyle::Short, true) => format!("{}:{:02} {}", h, minute, period),
        (TimeStyle::Short, false) => format!("{:02}:{:02}", hour, minute),
        (_, true) => format!("{}:{:02}:{:02} {}", h, minute, second, period),
        (_, false) => format!("{:02}:{:02}:{:02}", hour, minute, second),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Decimal and grouping separators for a locale.
fn number_separators(locale: &Locale) -> (&'static str, &'static str) {
    match locale.language.as_str() {
        "de" | "es" | "it" | "pt" | "nl" | "da" | "pl" | "cs" | "sk" | "hu" | "ro" | "bg" | "el"
        | "tr" | "id" | "vi" => (",", "."),

        "fr" | "sv" | "no" | "nb" | "fi" | "ru" | "uk" => (",", " "),

        _ => (".", ","),
    }
}

/// Add grouping separators to a run of integer digits.
fn add_grouping(s: &str, sep: &str) -> String {
    let len = s.len();
    if len <= 3 {
        return s.to_string();
    }

    let mut result = String::with_capacity(len + (len - 1) / 3 * sep.len());
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(sep);
        }
        result.push(c);
    }
    result
}

/// Currency symbol and whether it goes before the amount.
fn currency_symbol(currency_code: &str, locale: &Locale) -> (String, bool) {
    let symbol_before = !matches!(
        locale.language.as_str(),
        "de" | "fr" | "es" | "it" | "pt" | "nl" | "da" | "sv" | "no" | "fi" | "pl" | "cs" | "sk"
            | "hu" | "ro" | "bg" | "el" | "ru" | "uk" | "vi"
    );

    let symbol = match currency_code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "KRW" => "₩",
        "INR" => "₹",
        "BRL" => "R$",
        "CAD" => "CA$",
        "AUD" => "A$",
        "SEK" | "NOK" | "DKK" => "kr",
        "PLN" => "zł",
        "CZK" => "Kč",
        "MXN" => "MX$",
        _ => currency_code,
    };

    (symbol.to_string(), symbol_before)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_us() {
        let locale = Locale::en_us();
        assert_eq!(format_number(1234567.89, &locale), "1,234,567.89");
        assert_eq!(format_number(1000.0, &locale), "1,000");
        assert_eq!(format_number(1.5, &locale), "1.5");
    }

    #[test]
    fn test_format_number_german_and_french() {
        assert_eq!(format_number(1234567.89, &Locale::de_de()), "1.234.567,89");
        assert_eq!(format_number(1234567.89, &Locale::fr_fr()), "1 234 567,89");
    }

    #[test]
    fn test_format_number_negative() {
        let locale = Locale::en_us();
        assert_eq!(format_number(-123.0, &locale), "-123");
        assert_eq!(format_number(-1234.5, &locale), "-1,234.5");
        assert_eq!(format_number(-0.0001, &locale), "0");
    }

    #[test]
    fn test_format_integer_rounds() {
        assert_eq!(format_integer(1234.6, &Locale::en_us()), "1,235");
        assert_eq!(format_integer(7.0, &Locale::de_de()), "7");
    }

    #[test]
    fn test_format_whole_keeps_every_digit() {
        let us = Locale::en_us();
        assert_eq!(format_whole(9_007_199_254_740_993, &us), "9,007,199,254,740,993");
        assert_eq!(format_whole(i64::MIN, &us), "-9,223,372,036,854,775,808");
        assert_eq!(format_whole(0, &us), "0");
        assert_eq!(format_whole(1234567, &Locale::fr_fr()), "1 234 567");
        assert_eq!(
            NumberFormatter::new().use_grouping(false).format_i64(-1234, &us),
            "-1234"
        );
        assert_eq!(
            NumberFormatter::new().min_fraction_digits(2).format_i64(12, &Locale::de_de()),
            "12,00"
        );
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.75, &Locale::en_us()), "75%");
        assert_eq!(format_percent(0.125, &Locale::de_de()), "12,5%");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(99.99, "USD", &Locale::en_us()), "$99.99");
        assert_eq!(format_currency(99.99, "EUR", &Locale::de_de()), "99,99 €");
        assert_eq!(format_currency(-5.0, "GBP", &Locale::en_gb()), "-£5.00");
        assert_eq!(
            CurrencyFormatter::new("chf").use_symbol(false).format(10.0, &Locale::en()),
            "10.00 CHF"
        );
    }

    #[test]
    fn test_currency_for_locale() {
        assert_eq!(currency_for_locale(&Locale::de_at()), Some("EUR"));
        assert_eq!(currency_for_locale(&Locale::en_us()), Some("USD"));
        assert_eq!(currency_for_locale(&Locale::de()), None);
    }

    #[test]
    fn test_format_date_styles() {
        let us = Locale::en_us();
        assert_eq!(format_date(2024, 1, 15, &us), "Jan 15, 2024");
        assert_eq!(
            DateFormatter::new().date_style(DateStyle::Short).format_date(2024, 1, 15, &us),
            "1/15/24"
        );
        assert_eq!(
            DateFormatter::new().date_style(DateStyle::Short).format_date(2024, 1, 15, &Locale::en_gb()),
            "15/1/24"
        );
        assert_eq!(
            DateFormatter::new().date_style(DateStyle::Full).format_date(2024, 1, 15, &us),
            "Monday, January 15, 2024"
        );
        assert_eq!(format_date(2024, 1, 15, &Locale::ja_jp()), "2024/1/15");
    }

    #[test]
    fn test_format_time() {
        let short = DateFormatter::new().time_style(TimeStyle::Short);
        assert_eq!(short.format_time(14, 30, 0, &Locale::en_us()), "2:30 PM");
        assert_eq!(short.format_time(14, 30, 0, &Locale::de_de()), "14:30");
        assert_eq!(format_time(0, 5, 9, &Locale::en()), "12:05:09 AM");
    }

    #[test]
    fn test_add_grouping() {
        assert_eq!(add_grouping("1234567", ","), "1,234,567");
        assert_eq!(add_grouping("123", ","), "123");
        assert_eq!(add_grouping("1234", " "), "1 234");
    }
}
