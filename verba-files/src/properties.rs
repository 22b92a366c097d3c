//! `.properties` reading and writing
//!
//! Supports the classic line-oriented format: `#`/`!` comments, `=`, `:` or
//! whitespace separated entries, backslash line continuations, and
//! `\t \n \r \f \uXXXX` escapes.

use crate::{Encoding, FileError, FileResult};
use std::collections::BTreeMap;

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parse properties text into key/value pairs; later duplicates win.
///
/// ```
/// use verba_files::properties;
///
/// let entries = properties::parse("# comment\ngreeting = Hello, \\\n    {0}!\n").unwrap();
/// assert_eq!(entries["greeting"], "Hello, {0}!");
/// ```
pub fn parse(input: &str) -> FileResult<BTreeMap<String, String>> {
    let mut entries = BTreeMap::new();
    let mut lines = input.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let trimmed = line.trim_start_matches(WHITESPACE);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        let line = index + 1;
        entries.insert(unescape(key, line)?, unescape(value, line)?);
    }

    Ok(entries)
}

/// Odd number of trailing backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let mut rest = line[key_end..].trim_start_matches(WHITESPACE);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(WHITESPACE);
    }
    (&line[..key_end], rest)
}

fn unescape(text: &str, line: usize) -> FileResult<String> {
    let malformed = || FileError::Properties {
        line,
        reason: "malformed \\uXXXX escape".to_string(),
    };

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = hex_unit(&mut chars).ok_or_else(malformed)?;
                let code = if (0xD800..0xDC00).contains(&unit) {
                    // surrogate pair written as two escapes
                    let rest = chars.as_str();
                    if !rest.starts_with("\\u") {
                        return Err(malformed());
                    }
                    chars.nth(1);
                    let low = hex_unit(&mut chars).ok_or_else(malformed)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(malformed());
                    }
                    0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    unit
                };
                out.push(char::from_u32(code).ok_or_else(malformed)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn hex_unit(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut value = 0;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

/// Render entries as properties text.
///
/// Characters `encoding` cannot represent are written as `\uXXXX` escapes,
/// so the result always encodes cleanly.
pub fn write<'a, I>(comment: Option<&str>, entries: I, encoding: Encoding) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();

    if let Some(comment) = comment {
        for line in comment.lines() {
            out.push('#');
            out.push_str(&escape(line, false, true, encoding));
            out.push('\n');
        }
    }

    for (key, value) in entries {
        out.push_str(&escape(key, true, false, encoding));
        out.push('=');
        out.push_str(&escape(value, false, false, encoding));
        out.push('\n');
    }

    out
}

fn escape(text: &str, is_key: bool, is_comment: bool, encoding: Encoding) -> String {
    let mut out = String::with_capacity(text.len());

    for (i, c) in text.chars().enumerate() {
        match c {
            _ if is_comment => {
                if encoding.can_encode(c) && !c.is_control() {
                    out.push(c);
                } else {
                    push_unicode_escape(&mut out, c);
                }
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() || !encoding.can_encode(c) => push_unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }

    out
}

fn push_unicode_escape(out: &mut String, c: char) {
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        out.push_str(&format!("\\u{:04X}", unit));
    }
}
