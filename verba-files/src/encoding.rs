//! Text encodings for message files

use crate::{FileError, FileResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character encoding applied to every message file read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Encoding {
    /// ISO-8859-1, one byte per character
    #[default]
    #[serde(rename = "ISO-8859-1", alias = "latin1")]
    Latin1,
    #[serde(rename = "UTF-8", alias = "utf8")]
    Utf8,
    /// windows-1252, ISO-8859-1 with printable characters in 0x80..=0x9F
    #[serde(rename = "windows-1252", alias = "cp1252")]
    Windows1252,
}

// 0x80..=0x9F; unassigned slots map to the matching C1 control
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{81}', '\u{201A}', '\u{192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{2C6}', '\u{2030}', '\u{160}', '\u{2039}', '\u{152}', '\u{8D}', '\u{17D}', '\u{8F}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{2DC}', '\u{2122}', '\u{161}', '\u{203A}', '\u{153}', '\u{9D}', '\u{17E}', '\u{178}',
];

fn cp1252_byte(c: char) -> Option<u8> {
    match c as u32 {
        code @ (0..=0x7F | 0xA0..=0xFF) => Some(code as u8),
        _ => CP1252_HIGH.iter().position(|&high| high == c).map(|i| 0x80 + i as u8),
    }
}

fn cp1252_char(b: u8) -> char {
    match b {
        0x80..=0x9F => CP1252_HIGH[usize::from(b - 0x80)],
        _ => char::from(b),
    }
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Latin1 => "ISO-8859-1",
            Encoding::Utf8 => "UTF-8",
            Encoding::Windows1252 => "windows-1252",
        }
    }

    /// Whether `c` can be written without an escape.
    pub fn can_encode(&self, c: char) -> bool {
        match self {
            Encoding::Latin1 => (c as u32) <= 0xFF,
            Encoding::Utf8 => true,
            Encoding::Windows1252 => cp1252_byte(c).is_some(),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> FileResult<String> {
        match self {
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                String::from_utf8(bytes.to_vec()).map_err(|e| FileError::Encoding(e.to_string()))
            }
            Encoding::Windows1252 => Ok(bytes.iter().map(|&b| cp1252_char(b)).collect()),
        }
    }

    pub fn encode(&self, text: &str) -> FileResult<Vec<u8>> {
        match self {
            Encoding::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(c as u32).map_err(|_| {
                        FileError::Encoding(format!("'{}' is not representable in ISO-8859-1", c))
                    })
                })
                .collect(),
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Windows1252 => text
                .chars()
                .map(|c| {
                    cp1252_byte(c).ok_or_else(|| {
                        FileError::Encoding(format!("'{}' is not representable in windows-1252", c))
                    })
                })
                .collect(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = FileError;

    fn from_str(s: &str) -> FileResult<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Encoding::Latin1),
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "windows-1252" | "cp1252" | "x-cp1252" => Ok(Encoding::Windows1252),
            other => Err(FileError::Encoding(format!("unsupported encoding '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("ISO-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("latin1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("utf_8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("Windows-1252".parse::<Encoding>().unwrap(), Encoding::Windows1252);
        assert_eq!("cp1252".parse::<Encoding>().unwrap(), Encoding::Windows1252);
        assert!("ebcdic".parse::<Encoding>().is_err());
        assert_eq!(Encoding::default(), Encoding::Latin1);
    }

    #[test]
    fn test_latin1() {
        let bytes = Encoding::Latin1.encode("Grüße").unwrap();
        assert_eq!(bytes, b"Gr\xFC\xDFe");
        assert_eq!(Encoding::Latin1.decode(&bytes).unwrap(), "Grüße");
        assert!(Encoding::Latin1.encode("€").is_err());
        assert!(!Encoding::Latin1.can_encode('€'));
    }

    #[test]
    fn test_utf8() {
        let bytes = Encoding::Utf8.encode("€").unwrap();
        assert_eq!(Encoding::Utf8.decode(&bytes).unwrap(), "€");
        assert_eq!(Encoding::Utf8.decode(b"\xEF\xBB\xBFa=b").unwrap(), "a=b");
        assert!(Encoding::Utf8.decode(b"\xFF").is_err());
    }

    #[test]
    fn test_windows_1252() {
        let bytes = Encoding::Windows1252.encode("5 € \u{201C}Grüße\u{201D}").unwrap();
        assert_eq!(bytes, b"5 \x80 \x93Gr\xFC\xDFe\x94");
        assert_eq!(
            Encoding::Windows1252.decode(&bytes).unwrap(),
            "5 € \u{201C}Grüße\u{201D}"
        );
        assert_eq!(Encoding::Windows1252.decode(b"\x81").unwrap(), "\u{81}");
        assert!(Encoding::Windows1252.can_encode('\u{178}'));
        assert!(!Encoding::Windows1252.can_encode('\u{80}'));
        assert!(Encoding::Windows1252.encode("\u{3B1}").is_err());
    }
}
