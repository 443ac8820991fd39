//! Ordered encoding fallback used to turn raw file bytes into text.

use std::fmt;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Windows-1252 code points for bytes 0x80..=0x9F; `None` marks unassigned bytes
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// A candidate character encoding for source files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Strict UTF-8; a leading BOM is kept as U+FEFF
    Utf8,
    /// UTF-8 with an optional BOM that is stripped
    Utf8Sig,
    /// ISO-8859-1 under its `latin-1` label; every byte maps to a code point
    Latin1,
    /// Windows-1252; five bytes in 0x80..=0x9F are unassigned
    Cp1252,
    /// ISO-8859-1 under its canonical label
    Iso8859_1,
}

/// Encodings in the order they are attempted
///
/// Latin-1 never fails, so the entries after it are only reached if it is removed.
pub const FALLBACK_ORDER: [Encoding; 5] = [
    Encoding::Utf8,
    Encoding::Utf8Sig,
    Encoding::Latin1,
    Encoding::Cp1252,
    Encoding::Iso8859_1,
];

impl Encoding {
    /// Label written into provenance headers
    pub fn label(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf8Sig => "utf-8-sig",
            Encoding::Latin1 => "latin-1",
            Encoding::Cp1252 => "cp1252",
            Encoding::Iso8859_1 => "iso-8859-1",
        }
    }

    /// Decodes `bytes`, returning `None` if they are invalid in this encoding
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Encoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_owned)
            }
            Encoding::Latin1 | Encoding::Iso8859_1 => {
                Some(bytes.iter().map(|&b| char::from(b)).collect())
            }
            Encoding::Cp1252 => bytes
                .iter()
                .map(|&b| match b {
                    0x80..=0x9F => CP1252_HIGH[usize::from(b - 0x80)],
                    _ => Some(char::from(b)),
                })
                .collect(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decodes with the first encoding in [`FALLBACK_ORDER`] that accepts the bytes
pub fn decode_with_fallback(bytes: &[u8]) -> Option<(String, Encoding)> {
    FALLBACK_ORDER
        .iter()
        .find_map(|&encoding| encoding.decode(bytes).map(|text| (text, encoding)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_wins_for_valid_input() {
        let (text, encoding) = decode_with_fallback("naïve façade".as_bytes()).unwrap();
        assert_eq!(encoding, Encoding::Utf8);
        assert_eq!(text, "naïve façade");
    }

    #[test]
    fn test_bom_is_kept_by_plain_utf8() {
        let (text, encoding) = decode_with_fallback(b"\xEF\xBB\xBFhello").unwrap();
        assert_eq!(encoding, Encoding::Utf8);
        assert_eq!(text, "\u{FEFF}hello");
    }

    #[test]
    fn test_invalid_utf8_falls_back_to_latin1() {
        let (text, encoding) = decode_with_fallback(b"caf\xE9 \x93quoted\x94").unwrap();
        assert_eq!(encoding, Encoding::Latin1);
        assert_eq!(text, "caf\u{e9} \u{93}quoted\u{94}");
    }

    #[test]
    fn test_utf8_sig_strips_bom() {
        assert_eq!(Encoding::Utf8Sig.decode(b"\xEF\xBB\xBFx").as_deref(), Some("x"));
    }

    #[test]
    fn test_cp1252_maps_smart_quotes_and_rejects_holes() {
        assert_eq!(
            Encoding::Cp1252.decode(b"\x93hi\x94").as_deref(),
            Some("\u{201C}hi\u{201D}")
        );
        assert_eq!(Encoding::Cp1252.decode(b"\x81"), None);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = FALLBACK_ORDER.iter().map(|e| e.label()).collect();
        assert_eq!(labels, ["utf-8", "utf-8-sig", "latin-1", "cp1252", "iso-8859-1"]);
    }
}
