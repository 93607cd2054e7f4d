//! Line-oriented tokenizer for RTP zone/parameter text
//!
//! The remapping engine never pattern-matches raw text; it consumes this
//! token stream. A "zone header" is a `[name]` line whose trailing comment
//! is exactly `; Zone name`; any other bracketed line is a plain header.

use regex::Regex;

/// Marker comment that distinguishes zone headers from other sections.
pub const ZONE_NAME_MARKER: &str = "; Zone name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `[name]   ; Zone name`
    ZoneHeader { name: &'a str, raw: &'a str },
    /// Any other `[name]` line
    Header { name: &'a str, raw: &'a str },
    /// `Alg = <name>` sub-section marker
    AlgMarker { name: &'a str, raw: &'a str },
    /// `key = value` parameter line
    KeyValue {
        key: &'a str,
        value: &'a str,
        raw: &'a str,
    },
    /// Blank lines, comments, and anything unrecognized
    Other { raw: &'a str },
}

impl<'a> Token<'a> {
    pub fn raw(&self) -> &'a str {
        match self {
            Token::ZoneHeader { raw, .. }
            | Token::Header { raw, .. }
            | Token::AlgMarker { raw, .. }
            | Token::KeyValue { raw, .. }
            | Token::Other { raw } => raw,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, Token::ZoneHeader { .. } | Token::Header { .. })
    }
}

/// Tokenize cleaned RTP text, one token per line.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let header_re = Regex::new(r"^\s*\[([^\[\]]*)\]").expect("valid regex");
    let mut tokens = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(caps) = header_re.captures(trimmed) {
            let name = caps.get(1).map_or("", |m| m.as_str());
            if trimmed.ends_with(ZONE_NAME_MARKER) {
                tokens.push(Token::ZoneHeader { name, raw: line });
            } else {
                tokens.push(Token::Header { name, raw: line });
            }
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            let key = key.trim();
            let value = value.trim();
            if key == "Alg" {
                tokens.push(Token::AlgMarker { name: value, raw: line });
            } else if key.is_empty() {
                tokens.push(Token::Other { raw: line });
            } else {
                tokens.push(Token::KeyValue { key, value, raw: line });
            }
            continue;
        }
        tokens.push(Token::Other { raw: line });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_header_vs_plain_header() {
        let tokens = tokenize("[Pad_A]   ; Zone name\n[Scan_Area]\n");
        assert_eq!(
            tokens[0],
            Token::ZoneHeader {
                name: "Pad_A",
                raw: "[Pad_A]   ; Zone name"
            }
        );
        assert_eq!(
            tokens[1],
            Token::Header {
                name: "Scan_Area",
                raw: "[Scan_Area]"
            }
        );
    }

    #[test]
    fn test_reserved_header_with_marker_is_zone_header() {
        let tokens = tokenize("[Scan_Area]   ; Zone name\n");
        assert!(matches!(
            tokens[0],
            Token::ZoneHeader { name: "Scan_Area", .. }
        ));
    }

    #[test]
    fn test_alg_marker_and_key_value() {
        let tokens = tokenize("Alg = Solder_Bump\nMin_Defect_Area_-_Bright = 10 ; um\n");
        assert_eq!(
            tokens[0],
            Token::AlgMarker {
                name: "Solder_Bump",
                raw: "Alg = Solder_Bump"
            }
        );
        match tokens[1] {
            Token::KeyValue { key, value, .. } => {
                assert_eq!(key, "Min_Defect_Area_-_Bright");
                assert_eq!(value, "10 ; um");
            }
            ref other => panic!("unexpected token: {other:?}"),
        }
    }

    #[test]
    fn test_other_lines() {
        let tokens = tokenize("\n; just a comment\nnoise line\n");
        assert!(tokens.iter().all(|t| matches!(t, Token::Other { .. })));
    }

    #[test]
    fn test_raw_preserved() {
        let text = "  [Pad_A]   ; Zone name";
        let tokens = tokenize(text);
        assert_eq!(tokens[0].raw(), text);
        assert!(tokens[0].is_header());
    }
}
