//! `Accept*` header tokenizing and quality sorting.
//!
//! The parser turns one raw header value (several physical headers joined
//! with `,` by the caller) into an ordered list of [`Entry`] values sorted by
//! quality factor. Parsing is pure and idempotent, which is what makes the
//! per-request memoization in [`Request`] safe.
//!
//! [`Request`]: crate::Request

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

/// One parsed token from an `Accept*` header value.
///
/// Carries the token before the first `;` and its attributes in source
/// order, with keys lower-cased and surrounding quotes stripped from values.
///
/// # Examples
///
/// ```rust
/// use http_accord::accept;
///
/// let entries = accept::parse("text/html; q=0.8, application/json");
/// assert_eq!(entries[0].value(), "application/json");
/// assert_eq!(entries[1].value(), "text/html");
/// assert_eq!(entries[1].quality(), 0.8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    value: String,
    params: Vec<(String, String)>,
}

impl Entry {
    /// Returns the token value (the part before the first `;`). Never empty.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the quality factor from the `q` attribute.
    ///
    /// Defaults to `1.0` when the attribute is absent or unparsable.
    pub fn quality(&self) -> f32 {
        self.param("q")
            .and_then(|q| q.parse().ok())
            .unwrap_or(1.0)
    }

    /// Returns the value of the named attribute, if present.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over the attributes in source order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Parses a raw `Accept*` header value into entries sorted by quality.
///
/// Tokens are separated by `,`; attributes by `;`. Every piece is trimmed.
/// Attribute keys are lower-cased; attribute values lose surrounding `"`.
/// A piece with no `=` becomes a key with an empty value. Duplicate token
/// values keep their first position but take the attributes of the last
/// occurrence.
///
/// Entries with equal quality retain their relative order from the source
/// header.
///
/// # Examples
///
/// ```rust
/// use http_accord::accept;
///
/// let entries = accept::parse("text/plain; q=0.5, application/json, text/html; q=0.8");
/// let order: Vec<_> = entries.iter().map(|e| e.value()).collect();
/// assert_eq!(order, ["application/json", "text/html", "text/plain"]);
/// ```
pub fn parse(header: &str) -> Vec<Entry> {
    parse_with(header, str::to_owned)
}

/// Parses a raw `Accept-Language` header value.
///
/// Identical to [`parse`], except that tokens carrying the legacy `i-`
/// grandfathered-tag prefix are normalized into their modern lookup key by
/// stripping the prefix and lower-casing the remainder (`i-Klingon`
/// becomes `klingon`).
pub fn parse_language(header: &str) -> Vec<Entry> {
    parse_with(header, language_key)
}

fn parse_with(header: &str, key: fn(&str) -> String) -> Vec<Entry> {
    let mut entries: Vec<Entry> = Vec::new();

    for segment in header.split(',') {
        let mut pieces = segment.split(';');
        let value = pieces.next().unwrap_or(segment).trim();
        if value.is_empty() {
            continue;
        }
        let value = key(value);

        let mut params: Vec<(String, String)> = Vec::new();
        for piece in pieces {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            let (name, raw) = match piece.split_once('=') {
                Some((name, raw)) => (name, raw),
                // No `=`: keep the whole piece as a key with an empty value.
                None => (piece, ""),
            };
            let name = name.trim().to_ascii_lowercase();
            let raw = raw.trim().trim_matches('"').to_owned();
            match params.iter_mut().find(|(key, _)| *key == name) {
                Some(param) => param.1 = raw,
                None => params.push((name, raw)),
            }
        }

        // Duplicate tokens: last attributes win, original position is kept
        // so the quality tie-break stays deterministic.
        match entries.iter_mut().find(|entry| entry.value == value) {
            Some(entry) => entry.params = params,
            None => entries.push(Entry { value, params }),
        }
    }

    // Stable sort: equal qualities keep their source order.
    entries.sort_by(|a, b| b.quality().total_cmp(&a.quality()));
    entries
}

fn language_key(token: &str) -> String {
    // Byte-level prefix check: the prefix is pure ASCII, so stripping two
    // bytes always lands on a char boundary.
    let bytes = token.as_bytes();
    if bytes.len() > 2 && bytes[..2].eq_ignore_ascii_case(b"i-") {
        token[2..].to_ascii_lowercase()
    } else {
        token.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn values(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(Entry::value).collect()
    }

    #[test]
    fn sorts_by_quality_descending() {
        let entries = parse("text/plain; q=0.5, application/json, text/html; q=0.8");
        assert_eq!(
            values(&entries),
            vec!["application/json", "text/html", "text/plain"]
        );
    }

    #[test]
    fn equal_quality_keeps_source_order() {
        let entries = parse("text/plain; q=0.8, application/json, text/html; q=0.8");
        assert_eq!(
            values(&entries),
            vec!["application/json", "text/plain", "text/html"]
        );
    }

    #[test]
    fn unparsable_quality_defaults_to_one() {
        let entries = parse("text/html; q=abc, text/plain; q=0.9");
        assert_eq!(values(&entries), vec!["text/html", "text/plain"]);
        assert_eq!(entries[0].quality(), 1.0);
    }

    #[test]
    fn trims_and_unquotes_attributes() {
        let entries = parse(r#"text/html ; level = "1" ; q=0.7"#);
        assert_eq!(entries[0].value(), "text/html");
        assert_eq!(entries[0].param("level"), Some("1"));
        assert_eq!(entries[0].quality(), 0.7);
    }

    #[test]
    fn attribute_keys_are_lowercased() {
        let entries = parse("utf-8; Q=0.5");
        assert_eq!(entries[0].param("q"), Some("0.5"));
        assert_eq!(entries[0].quality(), 0.5);
    }

    #[test]
    fn attribute_without_equals_becomes_empty_key() {
        let entries = parse("text/html; flagged");
        assert_eq!(entries[0].param("flagged"), Some(""));
    }

    #[test]
    fn duplicate_tokens_take_last_attributes_and_first_position() {
        let entries = parse("text/html; q=0.9, application/json; q=0.9, text/html; q=0.9; level=2");
        assert_eq!(values(&entries), vec!["text/html", "application/json"]);
        assert_eq!(entries[0].param("level"), Some("2"));
    }

    #[test]
    fn empty_header_parses_to_nothing() {
        assert!(parse("").is_empty());
        assert!(parse(" , ,").is_empty());
    }

    #[test]
    fn grandfathered_language_tags_are_normalized() {
        let entries = parse_language("i-Klingon, en; q=0.5");
        assert_eq!(values(&entries), vec!["klingon", "en"]);
    }

    #[test]
    fn short_language_tokens_pass_through() {
        let entries = parse_language("i-");
        assert_eq!(values(&entries), vec!["i-"]);
    }
}
