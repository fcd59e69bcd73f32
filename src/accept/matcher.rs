//! Equivalence rules for the negotiated dimensions.
//!
//! Each rule is a stateless unit struct implementing [`Matcher`], so the
//! rules stay independently testable and the negotiation loop stays generic
//! over the header being negotiated.

use crate::{HttpError, Result};
use alloc::string::String;
use core::fmt;
use http::StatusCode;

/// Decides whether an acceptable header token accepts an available option.
pub trait Matcher {
    /// Returns whether `acceptable` (a parsed header token) accepts
    /// `available` (a caller-supplied option).
    ///
    /// # Errors
    ///
    /// Only [`MediaType`] can fail, with [`InvalidMediaType`] when either
    /// side lacks a `/` separator. The failure is a misuse signal and is
    /// never folded into "no match".
    fn equivalent(&self, acceptable: &str, available: &str) -> Result<bool>;
}

/// Media-type equivalence: `type/subtype[+suffix]` with `*` wildcards.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaType;

/// Charset equivalence: `*` or an ASCII case-insensitive token match.
#[derive(Debug, Clone, Copy, Default)]
pub struct Charset;

/// Encoding equivalence: `*` or an ASCII case-insensitive token match.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoding;

/// Language-tag equivalence with primary and sub-tag wildcarding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Language;

/// A media type without a `/` separator was handed to negotiation.
///
/// Distinct from "no match": it indicates caller or header misuse and
/// propagates to the caller with a `400` status.
#[derive(Debug)]
pub struct InvalidMediaType {
    value: String,
}

impl InvalidMediaType {
    /// Creates the error for the offending value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the offending media type.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for InvalidMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid media type `{}`: missing separator", self.value)
    }
}

impl core::error::Error for InvalidMediaType {}

impl HttpError for InvalidMediaType {
    fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

fn wildcard_eq(acceptable: &str, available: &str) -> bool {
    acceptable == "*" || available == "*" || acceptable.eq_ignore_ascii_case(available)
}

impl Matcher for MediaType {
    fn equivalent(&self, acceptable: &str, available: &str) -> Result<bool> {
        let (accept_base, accept_sub) = acceptable
            .split_once('/')
            .ok_or_else(|| InvalidMediaType::new(acceptable))?;
        let (avail_base, avail_sub) = available
            .split_once('/')
            .ok_or_else(|| InvalidMediaType::new(available))?;

        if wildcard_eq(accept_base, avail_base) && wildcard_eq(accept_sub, avail_sub) {
            return Ok(true);
        }

        // Suffix form: compare `vnd.example` and `json` halves separately,
        // but only when both sides carry a `+`.
        match (accept_sub.split_once('+'), avail_sub.split_once('+')) {
            (Some((accept_sub, accept_suffix)), Some((avail_sub, avail_suffix))) => Ok(
                wildcard_eq(accept_sub, avail_sub) && wildcard_eq(accept_suffix, avail_suffix)
            ),
            _ => Ok(false),
        }
    }
}

impl Matcher for Charset {
    fn equivalent(&self, acceptable: &str, available: &str) -> Result<bool> {
        Ok(acceptable == "*" || acceptable.eq_ignore_ascii_case(available))
    }
}

impl Matcher for Encoding {
    fn equivalent(&self, acceptable: &str, available: &str) -> Result<bool> {
        Ok(acceptable == "*" || acceptable.eq_ignore_ascii_case(available))
    }
}

fn split_tag(tag: &str) -> (&str, Option<&str>) {
    let mut labels = tag.split('-');
    let primary = labels.next().unwrap_or(tag);
    (primary, labels.next())
}

impl Matcher for Language {
    fn equivalent(&self, acceptable: &str, available: &str) -> Result<bool> {
        let (accept_primary, accept_sub) = split_tag(acceptable);
        let (avail_primary, avail_sub) = split_tag(available);

        let primary_eq =
            accept_primary == "*" || accept_primary.eq_ignore_ascii_case(avail_primary);
        let sub_eq = match (accept_sub, avail_sub) {
            (None, _) | (_, None) => true,
            (Some("*"), _) => true,
            (Some(accept_sub), Some(avail_sub)) => accept_sub.eq_ignore_ascii_case(avail_sub),
        };

        Ok(primary_eq && sub_eq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_wildcards_are_symmetric() {
        assert!(MediaType.equivalent("*/json", "application/json").unwrap());
        assert!(MediaType.equivalent("application/*", "application/json").unwrap());
        assert!(MediaType.equivalent("text/html", "text/*").unwrap());
        assert!(!MediaType.equivalent("text/html", "application/json").unwrap());
    }

    #[test]
    fn media_type_is_case_insensitive() {
        assert!(MediaType.equivalent("Text/HTML", "text/html").unwrap());
    }

    #[test]
    fn media_type_suffix_matching() {
        assert!(MediaType
            .equivalent("application/*+json", "application/vnd.example+json")
            .unwrap());
        assert!(MediaType
            .equivalent("application/vnd.example+*", "application/vnd.example+json")
            .unwrap());
        assert!(!MediaType
            .equivalent("application/*+xml", "application/vnd.example+json")
            .unwrap());
        // Only one side has a suffix: no fallback comparison.
        assert!(!MediaType
            .equivalent("application/vnd.example", "application/vnd.example+json")
            .unwrap());
    }

    #[test]
    fn media_type_missing_separator_is_an_error() {
        let err = MediaType.equivalent("json", "application/json").unwrap_err();
        let invalid = err.downcast_ref::<InvalidMediaType>().unwrap();
        assert_eq!(invalid.value(), "json");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        assert!(MediaType.equivalent("application/json", "json").is_err());
    }

    #[test]
    fn charset_and_encoding_accept_wildcard_on_acceptable_side_only() {
        assert!(Charset.equivalent("*", "utf-8").unwrap());
        assert!(Charset.equivalent("UTF-8", "utf-8").unwrap());
        assert!(!Charset.equivalent("utf-8", "*").unwrap());
        assert!(Encoding.equivalent("*", "gzip").unwrap());
        assert!(!Encoding.equivalent("gzip", "deflate").unwrap());
    }

    #[test]
    fn language_wildcards() {
        assert!(Language.equivalent("en-*", "en-US").unwrap());
        assert!(Language.equivalent("*-US", "en-US").unwrap());
        assert!(Language.equivalent("en", "en-US").unwrap());
        assert!(Language.equivalent("en-US", "en").unwrap());
        assert!(!Language.equivalent("en-GB", "en-US").unwrap());
        assert!(!Language.equivalent("es", "en").unwrap());
    }
}
