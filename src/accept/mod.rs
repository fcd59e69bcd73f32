//! Content negotiation over `Accept*` headers.
//!
//! This module provides the [`Accept`] view, which negotiates a response's
//! media type, charset, encoding, and language against the `Accept`,
//! `Accept-Charset`, `Accept-Encoding`, and `Accept-Language` headers of a
//! [`Request`]. Two query modes exist for each dimension:
//!
//! - **best-match** ([`Accept::media_type`] and friends) - the single
//!   highest-priority available option the client accepts, or `None`
//! - **all-matches** ([`Accept::media_types`] and friends) - every accepted
//!   available option, in match order
//!
//! The building blocks are public as well: [`parse`]/[`parse_language`]
//! produce quality-sorted [`Entry`] lists from raw header values, the
//! [`Matcher`] implementations hold the per-dimension equivalence rules, and
//! [`negotiate`]/[`negotiate_all`] run the shared matching loop.
//!
//! # Examples
//!
//! ```rust
//! use http_accord::Request;
//!
//! # fn main() -> http_accord::Result<()> {
//! let request = Request::get("/docs")
//!     .header(http::header::ACCEPT, "text/*; q=0.3, application/json")
//!     .header(http::header::ACCEPT_LANGUAGE, "en, es; q=0.7");
//!
//! let accept = request.accept();
//! assert_eq!(
//!     accept.media_type(&["text/html", "application/json"])?,
//!     Some("application/json"),
//! );
//! assert_eq!(accept.language(&["es-AR", "en-US"])?, Some("en-US"));
//! # Ok(())
//! # }
//! ```
//!
//! [`Request`]: crate::Request

mod entry;
mod matcher;

pub use entry::{parse, parse_language, Entry};
pub use matcher::{Charset, Encoding, InvalidMediaType, Language, Matcher, MediaType};

use crate::{Request, Result};
use alloc::vec::Vec;

/// Returns the best available option accepted by the client.
///
/// Iterates the acceptable entries in quality order and, for each, the
/// available options in caller order; the first equivalent option wins.
/// With no acceptable entries every option is accepted, so the first
/// available option is returned; with no available options there is nothing
/// to return and the result is `None`.
///
/// # Errors
///
/// Propagates the matcher's error ([`InvalidMediaType`] for media types).
pub fn negotiate<'v, M: Matcher>(
    acceptable: &[Entry],
    available: &[&'v str],
    matcher: &M,
) -> Result<Option<&'v str>> {
    if available.is_empty() {
        return Ok(None);
    }
    if acceptable.is_empty() {
        return Ok(Some(available[0]));
    }
    for entry in acceptable {
        for option in available {
            if matcher.equivalent(entry.value(), option)? {
                return Ok(Some(*option));
            }
        }
    }
    Ok(None)
}

/// Returns every available option accepted by the client, in match order.
///
/// When either input list is empty there is nothing to filter against, so
/// `available` is returned unchanged. This deliberately differs from
/// [`negotiate`], which returns `None` for an empty `available` list.
///
/// # Errors
///
/// Propagates the matcher's error ([`InvalidMediaType`] for media types).
pub fn negotiate_all<'v, M: Matcher>(
    acceptable: &[Entry],
    available: &[&'v str],
    matcher: &M,
) -> Result<Vec<&'v str>> {
    if available.is_empty() || acceptable.is_empty() {
        return Ok(available.to_vec());
    }
    let mut accepted = Vec::new();
    for entry in acceptable {
        for option in available {
            if matcher.equivalent(entry.value(), option)? {
                accepted.push(*option);
            }
        }
    }
    Ok(accepted)
}

/// Content-negotiation view over a [`Request`].
///
/// Borrowed from the request via [`Request::accept`]; the underlying header
/// parses are memoized on the request, so repeated negotiation is cheap.
///
/// # Examples
///
/// ```rust
/// use http_accord::Request;
///
/// # fn main() -> http_accord::Result<()> {
/// let request = Request::get("/")
///     .header(http::header::ACCEPT_ENCODING, "gzip, br; q=0.9");
///
/// assert_eq!(request.accept().encoding(&["br", "gzip"])?, Some("gzip"));
/// assert_eq!(request.accept().encodings(&["br", "gzip"])?, vec!["gzip", "br"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Accept<'a> {
    request: &'a Request,
}

impl<'a> Accept<'a> {
    /// Creates a negotiation view over the given request.
    pub fn new(request: &'a Request) -> Self {
        Self { request }
    }

    /// Returns the request this view negotiates against.
    pub fn request(&self) -> &Request {
        self.request
    }

    /// Negotiates the best content type from a list of available ones.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidMediaType`] when a media type on either side
    /// lacks its `/` separator.
    pub fn media_type<'v>(&self, available: &[&'v str]) -> Result<Option<&'v str>> {
        negotiate(self.request.accept_media_type(), available, &MediaType)
    }

    /// Returns all available content types the client accepts.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidMediaType`] when a media type on either side
    /// lacks its `/` separator.
    pub fn media_types<'v>(&self, available: &[&'v str]) -> Result<Vec<&'v str>> {
        negotiate_all(self.request.accept_media_type(), available, &MediaType)
    }

    /// Negotiates the best charset from a list of available ones.
    pub fn charset<'v>(&self, available: &[&'v str]) -> Result<Option<&'v str>> {
        negotiate(self.request.accept_charset(), available, &Charset)
    }

    /// Returns all available charsets the client accepts.
    pub fn charsets<'v>(&self, available: &[&'v str]) -> Result<Vec<&'v str>> {
        negotiate_all(self.request.accept_charset(), available, &Charset)
    }

    /// Negotiates the best encoding from a list of available ones.
    pub fn encoding<'v>(&self, available: &[&'v str]) -> Result<Option<&'v str>> {
        negotiate(self.request.accept_encoding(), available, &Encoding)
    }

    /// Returns all available encodings the client accepts.
    pub fn encodings<'v>(&self, available: &[&'v str]) -> Result<Vec<&'v str>> {
        negotiate_all(self.request.accept_encoding(), available, &Encoding)
    }

    /// Negotiates the best language from a list of available ones.
    pub fn language<'v>(&self, available: &[&'v str]) -> Result<Option<&'v str>> {
        negotiate(self.request.accept_language(), available, &Language)
    }

    /// Returns all available languages the client accepts.
    pub fn languages<'v>(&self, available: &[&'v str]) -> Result<Vec<&'v str>> {
        negotiate_all(self.request.accept_language(), available, &Language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn best_match_with_empty_available_is_none() {
        let acceptable = parse("application/json");
        assert_eq!(negotiate(&acceptable, &[], &MediaType).unwrap(), None);
    }

    #[test]
    fn best_match_with_empty_acceptable_is_first_available() {
        let result = negotiate(&[], &["application/json", "text/html"], &MediaType).unwrap();
        assert_eq!(result, Some("application/json"));
    }

    #[test]
    fn all_matches_with_empty_input_returns_available_unchanged() {
        let acceptable = parse("application/json");
        let empty: &[&str] = &[];
        assert!(negotiate_all(&acceptable, empty, &MediaType)
            .unwrap()
            .is_empty());
        assert_eq!(
            negotiate_all(&[], &["text/html"], &MediaType).unwrap(),
            vec!["text/html"]
        );
    }

    #[test]
    fn best_match_follows_quality_order() {
        let acceptable = parse("text/html; q=0.5, application/json");
        let result = negotiate(&acceptable, &["text/html", "application/json"], &MediaType);
        assert_eq!(result.unwrap(), Some("application/json"));
    }

    #[test]
    fn all_matches_collects_in_acceptable_order() {
        let acceptable = parse("text/html; q=0.5, application/json");
        let result =
            negotiate_all(&acceptable, &["text/html", "application/json"], &MediaType).unwrap();
        assert_eq!(result, vec!["application/json", "text/html"]);
    }

    #[test]
    fn invalid_available_media_type_propagates() {
        let acceptable = parse("application/json");
        assert!(negotiate(&acceptable, &["json"], &MediaType).is_err());
        assert!(negotiate_all(&acceptable, &["json"], &MediaType).is_err());
    }
}
