//! Cookie representation with client-matching semantics.
//!
//! This module provides the [`Cookie`] value object:
//!
//! - Validated construction (name checked against the disallowed characters)
//! - Client-style applicability checks ([`Cookie::matches`]) with
//!   right-to-left domain-label comparison, path-prefix comparison, and the
//!   host-only and secure rules
//! - Request binding for emission ([`Cookie::prepare`])
//! - `Set-Cookie` serialization via [`Display`], including the
//!   `__Host-`/`__Secure-` name-prefix rule
//!
//! All relative time computation uses the cookie's reference timestamp,
//! taken from the wall clock by [`Cookie::new`] or supplied explicitly to
//! [`Cookie::new_at`].
//!
//! # Examples
//!
//! ```rust
//! use http_accord::{Cookie, Request};
//!
//! # fn main() -> http_accord::Result<()> {
//! let request = Request::get("https://example.com/account");
//! let cookie = Cookie::new("sid", "opaque")?.prepare(&request, None);
//!
//! assert!(cookie.matches(&request));
//! assert!(cookie.to_string().starts_with("__Secure-sid=opaque"));
//! # Ok(())
//! # }
//! ```
//!
//! [`Display`]: core::fmt::Display

use crate::{request::RequestView, HttpError, Result};
use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use chrono::{DateTime, NaiveDateTime};
use core::fmt;
use http::StatusCode;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Netscape cookie-date layout, full weekday name included.
const COOKIE_DATE: &str = "%A, %d-%b-%Y %H:%M:%S GMT";

/// Offset subtracted from the reference time to build the `Expires` date of
/// a deletion cookie: one year plus a 42 second skew margin.
const DELETED_OFFSET: i64 = 31_536_042;

/// Raw-url-encoding: everything but the RFC 3986 unreserved characters.
const RAW_URL_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A cookie name containing a disallowed character, or an empty name.
///
/// Raised at construction time; no partial cookie is produced.
#[derive(Debug)]
pub struct InvalidCookieName {
    name: String,
}

impl InvalidCookieName {
    /// Creates the error for the offending name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the offending name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for InvalidCookieName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cookie name `{}`", self.name.escape_debug())
    }
}

impl core::error::Error for InvalidCookieName {}

impl HttpError for InvalidCookieName {
    fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// An `Expires` attribute that could not be parsed as a date.
#[derive(Debug)]
pub struct InvalidExpires {
    value: String,
}

impl InvalidExpires {
    /// Creates the error for the offending attribute value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the offending attribute value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for InvalidExpires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cookie expires attribute `{}`", self.value)
    }
}

impl core::error::Error for InvalidExpires {}

impl HttpError for InvalidExpires {
    fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// A cookie with its attributes and client-matching metadata.
///
/// Cookies are immutable values: attribute setters consume and return the
/// cookie builder-style, and [`prepare`] derives a new instance rather than
/// mutating the receiver. An empty `value` is the deletion sentinel; an
/// expiry of zero means a session cookie that never expires.
///
/// `Secure` and `HttpOnly` default to on.
///
/// # Examples
///
/// ```rust
/// use http_accord::Cookie;
///
/// # fn main() -> http_accord::Result<()> {
/// let cookie = Cookie::new_at("prefs", "dark", 1_700_000_000)?
///     .with_domain("Example.COM")
///     .with_path("/account")
///     .with_expires(1_700_003_600);
///
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.lifetime(), Some(3600));
/// assert!(!cookie.is_expired());
/// # Ok(())
/// # }
/// ```
///
/// [`prepare`]: Cookie::prepare
#[derive(Debug, Clone, PartialEq)]
pub struct Cookie {
    name: String,
    value: String,
    expires: i64,
    domain: Option<String>,
    path: Option<String>,
    secure: bool,
    http_only: bool,
    host_only: bool,
    created: i64,
    last_access: i64,
    now: i64,
}

impl Cookie {
    /// Creates a cookie using the wall clock as the reference time.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidCookieName`] when the name is empty or contains
    /// one of `= , ;`, whitespace, or a control separator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::Cookie;
    ///
    /// assert!(Cookie::new("session", "opaque").is_ok());
    /// assert!(Cookie::new("bad=name", "value").is_err());
    /// ```
    #[cfg(feature = "std")]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Self::new_at(name, value, chrono::Utc::now().timestamp())
    }

    /// Creates a cookie with an explicit reference time (unix seconds).
    ///
    /// The reference time seeds the creation and last-access timestamps and
    /// anchors all relative computation ([`lifetime`], [`is_expired`], the
    /// deletion date in the serialized form).
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidCookieName`] for a name that is empty or carries
    /// a disallowed character.
    ///
    /// [`lifetime`]: Cookie::lifetime
    /// [`is_expired`]: Cookie::is_expired
    pub fn new_at(name: impl Into<String>, value: impl Into<String>, now: i64) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name.bytes().any(is_disallowed_name_byte) {
            return Err(InvalidCookieName::new(name).into());
        }
        Ok(Self {
            name,
            value: value.into(),
            expires: 0,
            domain: None,
            path: None,
            secure: true,
            http_only: true,
            host_only: false,
            created: now,
            last_access: now,
            now,
        })
    }

    /// Sets the absolute expiry timestamp (unix seconds).
    ///
    /// Zero means a session cookie that never expires.
    pub fn with_expires(mut self, at: i64) -> Self {
        self.expires = at;
        self
    }

    /// Sets the expiry from a date string.
    ///
    /// Accepts RFC 2822 dates and the Netscape cookie-date layout
    /// (`Tuesday, 31-Dec-2019 23:42:00 GMT`).
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidExpires`] when the string parses as neither.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::Cookie;
    ///
    /// # fn main() -> http_accord::Result<()> {
    /// let cookie = Cookie::new_at("id", "42", 0)?
    ///     .with_expires_header("Tuesday, 31-Dec-2019 23:42:00 GMT")?;
    /// assert_eq!(cookie.expires(), Some(1_577_835_720));
    ///
    /// assert!(Cookie::new_at("id", "42", 0)?.with_expires_header("soon").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_expires_header(self, value: &str) -> Result<Self> {
        match parse_cookie_date(value) {
            Some(at) => Ok(self.with_expires(at)),
            None => Err(InvalidExpires::new(value).into()),
        }
    }

    /// Sets the domain the cookie is valid for.
    ///
    /// Stored lower-cased with leading dots stripped.
    pub fn with_domain(mut self, domain: impl AsRef<str>) -> Self {
        self.domain = Some(normalize_domain(domain.as_ref()));
        self
    }

    /// Sets the path prefix the cookie is valid under.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets whether the cookie is restricted to secure transports.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Sets whether the cookie is reachable through the HTTP protocol only.
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Sets the host-only flag: an exact host match is then required, with
    /// no propagation from parent-domain cookies.
    pub fn with_host_only(mut self, host_only: bool) -> Self {
        self.host_only = host_only;
        self
    }

    /// Overrides the creation timestamp metadata.
    pub fn with_created(mut self, at: i64) -> Self {
        self.created = at;
        self
    }

    /// Overrides the last-access timestamp metadata.
    pub fn with_last_access(mut self, at: i64) -> Self {
        self.last_access = at;
        self
    }

    /// Returns the cookie name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cookie value. Empty means "delete".
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the domain attribute, if set.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Returns the path attribute, if set.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the absolute expiry timestamp, or `None` for session cookies.
    pub fn expires(&self) -> Option<i64> {
        (self.expires != 0).then_some(self.expires)
    }

    /// Returns the remaining life in seconds, measured from the reference
    /// time. `None` for session cookies.
    pub fn lifetime(&self) -> Option<i64> {
        (self.expires != 0).then(|| self.expires - self.now)
    }

    /// Returns whether the expiry date lies before the reference time.
    pub fn is_expired(&self) -> bool {
        self.expires != 0 && self.expires < self.now
    }

    /// Returns the secure flag.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Returns the HTTP-only flag.
    pub fn is_http_only(&self) -> bool {
        self.http_only
    }

    /// Returns the host-only flag.
    pub fn is_host_only(&self) -> bool {
        self.host_only
    }

    /// Returns the creation timestamp metadata.
    pub fn created(&self) -> i64 {
        self.created
    }

    /// Returns the last-access timestamp metadata.
    pub fn last_access(&self) -> i64 {
        self.last_access
    }

    /// Returns whether this cookie applies to the given request.
    ///
    /// False when the cookie is expired, when the domain or path does not
    /// match, or when a secure cookie meets an insecure request. The domain
    /// comparison runs label by label from the rightmost label inward; the
    /// cookie's domain must be equal to the host or a parent of it, and the
    /// host-only flag additionally rejects parent matches. The path check is
    /// an ASCII case-insensitive prefix comparison.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::{Cookie, Request};
    ///
    /// # fn main() -> http_accord::Result<()> {
    /// let cookie = Cookie::new_at("id", "42", 0)?.with_domain("example.com");
    ///
    /// assert!(cookie.matches(&Request::get("https://shop.example.com/")));
    /// assert!(!cookie.matches(&Request::get("https://example.org/")));
    /// # Ok(())
    /// # }
    /// ```
    pub fn matches<R: RequestView + ?Sized>(&self, req: &R) -> bool {
        if self.is_expired() {
            return false;
        }

        if let Some(domain) = &self.domain {
            // TODO punycode canonicalization of IDN hosts
            let domain: Vec<&str> = domain.split('.').rev().collect();
            let host = req.host();
            let host: Vec<&str> = host.split('.').rev().collect();

            if domain.len() > host.len() {
                return false;
            }
            for (cookie_label, host_label) in domain.iter().zip(&host) {
                if !cookie_label.eq_ignore_ascii_case(host_label) {
                    return false;
                }
            }

            // Host-only cookies require the exact host, not a parent domain.
            if self.host_only && domain.len() < host.len() {
                return false;
            }
        }

        if let Some(path) = &self.path {
            let target = req.target_path();
            let prefixed = target
                .get(..path.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(path));
            if !prefixed {
                return false;
            }
        }

        if self.secure && !req.is_secure() {
            return false;
        }

        true
    }

    /// Returns a new cookie bound to the given request, for emission.
    ///
    /// The derived cookie takes the request's host as its domain, the
    /// request's target path, the request's security flag, and the host-only
    /// flag; `HttpOnly` follows the request's server-origin determination.
    /// An explicit `expires` timestamp overrides the current one. The
    /// receiver is never mutated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::{Cookie, Request};
    ///
    /// # fn main() -> http_accord::Result<()> {
    /// let original = Cookie::new_at("id", "42", 0)?;
    /// let bound = original.prepare(&Request::get("https://example.com/cart"), None);
    ///
    /// assert_eq!(bound.domain(), Some("example.com"));
    /// assert_eq!(bound.path(), Some("/cart"));
    /// assert!(bound.is_host_only());
    /// assert!(!original.is_host_only());
    /// # Ok(())
    /// # }
    /// ```
    pub fn prepare<R: RequestView + ?Sized>(&self, req: &R, expires: Option<i64>) -> Self {
        let mut cookie = self.clone();
        cookie.domain = Some(normalize_domain(req.host()));
        cookie.path = Some(req.target_path().to_owned());
        cookie.secure = req.is_secure();
        cookie.http_only = req.is_server();
        cookie.host_only = true;

        if let Some(at) = expires {
            cookie.expires = at;
        }

        cookie
    }

    /// Returns the prefix applied to the serialized cookie name.
    ///
    /// `__Host-` for a secure cookie scoped to `/` with no domain,
    /// `__Secure-` for any other secure cookie, empty otherwise.
    pub fn prefix(&self) -> &'static str {
        if self.secure {
            if self.path.as_deref() == Some("/") && self.domain.is_none() {
                "__Host-"
            } else {
                "__Secure-"
            }
        } else {
            ""
        }
    }
}

impl fmt::Display for Cookie {
    /// Formats the cookie as the value of a `Set-Cookie` header.
    ///
    /// An empty value serializes as `deleted` with a past `Expires` date and
    /// `Max-Age=0`; otherwise the value is percent-encoded and a non-zero
    /// expiry is rendered. `Path`, `Domain`, `Secure`, and `HttpOnly` follow
    /// in that order when applicable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}=",
            self.prefix(),
            utf8_percent_encode(&self.name, RAW_URL_ENCODE)
        )?;

        if self.value.is_empty() {
            f.write_str("deleted; Expires=")?;
            write_cookie_date(f, self.now - DELETED_OFFSET)?;
            f.write_str("; Max-Age=0")?;
        } else {
            write!(f, "{}", utf8_percent_encode(&self.value, RAW_URL_ENCODE))?;
            if self.expires != 0 {
                f.write_str("; Expires=")?;
                write_cookie_date(f, self.expires)?;
            }
        }

        if let Some(path) = &self.path {
            write!(f, "; Path={path}")?;
        }
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={domain}")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }

        Ok(())
    }
}

fn is_disallowed_name_byte(byte: u8) -> bool {
    matches!(
        byte,
        b'=' | b',' | b';' | b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c
    )
}

fn normalize_domain(domain: &str) -> String {
    domain.trim_start_matches('.').to_ascii_lowercase()
}

fn write_cookie_date(f: &mut fmt::Formatter<'_>, timestamp: i64) -> fmt::Result {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(date) => write!(f, "{}", date.format(COOKIE_DATE)),
        // Out-of-range timestamps cannot occur from header input; render the
        // epoch rather than fail the formatter.
        None => f.write_str("Thursday, 01-Jan-1970 00:00:00 GMT"),
    }
}

fn parse_cookie_date(value: &str) -> Option<i64> {
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.timestamp());
    }
    NaiveDateTime::parse_from_str(value, COOKIE_DATE)
        .ok()
        .map(|naive| naive.and_utc().timestamp())
}
