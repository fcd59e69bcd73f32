//! HTTP response implementation.
//!
//! This module provides the [`Response`] type: status, version, and headers,
//! plus the `Set-Cookie` emission path. There is no body; payloads live
//! outside this crate.
//!
//! # Examples
//!
//! ## Basic response creation
//!
//! ```rust
//! use http_accord::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::CREATED)
//!     .header(http::header::LOCATION, "/api/users/123");
//!
//! assert_eq!(response.status(), StatusCode::CREATED);
//! ```
//!
//! ## Emitting cookies
//!
//! ```rust
//! use http_accord::{Cookie, Response};
//!
//! # fn main() -> http_accord::Result<()> {
//! let session = Cookie::new("sid", "opaque")?;
//! let response = Response::empty().cookie(&session)?;
//!
//! assert_eq!(response.cookies().iter().count(), 1);
//! # Ok(())
//! # }
//! ```

use crate::{Cookie, Result, ResultExt};
use alloc::string::ToString;
use core::fmt::Debug;
use http::{
    header::{self, GetAll, HeaderName},
    HeaderMap, HeaderValue, StatusCode, Version,
};

type ResponseParts = http::response::Parts;

/// An HTTP response with status, version, and headers.
///
/// Builder-style methods consume and return the response, so construction
/// chains; `Set-Cookie` values are appended, never replaced, letting one
/// response carry several cookies.
///
/// # Examples
///
/// ```rust
/// use http_accord::{Response, StatusCode};
///
/// let response = Response::new(404)
///     .header(http::header::CONTENT_TYPE, "text/plain");
/// assert_eq!(response.status(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug)]
pub struct Response {
    parts: ResponseParts,
}

impl From<ResponseParts> for Response {
    fn from(parts: ResponseParts) -> Self {
        Self { parts }
    }
}

impl<B> From<http::Response<B>> for Response {
    fn from(response: http::Response<B>) -> Self {
        let (parts, _) = response.into_parts();
        parts.into()
    }
}

impl Response {
    /// Creates a new HTTP response with the specified status code.
    ///
    /// # Panics
    ///
    /// Panics if `status` does not convert into a valid [`StatusCode`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::NO_CONTENT);
    /// assert_eq!(response.status(), StatusCode::NO_CONTENT);
    /// ```
    pub fn new<S>(status: S) -> Self
    where
        S: TryInto<StatusCode>,
        S::Error: Debug,
    {
        let mut response: Self = http::Response::new(()).into();
        response.parts.status = status.try_into().unwrap();
        response
    }

    /// Creates a response with status 200 OK.
    pub fn empty() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Returns the HTTP status code of this response.
    pub const fn status(&self) -> StatusCode {
        self.parts.status
    }

    /// Returns a mutable reference to the HTTP status code.
    pub fn status_mut(&mut self) -> &mut StatusCode {
        &mut self.parts.status
    }

    /// Returns the HTTP version for this response.
    pub const fn version(&self) -> Version {
        self.parts.version
    }

    /// Returns a reference to the HTTP headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Returns a mutable reference to the HTTP headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.parts.headers
    }

    /// Returns the first value for the given header name.
    pub fn get_header(&self, name: HeaderName) -> Option<&HeaderValue> {
        self.headers().get(name)
    }

    /// Returns an iterator over all values for a header name.
    pub fn get_headers(&self, name: HeaderName) -> GetAll<'_, HeaderValue> {
        self.headers().get_all(name)
    }

    /// Appends a header value without removing existing values.
    pub fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().append(name, value);
    }

    /// Inserts a header value, replacing any existing values.
    ///
    /// Returns the previous header value if one existed.
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) -> Option<HeaderValue> {
        self.headers_mut().insert(name, value)
    }

    /// Sets an HTTP header and returns the modified response.
    ///
    /// This is a builder-style method that allows method chaining. If you
    /// need to modify an existing response, use [`insert_header`] instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::Response;
    ///
    /// let response = Response::empty()
    ///     .header(http::header::CONTENT_TYPE, "application/json")
    ///     .header(http::header::SERVER, "http-accord/0.1");
    /// ```
    ///
    /// [`insert_header`]: Response::insert_header
    pub fn header<V>(mut self, name: HeaderName, value: V) -> Self
    where
        V: TryInto<HeaderValue>,
        V::Error: Debug,
    {
        self.insert_header(name, value.try_into().unwrap());
        self
    }

    /// Appends a `Set-Cookie` header for the given cookie.
    ///
    /// The cookie is serialized through its [`Display`] implementation, so
    /// the name prefix, percent-encoding, and attribute order all apply.
    /// Existing `Set-Cookie` values are kept.
    ///
    /// # Errors
    ///
    /// Fails with a `500` status when the serialized cookie is not a valid
    /// header value, which only happens for attribute content outside the
    /// visible ASCII range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::{Cookie, Response};
    ///
    /// # fn main() -> http_accord::Result<()> {
    /// let response = Response::empty()
    ///     .cookie(&Cookie::new("sid", "opaque")?)?
    ///     .cookie(&Cookie::new("theme", "dark")?)?;
    ///
    /// assert_eq!(response.cookies().iter().count(), 2);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// [`Display`]: core::fmt::Display
    pub fn cookie(mut self, cookie: &Cookie) -> Result<Self> {
        let value = HeaderValue::try_from(cookie.to_string())
            .status(StatusCode::INTERNAL_SERVER_ERROR)?;
        self.append_header(header::SET_COOKIE, value);
        Ok(self)
    }

    /// Returns all `Set-Cookie` values on this response.
    pub fn cookies(&self) -> GetAll<'_, HeaderValue> {
        self.get_headers(header::SET_COOKIE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn cookie_appends_set_cookie_values() {
        let session = Cookie::new_at("sid", "opaque", 0)
            .unwrap()
            .with_http_only(false);
        let theme = Cookie::new_at("theme", "dark", 0)
            .unwrap()
            .with_secure(false)
            .with_http_only(false);

        let response = Response::empty()
            .cookie(&session)
            .unwrap()
            .cookie(&theme)
            .unwrap();

        let cookies: Vec<_> = response.cookies().iter().collect();
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0], "__Secure-sid=opaque; Secure");
        assert_eq!(cookies[1], "theme=dark");
    }

    #[test]
    fn header_insertion_replaces_while_append_keeps() {
        let mut response = Response::new(StatusCode::OK);
        response.insert_header(header::SERVER, HeaderValue::from_static("a"));
        response.insert_header(header::SERVER, HeaderValue::from_static("b"));
        assert_eq!(response.get_headers(header::SERVER).iter().count(), 1);

        response.append_header(header::SERVER, HeaderValue::from_static("c"));
        assert_eq!(response.get_headers(header::SERVER).iter().count(), 2);
    }
}
