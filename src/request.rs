//! HTTP request implementation.
//!
//! This module provides the [`Request`] value object together with the
//! [`RequestView`] capability trait the cookie core consumes and the
//! [`ServerRequest`] wrapper for server-origin requests. A request here is a
//! header-focused, effectively immutable structure: it carries method, URI,
//! version, and headers, and memoizes its parsed `Accept*` headers so each
//! is tokenized and quality-sorted at most once per request instance.
//!
//! # Examples
//!
//! ## Creating requests
//!
//! ```rust
//! use http_accord::Request;
//!
//! let request = Request::get("https://api.example.com/users")
//!     .header(http::header::ACCEPT, "application/json")
//!     .header(http::header::USER_AGENT, "http-accord/0.1");
//!
//! assert_eq!(request.host(), "api.example.com");
//! assert_eq!(request.target_path(), "/users");
//! assert!(request.is_secure());
//! ```
//!
//! ## Negotiating against the parsed headers
//!
//! ```rust
//! use http_accord::Request;
//!
//! # fn main() -> http_accord::Result<()> {
//! let request = Request::get("/")
//!     .header(http::header::ACCEPT, "text/html, application/xhtml+xml; q=0.9");
//!
//! assert_eq!(request.accept_media_type()[0].value(), "text/html");
//! assert_eq!(request.accept().media_type(&["application/xhtml+xml"])?,
//!            Some("application/xhtml+xml"));
//! # Ok(())
//! # }
//! ```

use crate::accept::{self, Accept, Entry};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::OnceCell;
use core::fmt::Debug;
use core::ops::Deref;
use http::{
    header::{self, GetAll, HeaderName},
    HeaderMap, HeaderValue, Method, Uri, Version,
};

type RequestParts = http::request::Parts;

/// The minimal request capability the cookie core consumes.
///
/// [`Cookie::matches`] and [`Cookie::prepare`] only need to know the
/// request's host, target path, security, and whether it originated on the
/// server side; any type exposing those can drive them.
///
/// [`Cookie::matches`]: crate::Cookie::matches
/// [`Cookie::prepare`]: crate::Cookie::prepare
pub trait RequestView {
    /// Returns the request's host, or an empty string when unknown.
    fn host(&self) -> &str;

    /// Returns the request's target path, defaulting to `/`.
    fn target_path(&self) -> &str;

    /// Returns whether the request travels over a secure transport.
    fn is_secure(&self) -> bool;

    /// Returns whether this is a server-origin request.
    ///
    /// Drives the `HttpOnly` determination in [`Cookie::prepare`].
    ///
    /// [`Cookie::prepare`]: crate::Cookie::prepare
    fn is_server(&self) -> bool {
        false
    }
}

/// An immutable HTTP request with headers and metadata.
///
/// `Request` wraps the `http` crate's request parts and adds the pieces the
/// negotiation and cookie cores need: host/path/security accessors and
/// memoized `Accept*` parses. There is no body: transport and payload
/// handling live outside this crate.
///
/// The `Accept*` caches make `Request` a single-thread value (`!Sync`);
/// treat it as owned by the task handling it, which is also what makes the
/// at-most-once parse per header sound. Header edits after the first
/// negotiation query are not observed by the caches.
///
/// # Examples
///
/// ```rust
/// use http_accord::Request;
/// use http::Method;
///
/// let request = Request::new(Method::PATCH, "/api/users/123");
/// assert_eq!(request.method(), &Method::PATCH);
/// assert_eq!(request.target_path(), "/api/users/123");
/// ```
#[derive(Debug)]
pub struct Request {
    parts: RequestParts,
    accept: AcceptCache,
}

#[derive(Debug, Default)]
struct AcceptCache {
    media_type: OnceCell<Vec<Entry>>,
    charset: OnceCell<Vec<Entry>>,
    encoding: OnceCell<Vec<Entry>>,
    language: OnceCell<Vec<Entry>>,
}

impl From<RequestParts> for Request {
    fn from(parts: RequestParts) -> Self {
        Self {
            parts,
            accept: AcceptCache::default(),
        }
    }
}

impl<B> From<http::Request<B>> for Request {
    fn from(request: http::Request<B>) -> Self {
        let (parts, _) = request.into_parts();
        parts.into()
    }
}

impl Request {
    /// Creates a new HTTP request with the specified method and URI.
    ///
    /// # Panics
    ///
    /// Panics if the URI cannot be parsed into a valid [`Uri`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::Request;
    /// use http::Method;
    ///
    /// let request = Request::new(Method::PUT, "/api/users/123");
    /// assert_eq!(request.method(), &Method::PUT);
    /// ```
    pub fn new<U>(method: Method, uri: U) -> Self
    where
        U: TryInto<Uri>,
        U::Error: Debug,
    {
        http::Request::builder()
            .method(method)
            .uri(uri.try_into().unwrap())
            .body(())
            .unwrap()
            .into()
    }

    /// Creates a new GET request with the specified URI.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::Request;
    ///
    /// let request = Request::get("/api/users");
    /// assert_eq!(request.method(), &http::Method::GET);
    /// ```
    pub fn get<U>(uri: U) -> Self
    where
        U: TryInto<Uri>,
        U::Error: Debug,
    {
        Self::new(Method::GET, uri)
    }

    /// Creates a new POST request with the specified URI.
    pub fn post<U>(uri: U) -> Self
    where
        U: TryInto<Uri>,
        U::Error: Debug,
    {
        Self::new(Method::POST, uri)
    }

    /// Creates a new PUT request with the specified URI.
    pub fn put<U>(uri: U) -> Self
    where
        U: TryInto<Uri>,
        U::Error: Debug,
    {
        Self::new(Method::PUT, uri)
    }

    /// Creates a new DELETE request with the specified URI.
    pub fn delete<U>(uri: U) -> Self
    where
        U: TryInto<Uri>,
        U::Error: Debug,
    {
        Self::new(Method::DELETE, uri)
    }

    /// Returns a reference to the HTTP method.
    pub const fn method(&self) -> &Method {
        &self.parts.method
    }

    /// Returns a reference to the request URI.
    pub const fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    /// Returns the HTTP version for this request.
    pub const fn version(&self) -> Version {
        self.parts.version
    }

    /// Returns a reference to the HTTP headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Returns a mutable reference to the HTTP headers.
    ///
    /// Intended for construction time; the `Accept*` caches snapshot the
    /// headers on first use.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.parts.headers
    }

    /// Sets an HTTP header and returns the modified request.
    ///
    /// This is a builder-style method that allows method chaining. If you
    /// need to modify an existing request, use [`insert_header`] instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::Request;
    ///
    /// let request = Request::get("/api/users")
    ///     .header(http::header::ACCEPT, "application/json");
    /// assert!(request.headers().contains_key(http::header::ACCEPT));
    /// ```
    ///
    /// [`insert_header`]: Request::insert_header
    pub fn header<V>(mut self, name: HeaderName, value: V) -> Self
    where
        V: TryInto<HeaderValue>,
        V::Error: Debug,
    {
        self.insert_header(name, value.try_into().unwrap());
        self
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

    /// Returns the request's host.
    ///
    /// Taken from the URI authority, falling back to the `Host` header;
    /// empty when neither is present.
    pub fn host(&self) -> &str {
        if let Some(host) = self.parts.uri.host() {
            return host;
        }
        self.parts
            .headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
    }

    /// Returns the request's target path, defaulting to `/`.
    pub fn target_path(&self) -> &str {
        let path = self.parts.uri.path();
        if path.is_empty() {
            "/"
        } else {
            path
        }
    }

    /// Returns whether the request URI uses a secure scheme.
    pub fn is_secure(&self) -> bool {
        self.parts.uri.scheme_str() == Some("https")
    }

    /// Returns the parsed `Accept` header, sorted by quality.
    ///
    /// Multiple physical headers are joined with `,` before parsing, and
    /// the parse is memoized: repeated calls return the same entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::Request;
    ///
    /// let request = Request::get("/")
    ///     .header(http::header::ACCEPT, "text/plain; q=0.5, application/json");
    ///
    /// let entries = request.accept_media_type();
    /// assert_eq!(entries[0].value(), "application/json");
    /// ```
    pub fn accept_media_type(&self) -> &[Entry] {
        self.accept
            .media_type
            .get_or_init(|| accept::parse(&self.joined_header(header::ACCEPT)))
    }

    /// Returns the parsed `Accept-Charset` header, sorted by quality.
    pub fn accept_charset(&self) -> &[Entry] {
        self.accept
            .charset
            .get_or_init(|| accept::parse(&self.joined_header(header::ACCEPT_CHARSET)))
    }

    /// Returns the parsed `Accept-Encoding` header, sorted by quality.
    pub fn accept_encoding(&self) -> &[Entry] {
        self.accept
            .encoding
            .get_or_init(|| accept::parse(&self.joined_header(header::ACCEPT_ENCODING)))
    }

    /// Returns the parsed `Accept-Language` header, sorted by quality, with
    /// legacy `i-` grandfathered tags normalized to their lookup keys.
    pub fn accept_language(&self) -> &[Entry] {
        self.accept
            .language
            .get_or_init(|| accept::parse_language(&self.joined_header(header::ACCEPT_LANGUAGE)))
    }

    /// Returns the content-negotiation view over this request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::Request;
    ///
    /// # fn main() -> http_accord::Result<()> {
    /// let request = Request::get("/").header(http::header::ACCEPT_CHARSET, "utf-8");
    /// assert_eq!(request.accept().charset(&["UTF-8"])?, Some("UTF-8"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn accept(&self) -> Accept<'_> {
        Accept::new(self)
    }

    fn joined_header(&self, name: HeaderName) -> String {
        let mut joined = String::new();
        for value in self.parts.headers.get_all(name) {
            if let Ok(value) = value.to_str() {
                if !joined.is_empty() {
                    joined.push(',');
                }
                joined.push_str(value);
            }
        }
        joined
    }
}

impl RequestView for Request {
    fn host(&self) -> &str {
        Request::host(self)
    }

    fn target_path(&self) -> &str {
        Request::target_path(self)
    }

    fn is_secure(&self) -> bool {
        Request::is_secure(self)
    }
}

/// A server-origin HTTP request.
///
/// Wraps a [`Request`] and marks it as received by the server rather than
/// built for a client. Cookies prepared against a `ServerRequest` come out
/// `HttpOnly`. The transport security flag can be overridden for setups
/// where TLS terminates in front of the application.
///
/// # Examples
///
/// ```rust
/// use http_accord::{Request, ServerRequest, RequestView};
///
/// let request = ServerRequest::new(Request::get("http://example.com/"))
///     .with_secure(true);
///
/// assert!(request.is_server());
/// assert!(RequestView::is_secure(&request));
/// ```
#[derive(Debug)]
pub struct ServerRequest {
    request: Request,
    secure: bool,
}

impl ServerRequest {
    /// Wraps a request, taking the security flag from its URI scheme.
    pub fn new(request: Request) -> Self {
        let secure = request.is_secure();
        Self { request, secure }
    }

    /// Overrides the transport security flag.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Returns the wrapped request.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Unwraps back into the inner request.
    pub fn into_request(self) -> Request {
        self.request
    }
}

impl From<Request> for ServerRequest {
    fn from(request: Request) -> Self {
        Self::new(request)
    }
}

impl Deref for ServerRequest {
    type Target = Request;

    fn deref(&self) -> &Self::Target {
        &self.request
    }
}

impl RequestView for ServerRequest {
    fn host(&self) -> &str {
        self.request.host()
    }

    fn target_path(&self) -> &str {
        self.request.target_path()
    }

    fn is_secure(&self) -> bool {
        self.secure
    }

    fn is_server(&self) -> bool {
        true
    }
}
