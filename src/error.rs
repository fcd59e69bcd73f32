//! Error types and utilities.
//!
//! This module provides the core error handling infrastructure. The main types are:
//!
//! - [`Error`] - The main error type used throughout the crate
//! - [`Result`] - A specialized Result type alias
//! - [`ResultExt`] - Extension trait that adds HTTP status code handling
//!
//! Failures in this crate are immediate, synchronous, and local to the call:
//! there is no I/O and no partial state. Anything that is normal control flow
//! (no match found, empty input lists, absent headers) is expressed as
//! `Ok(None)` or an empty collection, never as an error. The error types that
//! do exist ([`accept::InvalidMediaType`], [`cookie::InvalidCookieName`],
//! [`cookie::InvalidExpires`]) signal caller or header misuse and carry the
//! HTTP status code an application would answer with.
//!
//! [`accept::InvalidMediaType`]: crate::accept::InvalidMediaType
//! [`cookie::InvalidCookieName`]: crate::cookie::InvalidCookieName
//! [`cookie::InvalidExpires`]: crate::cookie::InvalidExpires
//!
//! # Examples
//!
//! ```rust
//! use http_accord::{Error, ResultExt};
//! use http::StatusCode;
//!
//! let result: http_accord::Result<&str> = None.status(StatusCode::BAD_REQUEST);
//! assert_eq!(result.unwrap_err().status(), StatusCode::BAD_REQUEST);
//! ```
use alloc::boxed::Box;
use core::{
    fmt::{self, Debug},
    ops::{Deref, DerefMut},
};
use http::StatusCode;

/// The main error type for this crate.
///
/// Wraps any error with an associated HTTP status code, providing both the
/// underlying error information and the status an application would respond
/// with.
///
/// # Examples
///
/// ```rust
/// use http_accord::Error;
/// use http::StatusCode;
/// use std::io;
///
/// let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
/// let err = Error::new(io_err, StatusCode::NOT_FOUND);
/// assert_eq!(err.status(), StatusCode::NOT_FOUND);
/// ```
pub struct Error {
    error: Box<dyn HttpError>,
}

/// Trait for errors that have an associated HTTP status code.
///
/// Only types implementing this trait can be directly converted into
/// [`Error`] via the `From` implementation. When working with generic
/// [`core::error::Error`] values, prefer the [`ResultExt::status`] helper to
/// attach a status code before returning an [`Error`].
pub trait HttpError: core::error::Error + Send + Sync + 'static {
    /// Returns the associated HTTP status code.
    fn status(&self) -> StatusCode;
}

#[derive(Debug)]
struct WithStatus<E: core::error::Error + Send + Sync + 'static> {
    status: StatusCode,
    error: Box<E>,
}

impl<E> fmt::Display for WithStatus<E>
where
    E: fmt::Display + core::error::Error + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<E> core::error::Error for WithStatus<E>
where
    E: core::error::Error + Send + Sync + 'static,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.error.source()
    }
}

impl<E> HttpError for WithStatus<E>
where
    E: core::error::Error + Send + Sync + 'static,
{
    fn status(&self) -> StatusCode {
        self.status
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    fn from_http_error<E>(error: E) -> Self
    where
        E: HttpError,
    {
        Self {
            error: Box::new(error),
        }
    }

    /// Creates a new `Error` from any error type with the given HTTP status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code is invalid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::Error;
    /// use http::StatusCode;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    /// let http_err = Error::new(io_err, StatusCode::NOT_FOUND);
    /// ```
    pub fn new<E, S>(error: E, status: S) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
        S: TryInto<StatusCode>,
        S::Error: Debug,
    {
        let status = status.try_into().expect("Invalid status code");
        Self::from_http_error(WithStatus {
            status,
            error: Box::new(error),
        })
    }

    /// Returns the HTTP status code associated with this error.
    pub fn status(&self) -> StatusCode {
        self.error.status()
    }

    /// Attempts to downcast the inner error to a reference of the concrete type.
    ///
    /// Returns `Some(&E)` if the downcast succeeds, or `None` if it fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use http_accord::{accept, Error};
    ///
    /// let err: Error = accept::InvalidMediaType::new("json").into();
    /// assert!(err.downcast_ref::<accept::InvalidMediaType>().is_some());
    /// ```
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        let error: &(dyn core::error::Error + Send + Sync + 'static) = &*self.error;
        error.downcast_ref()
    }

    /// Consumes this error and returns the inner [`HttpError`] trait object.
    pub fn into_inner(self) -> Box<dyn HttpError> {
        self.error
    }
}

impl<E> From<E> for Error
where
    E: HttpError,
{
    fn from(error: E) -> Self {
        Self {
            error: Box::new(error),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.error, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl Deref for Error {
    type Target = dyn HttpError;

    fn deref(&self) -> &Self::Target {
        self.error.as_ref()
    }
}

impl DerefMut for Error {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.error.as_mut()
    }
}

impl AsRef<dyn HttpError> for Error {
    fn as_ref(&self) -> &dyn HttpError {
        self.deref()
    }
}

impl AsMut<dyn HttpError> for Error {
    fn as_mut(&mut self) -> &mut dyn HttpError {
        self.deref_mut()
    }
}

/// Extension trait that adds HTTP status code handling to `Result` and
/// `Option` types.
///
/// # Examples
///
/// ```rust
/// use http_accord::{Result, ResultExt};
/// use http::StatusCode;
///
/// fn pick(values: &[u32]) -> Result<u32> {
///     values.first().copied().status(StatusCode::NOT_FOUND)
/// }
/// ```
pub trait ResultExt<T>
where
    Self: Sized,
{
    /// Associates an HTTP status code with an error or `None` value.
    ///
    /// For `Result` types, this wraps any error with the specified status
    /// code. For `Option` types, this converts `None` to an error with the
    /// specified status code.
    fn status<S>(self, status: S) -> Result<T>
    where
        S: TryInto<StatusCode>,
        S::Error: fmt::Debug;
}

impl<T, E> ResultExt<T> for core::result::Result<T, E>
where
    E: core::error::Error + Send + Sync + 'static,
{
    fn status<S>(self, status: S) -> Result<T>
    where
        S: TryInto<StatusCode>,
        S::Error: fmt::Debug,
    {
        self.map_err(|error| Error::new(error, status))
    }
}

#[derive(Debug)]
struct NoneError;

impl fmt::Display for NoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("value was None")
    }
}

impl core::error::Error for NoneError {}

impl<T> ResultExt<T> for Option<T> {
    fn status<S>(self, status: S) -> Result<T>
    where
        S: TryInto<StatusCode>,
        S::Error: fmt::Debug,
    {
        let status = status.try_into().expect("Invalid status code");
        self.ok_or_else(|| Error::new(NoneError, status))
    }
}
