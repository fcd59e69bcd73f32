#![deny(unsafe_code)]
#![no_std]
#![warn(missing_docs, missing_debug_implementations)]
//! Immutable HTTP message types with content negotiation and cookie matching.
//!
//! This crate sits beneath a web application and normalizes raw transport
//! input into well-typed, immutable structures. It provides:
//!
//! - **Request/Response value objects** - thin, header-focused wrappers over
//!   the `http` crate's types, with no body or transport concerns
//! - **Content negotiation** - an `Accept*` header parser with quality
//!   sorting plus matchers for media types, charsets, encodings, and
//!   languages, in best-match and all-matches modes
//! - **A Cookie model** - client-style domain/path/security matching,
//!   request binding for emission, and `Set-Cookie` serialization with the
//!   `__Host-`/`__Secure-` name-prefix rule
//!
//! Everything in this crate is pure and synchronous: parsing and matching
//! operate on in-memory strings, and the only state is the per-request
//! memoization of parsed `Accept*` headers.
//!
//! # Optional Features
//!
//! - `std` - Enables wall-clock based [`Cookie`] construction (enabled by
//!   default); without it, supply reference timestamps explicitly via
//!   [`Cookie::new_at`]
//!
//! # Examples
//!
//! ## Content negotiation
//!
//! ```rust
//! use http_accord::Request;
//!
//! # fn main() -> http_accord::Result<()> {
//! let request = Request::get("https://example.com/data")
//!     .header(http::header::ACCEPT, "text/html; q=0.8, application/json");
//!
//! let accept = request.accept();
//! let best = accept.media_type(&["text/html", "application/json"])?;
//! assert_eq!(best, Some("application/json"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Cookie matching and emission
//!
//! ```rust
//! use http_accord::{Cookie, Request, Response, StatusCode};
//!
//! # fn main() -> http_accord::Result<()> {
//! let request = Request::get("https://shop.example.com/cart");
//! let cookie = Cookie::new("session", "opaque")?.prepare(&request, None);
//! assert!(cookie.matches(&request));
//!
//! let response = Response::new(StatusCode::OK).cookie(&cookie)?;
//! assert!(response.headers().contains_key(http::header::SET_COOKIE));
//! # Ok(())
//! # }
//! ```
//!
extern crate alloc;

pub mod error;
pub use error::{Error, HttpError, Result, ResultExt};

pub mod accept;
#[doc(inline)]
pub use accept::Accept;

pub mod cookie;
#[doc(inline)]
pub use cookie::Cookie;

pub mod request;
#[doc(inline)]
pub use request::{Request, RequestView, ServerRequest};

pub mod response;
#[doc(inline)]
pub use response::Response;

pub use http::{header, method, uri, version, Method, StatusCode, Uri, Version};
