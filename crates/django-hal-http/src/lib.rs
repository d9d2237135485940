//! # django-hal-http
//!
//! The URL side of django-hal: a request context carrying scheme, host, and
//! query string, and Django-style named routes that can be reversed into
//! paths or absolute URLs.
//!
//! - [`request`]: [`HttpRequest`], the request-like context used for absolute URLs
//! - [`urls`]: route patterns, converters, resolver tree, and `reverse`

pub mod request;
pub mod urls;

pub use request::HttpRequest;
pub use urls::reverse::{reverse, reverse_with_request, UrlReverser};
