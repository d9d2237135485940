//! Serializer context.
//!
//! Everything a build call needs from its surroundings: how to reverse
//! routes, the current request (if any), and the settings in effect.

use std::fmt;

use django_hal_core::Settings;
use django_hal_http::{HttpRequest, UrlReverser};

/// The per-call context passed to every serializer.
///
/// # Examples
///
/// ```
/// use django_hal_core::Settings;
/// use django_hal_http::urls::resolver::root;
/// use django_hal_http::HttpRequest;
/// use django_hal_serializers::SerializerContext;
///
/// let urls = root(vec![]).unwrap();
/// let settings = Settings::default();
/// let request = HttpRequest::builder().query_string("page=2").build();
///
/// let ctx = SerializerContext::new(&urls, &settings).with_request(&request);
/// assert_eq!(ctx.query_string(), Some("page=2"));
/// ```
#[derive(Clone, Copy)]
pub struct SerializerContext<'a> {
    /// The current request, used for absolute URLs and query pass-through.
    pub request: Option<&'a HttpRequest>,
    /// Reverses route names into paths.
    pub reverser: &'a dyn UrlReverser,
    /// The settings in effect for this call.
    pub settings: &'a Settings,
}

impl fmt::Debug for SerializerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerContext")
            .field("request", &self.request)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<'a> SerializerContext<'a> {
    /// Creates a context without a request; links will be path-only.
    pub fn new(reverser: &'a dyn UrlReverser, settings: &'a Settings) -> Self {
        Self {
            request: None,
            reverser,
            settings,
        }
    }

    /// Attaches the current request, keeping one that is already set.
    #[must_use]
    pub fn with_request(mut self, request: &'a HttpRequest) -> Self {
        if self.request.is_none() {
            self.request = Some(request);
        }
        self
    }

    /// Returns the request's raw query string, if there is a non-empty one.
    pub fn query_string(&self) -> Option<&'a str> {
        self.request
            .map(HttpRequest::query_string)
            .filter(|qs| !qs.is_empty())
    }
}
