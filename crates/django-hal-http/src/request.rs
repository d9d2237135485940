//! Request context.
//!
//! [`HttpRequest`] carries the parts of Django's `django.http.HttpRequest` that
//! link building needs: the scheme and host for absolute URLs, and the query
//! string that list self links pass through.

/// A request-like context, modeled after Django's `HttpRequest`.
///
/// # Examples
///
/// ```
/// use django_hal_http::HttpRequest;
///
/// let request = HttpRequest::builder()
///     .query_string("page=2")
///     .host("api.example.com")
///     .build();
///
/// assert_eq!(request.query_string(), "page=2");
/// assert_eq!(
///     request.build_absolute_uri("/users/42/", "localhost"),
///     "http://api.example.com/users/42/"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HttpRequest {
    query_string: String,
    host: Option<String>,
    scheme: String,
}

impl HttpRequest {
    /// Creates a new [`HttpRequestBuilder`] for constructing an `HttpRequest`.
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    /// Returns the raw query string (without leading `?`).
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Returns the URL scheme (`"http"` or `"https"`).
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the `Host` the request was made to, if it carries one.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().filter(|h| !h.is_empty())
    }

    /// Builds an absolute URI for `location` on this request's scheme and host.
    ///
    /// `fallback_host` is used when the request carries no host. A `location`
    /// that is already absolute (`http://` or `https://`) is returned as-is.
    pub fn build_absolute_uri(&self, location: &str, fallback_host: &str) -> String {
        if location.starts_with("http://") || location.starts_with("https://") {
            return location.to_string();
        }
        let scheme = &self.scheme;
        let host = self.host().unwrap_or(fallback_host);
        if location.starts_with('/') {
            format!("{scheme}://{host}{location}")
        } else {
            format!("{scheme}://{host}/{location}")
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug, Clone)]
pub struct HttpRequestBuilder {
    query_string: String,
    host: Option<String>,
    scheme: String,
}

impl Default for HttpRequestBuilder {
    fn default() -> Self {
        Self {
            query_string: String::new(),
            host: None,
            scheme: "http".to_string(),
        }
    }
}

impl HttpRequestBuilder {
    /// Sets the query string (a leading `?` is stripped).
    #[must_use]
    pub fn query_string(mut self, qs: &str) -> Self {
        self.query_string = qs.trim_start_matches('?').to_string();
        self
    }

    /// Sets the host.
    #[must_use]
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// Sets the scheme (http or https).
    #[must_use]
    pub fn scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    /// Builds the [`HttpRequest`].
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            query_string: self.query_string,
            host: self.host,
            scheme: self.scheme,
        }
    }
}
