//! Reverse URL resolution.
//!
//! This module provides the [`reverse`] function for generating URLs from
//! named routes, mirroring Django's `django.urls.reverse()`, and the
//! [`UrlReverser`] seam the serializers resolve links through.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use django_hal_core::{HalError, HalResult, Settings};

use super::resolver::URLResolver;
use crate::request::HttpRequest;

/// Generates a URL path for a named route from keyword arguments.
///
/// Candidates are the routes whose qualified name equals `viewname`, tried in
/// declaration order. A candidate matches when the keyword names are exactly
/// its parameter names and every value passes the parameter's converter. The
/// returned path always starts with `/`.
///
/// # Errors
///
/// Returns [`HalError::NoReverseMatch`] if no candidate matches.
///
/// # Examples
///
/// ```
/// use django_hal_http::urls::pattern::path;
/// use django_hal_http::urls::resolver::root;
/// use django_hal_http::urls::reverse::reverse;
/// use std::collections::HashMap;
///
/// let resolver = root(vec![
///     path("users/<int:pk>/", Some("user-detail")).unwrap().into(),
/// ])
/// .unwrap();
///
/// let kwargs = HashMap::from([("pk".to_string(), "42".to_string())]);
/// assert_eq!(reverse("user-detail", &kwargs, &resolver).unwrap(), "/users/42/");
/// ```
pub fn reverse<S: BuildHasher>(
    viewname: &str,
    kwargs: &HashMap<String, String, S>,
    urlconf: &URLResolver,
) -> HalResult<String> {
    let url = urlconf
        .named_routes()
        .iter()
        .filter(|route| route.qualified_name == viewname)
        .find_map(|route| route.pattern.substitute(kwargs))
        .ok_or_else(|| {
            tracing::debug!(viewname, "no route matched for reverse");
            no_reverse_match(viewname, kwargs)
        })?;

    if url.starts_with('/') {
        Ok(url)
    } else {
        Ok(format!("/{url}"))
    }
}

fn no_reverse_match<S: BuildHasher>(viewname: &str, kwargs: &HashMap<String, String, S>) -> HalError {
    let sorted: BTreeMap<&str, &str> = kwargs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    HalError::NoReverseMatch(format!(
        "Reverse for '{viewname}' with keyword arguments '{sorted:?}' not found"
    ))
}

/// Anything that can turn a route name and keyword arguments into a path.
///
/// [`URLResolver`] implements this, and so does any closure with the same
/// shape, which lets callers plug in their own routing.
pub trait UrlReverser {
    /// Reverses `viewname` with `kwargs`.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::NoReverseMatch`] when no route matches.
    fn reverse(&self, viewname: &str, kwargs: &HashMap<String, String>) -> HalResult<String>;
}

impl UrlReverser for URLResolver {
    fn reverse(&self, viewname: &str, kwargs: &HashMap<String, String>) -> HalResult<String> {
        reverse(viewname, kwargs, self)
    }
}

impl<F> UrlReverser for F
where
    F: Fn(&str, &HashMap<String, String>) -> HalResult<String>,
{
    fn reverse(&self, viewname: &str, kwargs: &HashMap<String, String>) -> HalResult<String> {
        self(viewname, kwargs)
    }
}

/// Reverses a route and, when a request is present and
/// `settings.absolute_urls` is set, makes the result absolute.
///
/// The host comes from the request, falling back to `settings.default_host`.
///
/// # Errors
///
/// Propagates any error from the reverser unchanged.
pub fn reverse_with_request(
    reverser: &dyn UrlReverser,
    viewname: &str,
    kwargs: &HashMap<String, String>,
    request: Option<&HttpRequest>,
    settings: &Settings,
) -> HalResult<String> {
    let path = reverser.reverse(viewname, kwargs)?;
    match request {
        Some(request) if settings.absolute_urls => {
            Ok(request.build_absolute_uri(&path, &settings.default_host))
        }
        _ => Ok(path),
    }
}
