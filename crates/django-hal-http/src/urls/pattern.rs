//! URL route templates.
//!
//! This module provides [`RoutePattern`], a parsed Django-style route such as
//! `users/<int:pk>/`, and [`URLPattern`], a route with an optional name for
//! reverse lookup. It mirrors the reversal half of Django's `path()`.

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;

use django_hal_core::{HalError, HalResult};

use super::converters::{self, PathConverter};

/// Characters escaped when a keyword argument is substituted into a path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param {
        name: String,
        converter: Arc<dyn PathConverter>,
        /// The converter regex, anchored at both ends.
        matcher: Regex,
    },
}

/// A parsed route template.
///
/// # Examples
///
/// ```
/// use django_hal_http::urls::pattern::RoutePattern;
/// use std::collections::HashMap;
///
/// let route = RoutePattern::parse("users/<int:pk>/").unwrap();
/// let kwargs = HashMap::from([("pk".to_string(), "42".to_string())]);
/// assert_eq!(route.substitute(&kwargs).as_deref(), Some("users/42/"));
/// ```
#[derive(Clone)]
pub struct RoutePattern {
    route: String,
    segments: Vec<Segment>,
}

impl fmt::Debug for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutePattern")
            .field("route", &self.route)
            .field("params", &self.param_names().collect::<Vec<_>>())
            .finish()
    }
}

impl RoutePattern {
    /// Parses a route containing `<type:name>` placeholders (`<name>` means
    /// `<str:name>`).
    ///
    /// # Errors
    ///
    /// Returns [`HalError::ImproperlyConfigured`] for an unclosed `<`, an empty
    /// parameter name, or an unknown converter type.
    pub fn parse(route: &str) -> HalResult<Self> {
        let mut segments = Vec::new();
        let mut remaining = route;

        while let Some(start) = remaining.find('<') {
            if start > 0 {
                segments.push(Segment::Literal(remaining[..start].to_string()));
            }

            let end = remaining[start..].find('>').ok_or_else(|| {
                HalError::ImproperlyConfigured(format!(
                    "Unclosed angle bracket in route: {route}"
                ))
            })? + start;

            let inner = &remaining[start + 1..end];
            let (type_name, param_name) = inner
                .split_once(':')
                .unwrap_or(("str", inner));
            if param_name.is_empty() {
                return Err(HalError::ImproperlyConfigured(format!(
                    "Empty parameter name in route: {route}"
                )));
            }

            let converter = converters::get_converter(type_name)?;
            let matcher = Regex::new(&format!("^(?:{})$", converter.regex())).map_err(|e| {
                HalError::ImproperlyConfigured(format!("Invalid converter regex: {e}"))
            })?;

            segments.push(Segment::Param {
                name: param_name.to_string(),
                converter,
                matcher,
            });

            remaining = &remaining[end + 1..];
        }

        if !remaining.is_empty() {
            segments.push(Segment::Literal(remaining.to_string()));
        }

        Ok(Self {
            route: route.to_string(),
            segments,
        })
    }

    /// Returns the original route string.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Returns the parameter names, in route order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns a new pattern that matches `self` followed by `child`.
    #[must_use]
    pub fn join(&self, child: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        Self {
            route: format!("{}{}", self.route, child.route),
            segments,
        }
    }

    /// Fills the placeholders from `kwargs`.
    ///
    /// Returns `None` unless the keyword names are exactly the parameter names
    /// and every value converts to something the parameter's converter
    /// accepts. This is the candidate test Django's `reverse()` applies.
    pub fn substitute<S: BuildHasher>(&self, kwargs: &HashMap<String, String, S>) -> Option<String> {
        let param_count = self.param_names().count();
        if param_count != kwargs.len() {
            return None;
        }

        let mut url = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Param {
                    name,
                    converter,
                    matcher,
                } => {
                    let value = converter.to_url(kwargs.get(name)?).ok()?;
                    if !matcher.is_match(&value) {
                        return None;
                    }
                    url.extend(utf8_percent_encode(&value, PATH_SEGMENT));
                }
            }
        }

        Some(url)
    }
}

/// A route with an optional name for reverse lookup.
///
/// This is the Rust equivalent of a Django `URLPattern` created by `path()`,
/// without a view: link building only ever reverses routes.
#[derive(Debug, Clone)]
pub struct URLPattern {
    pattern: RoutePattern,
    name: Option<String>,
}

impl URLPattern {
    /// Returns the original route string.
    pub fn route(&self) -> &str {
        self.pattern.route()
    }

    /// Returns the parsed route.
    pub const fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Returns the optional name for this pattern.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Creates a URL pattern using Django's `path()` syntax.
///
/// # Examples
///
/// ```
/// use django_hal_http::urls::pattern::path;
///
/// let pattern = path("articles/<int:year>/", Some("article-year")).unwrap();
/// assert_eq!(pattern.name(), Some("article-year"));
/// ```
///
/// # Errors
///
/// Returns an error if the route contains unknown converter types or invalid syntax.
pub fn path(route: &str, name: Option<&str>) -> HalResult<URLPattern> {
    Ok(URLPattern {
        pattern: RoutePattern::parse(route)?,
        name: name.map(String::from),
    })
}
