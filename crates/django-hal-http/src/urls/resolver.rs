//! URL configuration trees and namespace support.
//!
//! This module provides [`URLResolver`], a prefix plus child entries, which is
//! how Django's `include()` nests URL configurations. Each resolver flattens
//! its named routes once, at construction, under their namespace-qualified
//! names; reversal only filters that list.

use std::fmt;

use django_hal_core::HalResult;

use super::pattern::{RoutePattern, URLPattern};

/// A named route flattened out of a resolver tree.
#[derive(Debug, Clone)]
pub struct NamedRoute {
    /// The namespace-qualified name, e.g. `"api:user-detail"`.
    pub qualified_name: String,
    /// The full route, including every enclosing prefix.
    pub pattern: RoutePattern,
}

/// An entry in a URL configuration, either a leaf pattern or a nested resolver.
///
/// This mirrors the two types of entries that can appear in Django's `urlpatterns` list.
#[derive(Debug, Clone)]
pub enum URLEntry {
    /// A leaf URL pattern.
    Pattern(URLPattern),
    /// A nested resolver, typically created via [`include`].
    Resolver(URLResolver),
}

impl From<URLPattern> for URLEntry {
    fn from(pattern: URLPattern) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<URLResolver> for URLEntry {
    fn from(resolver: URLResolver) -> Self {
        Self::Resolver(resolver)
    }
}

/// A prefix route with child patterns and sub-resolvers.
#[derive(Clone)]
pub struct URLResolver {
    prefix: RoutePattern,
    url_patterns: Vec<URLEntry>,
    namespace: Option<String>,
    app_name: Option<String>,
    named_routes: Vec<NamedRoute>,
}

impl fmt::Debug for URLResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("URLResolver")
            .field("prefix", &self.prefix.route())
            .field("url_patterns", &self.url_patterns)
            .field("namespace", &self.namespace)
            .field("app_name", &self.app_name)
            .finish_non_exhaustive()
    }
}

impl URLResolver {
    /// Creates a new resolver with the given prefix and child entries.
    pub fn new(
        prefix: RoutePattern,
        url_patterns: Vec<URLEntry>,
        namespace: Option<&str>,
        app_name: Option<&str>,
    ) -> Self {
        let named_routes = flatten(&prefix, namespace, &url_patterns);
        Self {
            prefix,
            url_patterns,
            namespace: namespace.map(String::from),
            app_name: app_name.map(String::from),
            named_routes,
        }
    }

    /// Returns the prefix route.
    pub const fn prefix(&self) -> &RoutePattern {
        &self.prefix
    }

    /// Returns the child URL entries.
    pub fn url_patterns(&self) -> &[URLEntry] {
        &self.url_patterns
    }

    /// Returns the instance namespace, if set.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the application namespace, if set.
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    /// Returns every named route in this resolver tree, in declaration order.
    ///
    /// Used by [`reverse`](super::reverse::reverse) to find candidates by name.
    pub fn named_routes(&self) -> &[NamedRoute] {
        &self.named_routes
    }
}

/// Flattens one level of a URL configuration. Nested resolvers have already
/// flattened their own entries, so only this level's prefix and namespace
/// are added to theirs.
fn flatten(prefix: &RoutePattern, namespace: Option<&str>, entries: &[URLEntry]) -> Vec<NamedRoute> {
    let qualify = |name: &str| match namespace {
        Some(ns) => format!("{ns}:{name}"),
        None => name.to_string(),
    };

    let mut routes = Vec::new();
    for entry in entries {
        match entry {
            URLEntry::Pattern(child) => {
                if let Some(name) = child.name() {
                    routes.push(NamedRoute {
                        qualified_name: qualify(name),
                        pattern: prefix.join(child.pattern()),
                    });
                }
            }
            URLEntry::Resolver(child) => {
                routes.extend(child.named_routes().iter().map(|route| NamedRoute {
                    qualified_name: qualify(&route.qualified_name),
                    pattern: prefix.join(&route.pattern),
                }));
            }
        }
    }
    routes
}

/// Creates a nested resolver, mirroring Django's `include()`.
///
/// The prefix may itself contain placeholders, e.g. `"users/<int:user_pk>/"`.
///
/// # Errors
///
/// Returns an error if the prefix route cannot be parsed.
pub fn include(
    prefix: &str,
    url_patterns: Vec<URLEntry>,
    namespace: Option<&str>,
    app_name: Option<&str>,
) -> HalResult<URLResolver> {
    Ok(URLResolver::new(
        RoutePattern::parse(prefix)?,
        url_patterns,
        namespace,
        app_name,
    ))
}

/// Creates the root resolver of a URL configuration.
///
/// # Errors
///
/// This never fails in practice; it returns a `Result` so root and nested
/// configurations can be built the same way.
pub fn root(url_patterns: Vec<URLEntry>) -> HalResult<URLResolver> {
    include("", url_patterns, None, None)
}
