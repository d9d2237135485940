//! Declarative link specifications.
//!
//! A [`LinkSpec`] describes one entry of a document's `_links`: its relation,
//! optional `name` and `profile`, and where its `href` comes from (a named
//! route described by a [`PatternSpec`], or a fixed href). The [`link`] and
//! [`pattern`] helpers give the short construction syntax.
//!
//! # Examples
//!
//! ```
//! use django_hal_serializers::link::{link, pattern};
//!
//! let emails = link("emails")
//!     .with_profile("email")
//!     .with_pattern(pattern("user-email-list").with_kwargs("pk"));
//! assert!(emails.validate().is_ok());
//! ```

use django_hal_core::{HalError, HalResult};

/// Where the URL keyword arguments of a route come from.
///
/// Each pair maps a URL keyword name to the attribute it is read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KwargsSpec {
    /// The route takes no keyword arguments.
    #[default]
    None,
    /// Shorthand: the keyword and the attribute share a name (`"pk"` means
    /// `{"pk": "pk"}`).
    Attr(String),
    /// Explicit `(url_kwarg, attribute)` pairs, in declaration order.
    Map(Vec<(String, String)>),
}

impl KwargsSpec {
    /// Returns the `(url_kwarg, attribute)` pairs with the shorthand expanded.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        match self {
            Self::None => Vec::new(),
            Self::Attr(attr) => vec![(attr.as_str(), attr.as_str())],
            Self::Map(pairs) => pairs
                .iter()
                .map(|(kwarg, attr)| (kwarg.as_str(), attr.as_str()))
                .collect(),
        }
    }

    /// Returns `true` if no keyword arguments are configured.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Attr(_) => false,
            Self::Map(pairs) => pairs.is_empty(),
        }
    }
}

impl From<&str> for KwargsSpec {
    fn from(attr: &str) -> Self {
        Self::Attr(attr.to_string())
    }
}

impl From<String> for KwargsSpec {
    fn from(attr: String) -> Self {
        Self::Attr(attr)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for KwargsSpec {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self::Map(
            pairs
                .iter()
                .map(|(kwarg, attr)| ((*kwarg).to_string(), (*attr).to_string()))
                .collect(),
        )
    }
}

impl From<Vec<(String, String)>> for KwargsSpec {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Map(pairs)
    }
}

/// How to build a URL: a named route, its keyword arguments, and query
/// parameters, all read from the serialized object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    /// The (possibly namespaced) route name.
    pub pattern: String,
    /// URL keyword arguments.
    pub kwargs: KwargsSpec,
    /// `(query_param, attribute)` pairs appended as a query string.
    pub query: Vec<(String, String)>,
}

impl PatternSpec {
    /// Creates a pattern for a route that takes no arguments.
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            kwargs: KwargsSpec::None,
            query: Vec::new(),
        }
    }

    /// Replaces the keyword arguments. A bare string is the shorthand form.
    #[must_use]
    pub fn with_kwargs(mut self, kwargs: impl Into<KwargsSpec>) -> Self {
        self.kwargs = kwargs.into();
        self
    }

    /// Adds one keyword argument read from `attr`.
    #[must_use]
    pub fn with_kwarg(mut self, kwarg: &str, attr: &str) -> Self {
        let mut pairs: Vec<(String, String)> = self
            .kwargs
            .pairs()
            .into_iter()
            .map(|(k, a)| (k.to_string(), a.to_string()))
            .collect();
        pairs.push((kwarg.to_string(), attr.to_string()));
        self.kwargs = KwargsSpec::Map(pairs);
        self
    }

    /// Adds one query parameter read from `attr`.
    #[must_use]
    pub fn with_query(mut self, param: &str, attr: &str) -> Self {
        self.query.push((param.to_string(), attr.to_string()));
        self
    }
}

/// Creates a [`PatternSpec`] for the named route.
pub fn pattern(name: &str) -> PatternSpec {
    PatternSpec::new(name)
}

/// One declared link.
///
/// Exactly one of `pattern` and `href` must be set; [`validate`](Self::validate)
/// checks this before any URL is reversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    /// The relation name, e.g. `"self"` or `"emails"`.
    pub rel: String,
    /// Secondary identifier for links sharing a `rel`.
    pub name: Option<String>,
    /// Identifier of the target resource's type.
    pub profile: Option<String>,
    /// Route the href is reversed from.
    pub pattern: Option<PatternSpec>,
    /// Fixed href, used as-is.
    pub href: Option<String>,
}

impl LinkSpec {
    /// Creates a link with only a relation; add a pattern or an href before use.
    pub fn new(rel: &str) -> Self {
        Self {
            rel: rel.to_string(),
            name: None,
            profile: None,
            pattern: None,
            href: None,
        }
    }

    /// Sets the `name` property.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets the `profile` property.
    #[must_use]
    pub fn with_profile(mut self, profile: &str) -> Self {
        self.profile = Some(profile.to_string());
        self
    }

    /// Sets the route the href is reversed from.
    #[must_use]
    pub fn with_pattern(mut self, pattern: PatternSpec) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Sets a fixed href.
    #[must_use]
    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    /// Returns where the href comes from.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::ImproperlyConfigured`] if `rel` is empty or if both
    /// or neither of `pattern` and `href` are set.
    pub fn target(&self) -> HalResult<LinkTarget<'_>> {
        if self.rel.is_empty() {
            return Err(HalError::ImproperlyConfigured(
                "Link rel must not be empty".to_string(),
            ));
        }
        match (&self.pattern, &self.href) {
            (Some(pattern), None) => Ok(LinkTarget::Pattern(pattern)),
            (None, Some(href)) => Ok(LinkTarget::Href(href)),
            (Some(_), Some(_)) => Err(HalError::ImproperlyConfigured(format!(
                "Link '{}' must have an href or a pattern, not both",
                self.rel
            ))),
            (None, None) => Err(HalError::ImproperlyConfigured(format!(
                "Link '{}' must have an href or a pattern",
                self.rel
            ))),
        }
    }

    /// Checks that the link can be resolved at all.
    ///
    /// # Errors
    ///
    /// See [`target`](Self::target).
    pub fn validate(&self) -> HalResult<()> {
        self.target().map(|_| ())
    }
}

/// The source of a validated link's href.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// Reverse this route.
    Pattern(&'a PatternSpec),
    /// Use this href as-is.
    Href(&'a str),
}

/// Creates a [`LinkSpec`] for the given relation.
pub fn link(rel: &str) -> LinkSpec {
    LinkSpec::new(rel)
}

/// A route plus keyword arguments, used for self links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    /// The (possibly namespaced) route name.
    pub pattern: String,
    /// URL keyword arguments.
    pub kwargs: KwargsSpec,
}

impl RouteSpec {
    /// Creates a route spec with explicit keyword arguments.
    pub fn new(pattern: &str, kwargs: impl Into<KwargsSpec>) -> Self {
        Self {
            pattern: pattern.to_string(),
            kwargs: kwargs.into(),
        }
    }

    /// A detail route keyed by primary key (`{"pk": "pk"}`).
    pub fn detail(pattern: &str) -> Self {
        Self::new(pattern, "pk")
    }
}

/// A bare route name takes no keyword arguments, the usual list route.
impl From<&str> for RouteSpec {
    fn from(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            kwargs: KwargsSpec::None,
        }
    }
}

impl<K: Into<KwargsSpec>> From<(&str, K)> for RouteSpec {
    fn from((pattern, kwargs): (&str, K)) -> Self {
        Self::new(pattern, kwargs)
    }
}
