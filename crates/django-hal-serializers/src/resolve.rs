//! Link resolution.
//!
//! Turns [`LinkSpec`]s into link objects by reading attributes off the
//! serialized object and reversing routes, and merges them into a document's
//! `_links` following HAL's single-or-array rule.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use django_hal_core::{HalError, HalResult};
use django_hal_http::reverse_with_request;

use crate::accessor::FieldAccessor;
use crate::context::SerializerContext;
use crate::link::{KwargsSpec, LinkSpec, LinkTarget};

/// A resolved link object: `{"href": ..., "name"?: ..., "profile"?: ...}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResolvedLink {
    /// The link target.
    pub href: String,
    /// Secondary identifier, present only when the `LinkSpec` sets one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Target type, present only when the `LinkSpec` sets one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl ResolvedLink {
    /// Creates a link with only an href.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            name: None,
            profile: None,
        }
    }
}

/// The value stored under one `rel`: a bare link, or an array once a second
/// link with the same `rel` arrives.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum LinkEntry {
    /// Exactly one link.
    One(ResolvedLink),
    /// Two or more links, in declaration order.
    Many(Vec<ResolvedLink>),
}

impl LinkEntry {
    fn push(&mut self, link: ResolvedLink) {
        match self {
            Self::Many(links) => links.push(link),
            Self::One(first) => {
                let first = first.clone();
                *self = Self::Many(vec![first, link]);
            }
        }
    }

    /// Returns the links in this entry, in order.
    pub fn links(&self) -> &[ResolvedLink] {
        match self {
            Self::One(link) => std::slice::from_ref(link),
            Self::Many(links) => links,
        }
    }
}

/// An insertion-ordered `_links` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    entries: Vec<(String, LinkEntry)>,
}

impl Links {
    /// Creates an empty `_links` section.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a link under `rel`. The first link for a `rel` is stored bare;
    /// later ones turn the entry into an array.
    pub fn add(&mut self, rel: &str, link: ResolvedLink) {
        if let Some((_, entry)) = self.entries.iter_mut().find(|(r, _)| r == rel) {
            entry.push(link);
        } else {
            self.entries.push((rel.to_string(), LinkEntry::One(link)));
        }
    }

    /// Returns the entry for `rel`.
    pub fn get(&self, rel: &str) -> Option<&LinkEntry> {
        self.entries
            .iter()
            .find(|(r, _)| r == rel)
            .map(|(_, entry)| entry)
    }

    /// Returns the number of distinct relations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no links.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(rel, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LinkEntry)> {
        self.entries.iter().map(|(rel, entry)| (rel.as_str(), entry))
    }

    /// Converts the section into a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::SerializationError`] if serialization fails.
    pub fn to_value(&self) -> HalResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (rel, entry) in &self.entries {
            map.serialize_entry(rel, entry)?;
        }
        map.end()
    }
}

/// Resolves one declared link against `source`.
///
/// Returns `Ok(None)` when the route does not reverse for this object; the
/// link is then absent as a whole rather than present with an empty href.
///
/// # Errors
///
/// Returns [`HalError::ImproperlyConfigured`] if the `LinkSpec` is invalid (checked
/// before any reversal) or names an attribute `source` does not have. Errors
/// from the reverser other than [`HalError::NoReverseMatch`] are propagated.
pub fn resolve_link(
    spec: &LinkSpec,
    source: &dyn FieldAccessor,
    ctx: &SerializerContext<'_>,
) -> HalResult<Option<ResolvedLink>> {
    let href = match spec.target()? {
        LinkTarget::Pattern(pattern) => {
            let url = match reverse_route(&pattern.pattern, &pattern.kwargs, source, ctx) {
                Ok(url) => url,
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(
                        rel = %spec.rel,
                        pattern = %pattern.pattern,
                        error = %err,
                        "Dropping link whose route did not reverse"
                    );
                    return Ok(None);
                }
                Err(err) => return Err(err),
            };
            if pattern.query.is_empty() {
                url
            } else {
                format!("{url}?{}", encode_query(&pattern.query, source)?)
            }
        }
        LinkTarget::Href(href) => href.to_string(),
    };

    tracing::debug!(rel = %spec.rel, href = %href, "Resolved link");

    Ok(Some(ResolvedLink {
        href,
        name: non_empty(spec.name.as_deref()),
        profile: non_empty(spec.profile.as_deref()),
    }))
}

/// Resolves `specs` in order and merges them into `links`.
///
/// Links whose route does not reverse are left out.
///
/// # Errors
///
/// Propagates configuration errors from [`resolve_link`].
pub fn process_links(
    links: &mut Links,
    specs: &[LinkSpec],
    source: &dyn FieldAccessor,
    ctx: &SerializerContext<'_>,
) -> HalResult<()> {
    for spec in specs {
        if let Some(link) = resolve_link(spec, source, ctx)? {
            links.add(&spec.rel, link);
        }
    }
    Ok(())
}

/// Reads the keyword arguments for `route` off `source` and reverses it.
///
/// A `null` attribute value cannot fill a route placeholder, so it is reported
/// as [`HalError::NoReverseMatch`].
pub(crate) fn reverse_route(
    route: &str,
    kwargs: &KwargsSpec,
    source: &dyn FieldAccessor,
    ctx: &SerializerContext<'_>,
) -> HalResult<String> {
    let mut url_kwargs = HashMap::new();
    for (kwarg, attr) in kwargs.pairs() {
        let value = read_attribute(source, attr)?;
        let Some(value) = url_value(&value, attr)? else {
            return Err(HalError::NoReverseMatch(format!(
                "Reverse for '{route}' got a null value for '{kwarg}'"
            )));
        };
        url_kwargs.insert(kwarg.to_string(), value);
    }

    reverse_with_request(ctx.reverser, route, &url_kwargs, ctx.request, ctx.settings)
}

/// An empty `name` or `profile` is left out of the link, like an unset one.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Reads a required attribute.
pub(crate) fn read_attribute(source: &dyn FieldAccessor, attr: &str) -> HalResult<Value> {
    source.attribute(attr).ok_or_else(|| {
        HalError::ImproperlyConfigured(format!("Object has no attribute '{attr}'"))
    })
}

/// Renders a scalar attribute value for use in a URL. `null` renders as `None`.
///
/// Booleans render as JSON does (`true`/`false`), not as Django's `True`/`False`.
fn url_value(value: &Value, attr: &str) -> HalResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(HalError::ImproperlyConfigured(format!(
            "Attribute '{attr}' is not a scalar and cannot be used in a URL"
        ))),
    }
}

/// Form-encodes `(param, attr)` pairs in declaration order. Array values
/// repeat the parameter and `null` encodes as an empty value.
fn encode_query(query: &[(String, String)], source: &dyn FieldAccessor) -> HalResult<String> {
    let mut encoder = url::form_urlencoded::Serializer::new(String::new());
    for (param, attr) in query {
        match read_attribute(source, attr)? {
            Value::Array(items) => {
                for item in &items {
                    encoder.append_pair(param, &url_value(item, attr)?.unwrap_or_default());
                }
            }
            value => {
                encoder.append_pair(param, &url_value(&value, attr)?.unwrap_or_default());
            }
        }
    }
    Ok(encoder.finish())
}
