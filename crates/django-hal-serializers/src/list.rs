//! Collection HAL documents.
//!
//! A collection document has a self link for the list route and the items
//! under `_embedded[resource_name]`:
//!
//! ```json
//! {
//!   "_links": {"self": {"href": "/users/42/emails/?page=2", "profile": "email"}},
//!   "_embedded": {"emails": [{"_links": {...}, ...}, ...]}
//! }
//! ```

use serde_json::Value;

use django_hal_core::logging::serialization_span;
use django_hal_core::{HalError, HalResult};

use crate::accessor::FieldAccessor;
use crate::context::SerializerContext;
use crate::document::{Document, DocumentBuilder};
use crate::link::RouteSpec;
use crate::resolve::{self, Links, ResolvedLink};

/// List-level configuration of a serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMeta {
    /// Route of the collection's self link.
    pub list_reverse: RouteSpec,
    /// The `_embedded` key; defaults to `Settings::default_resource_name`.
    pub resource_name: Option<String>,
    /// Set as the `profile` of the collection's self link.
    pub profile: Option<String>,
}

impl ListMeta {
    /// Creates list configuration for the given route.
    pub fn new(list_reverse: impl Into<RouteSpec>) -> Self {
        Self {
            list_reverse: list_reverse.into(),
            resource_name: None,
            profile: None,
        }
    }

    /// Sets the `_embedded` key.
    #[must_use]
    pub fn with_resource_name(mut self, resource_name: &str) -> Self {
        self.resource_name = Some(resource_name.to_string());
        self
    }

    /// Sets the self link's `profile`.
    #[must_use]
    pub fn with_profile(mut self, profile: &str) -> Self {
        self.profile = Some(profile.to_string());
        self
    }
}

/// The items of a collection, and the object that owns them if there is one.
///
/// A related collection (a user's emails) has an owner whose attributes fill
/// the list route's keyword arguments (`/users/42/emails/`). A plain filtered
/// set of items has none.
pub struct Collection<'a> {
    items: Vec<&'a dyn FieldAccessor>,
    instance: Option<&'a dyn FieldAccessor>,
}

impl<'a> Collection<'a> {
    /// A plain set of items.
    pub fn new<T: FieldAccessor>(items: &'a [T]) -> Self {
        Self {
            items: items.iter().map(|item| item as &dyn FieldAccessor).collect(),
            instance: None,
        }
    }

    /// Items related to `instance`, such as the emails of one user.
    pub fn related<T: FieldAccessor>(instance: &'a dyn FieldAccessor, items: &'a [T]) -> Self {
        Self {
            instance: Some(instance),
            ..Self::new(items)
        }
    }

    /// A set of items of mixed types.
    pub fn from_refs(items: Vec<&'a dyn FieldAccessor>) -> Self {
        Self {
            items,
            instance: None,
        }
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Renders collections by running each item through a [`DocumentBuilder`].
#[derive(Debug, Clone, Copy)]
pub struct HalListSerializer<'s> {
    child: &'s DocumentBuilder,
    meta: Option<&'s ListMeta>,
}

impl<'s> HalListSerializer<'s> {
    /// Creates a list serializer around an item builder.
    pub const fn new(child: &'s DocumentBuilder, meta: Option<&'s ListMeta>) -> Self {
        Self { child, meta }
    }

    /// Builds the collection document.
    ///
    /// # Errors
    ///
    /// - [`HalError::ImproperlyConfigured`] if no list configuration is set, or
    ///   the list route takes keyword arguments and the collection has no
    ///   owning instance to read them from.
    /// - [`HalError::NoReverseMatch`] if the collection's self link does not
    ///   reverse.
    /// - Any error from building an item.
    pub fn build_collection(
        &self,
        collection: &Collection<'_>,
        ctx: &SerializerContext<'_>,
    ) -> HalResult<Document> {
        let meta = self.meta.ok_or_else(|| {
            HalError::ImproperlyConfigured(
                "HalSerializer must define list_reverse to serialize a collection".to_string(),
            )
        })?;

        let span = serialization_span(&meta.list_reverse.pattern);
        let _guard = span.enter();

        let mut self_link = ResolvedLink::new(self.self_href(meta, collection, ctx)?);
        self_link.profile = resolve::non_empty(meta.profile.as_deref());
        let mut links = Links::new();
        links.add("self", self_link);

        let items = collection
            .items
            .iter()
            .map(|item| self.child.build(*item, ctx).map(Value::Object))
            .collect::<HalResult<Vec<_>>>()?;

        let resource_name = meta
            .resource_name
            .as_deref()
            .unwrap_or(&ctx.settings.default_resource_name);
        tracing::debug!(
            resource = resource_name,
            items = items.len(),
            "Built collection document"
        );

        let mut embedded = Document::new();
        embedded.insert(resource_name.to_string(), Value::Array(items));

        let mut document = Document::new();
        document.insert("_links".to_string(), links.to_value()?);
        document.insert("_embedded".to_string(), Value::Object(embedded));
        Ok(document)
    }

    fn self_href(
        &self,
        meta: &ListMeta,
        collection: &Collection<'_>,
        ctx: &SerializerContext<'_>,
    ) -> HalResult<String> {
        let route = &meta.list_reverse;
        let href = if route.kwargs.is_empty() {
            resolve::reverse_route(&route.pattern, &route.kwargs, &Value::Null, ctx)
        } else {
            let instance = collection.instance.ok_or_else(|| {
                HalError::ImproperlyConfigured(format!(
                    "List route '{}' takes keyword arguments, which can only be read from \
                     the object that owns a related collection (e.g. a user's emails, \
                     built with Collection::related). A filtered set of items \
                     (e.g. emails whose user is 42, built with Collection::new) has no \
                     such object.",
                    route.pattern
                ))
            })?;
            resolve::reverse_route(&route.pattern, &route.kwargs, instance, ctx)
        }
        .map_err(|err| {
            tracing::error!(route = %route.pattern, error = %err, "Collection self link did not resolve");
            err
        })?;

        match ctx.query_string() {
            Some(query) if ctx.settings.pass_through_query => Ok(format!("{href}?{query}")),
            _ => Ok(href),
        }
    }
}
