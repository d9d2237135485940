//! The HAL serializer front-ends.
//!
//! [`HalSerializer`] is configured once (self route, links, fields, and
//! optionally list settings) and renders either a single object with
//! [`build`](HalSerializer::build) or a collection through
//! [`many`](HalSerializer::many).
//!
//! # Examples
//!
//! ```
//! use django_hal_core::Settings;
//! use django_hal_http::urls::pattern::path;
//! use django_hal_http::urls::resolver::root;
//! use django_hal_serializers::link::{link, pattern};
//! use django_hal_serializers::{field, HalSerializer, RouteSpec, SerializerContext};
//! use serde_json::json;
//!
//! let urls = root(vec![
//!     path("users/<int:pk>/", Some("user-detail")).unwrap().into(),
//!     path("users/<int:pk>/emails/", Some("user-email-list")).unwrap().into(),
//! ])
//! .unwrap();
//! let settings = Settings::default();
//! let ctx = SerializerContext::new(&urls, &settings);
//!
//! let serializer = HalSerializer::new(RouteSpec::detail("user-detail"))
//!     .with_link(link("emails").with_pattern(pattern("user-email-list").with_kwargs("pk")))
//!     .with_field(field("username"));
//!
//! let doc = serializer.build(&json!({"pk": 42, "username": "alice"}), &ctx).unwrap();
//! assert_eq!(doc["_links"]["self"]["href"], "/users/42/");
//! assert_eq!(doc["_links"]["emails"]["href"], "/users/42/emails/");
//! assert_eq!(doc["username"], "alice");
//! ```

use django_hal_core::logging::serialization_span;
use django_hal_core::HalResult;

use crate::accessor::FieldAccessor;
use crate::context::SerializerContext;
use crate::document::{Document, DocumentBuilder, FieldSpec};
use crate::link::{LinkSpec, RouteSpec};
use crate::list::{Collection, HalListSerializer, ListMeta};

/// A configured HAL serializer.
#[derive(Debug, Clone)]
pub struct HalSerializer {
    builder: DocumentBuilder,
    list: Option<ListMeta>,
}

impl HalSerializer {
    /// Creates a serializer whose self link reverses `detail_reverse`.
    pub const fn new(detail_reverse: RouteSpec) -> Self {
        Self {
            builder: DocumentBuilder::new(detail_reverse),
            list: None,
        }
    }

    /// Adds a link.
    #[must_use]
    pub fn with_link(mut self, link: LinkSpec) -> Self {
        self.builder.links.push(link);
        self
    }

    /// Adds several links, keeping their order.
    #[must_use]
    pub fn with_links(mut self, links: impl IntoIterator<Item = LinkSpec>) -> Self {
        self.builder.links.extend(links);
        self
    }

    /// Adds an output field.
    #[must_use]
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.builder.fields.push(field);
        self
    }

    /// Adds several output fields, keeping their order.
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.builder.fields.extend(fields);
        self
    }

    /// Sets the list configuration used by [`many`](Self::many).
    #[must_use]
    pub fn with_list(mut self, list: ListMeta) -> Self {
        self.list = Some(list);
        self
    }

    /// Returns the item builder.
    pub const fn builder(&self) -> &DocumentBuilder {
        &self.builder
    }

    /// Returns the list configuration, if set.
    pub const fn list(&self) -> Option<&ListMeta> {
        self.list.as_ref()
    }

    /// Renders one object.
    ///
    /// # Errors
    ///
    /// See [`DocumentBuilder::build`].
    pub fn build(&self, source: &dyn FieldAccessor, ctx: &SerializerContext<'_>) -> HalResult<Document> {
        let span = serialization_span(&self.builder.detail_reverse.pattern);
        let _guard = span.enter();
        self.builder.build(source, ctx)
    }

    /// Returns the collection front-end for this serializer.
    pub fn many(&self) -> HalListSerializer<'_> {
        HalListSerializer::new(&self.builder, self.list.as_ref())
    }

    /// Renders a collection; shorthand for `self.many().build_collection(..)`.
    ///
    /// # Errors
    ///
    /// See [`HalListSerializer::build_collection`].
    pub fn build_collection(
        &self,
        collection: &Collection<'_>,
        ctx: &SerializerContext<'_>,
    ) -> HalResult<Document> {
        self.many().build_collection(collection, ctx)
    }
}
