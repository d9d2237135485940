//! Single-resource HAL documents.
//!
//! [`DocumentBuilder`] holds what is needed to render one object: the route
//! of its self link, its other links, and its fields. The detail serializer
//! and the list serializer both render items through it.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use django_hal_core::HalResult;

use crate::accessor::FieldAccessor;
use crate::context::SerializerContext;
use crate::link::{LinkSpec, RouteSpec};
use crate::resolve::{self, process_links, Links, ResolvedLink};

/// An ordered HAL document.
pub type Document = Map<String, Value>;

/// Converts a non-null attribute value into its output representation.
pub type FieldTransform = Arc<dyn Fn(&Value) -> HalResult<Value> + Send + Sync>;

/// One output field.
#[derive(Clone)]
pub struct FieldSpec {
    /// The key in the output document.
    pub name: String,
    /// The attribute the value is read from.
    pub source: String,
    /// Applied to non-null values; without one, values pass through unchanged.
    pub transform: Option<FieldTransform>,
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl FieldSpec {
    /// Creates a field read from the attribute of the same name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            source: name.to_string(),
            transform: None,
        }
    }

    /// Reads the value from a differently-named attribute.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    /// Sets the transform applied to non-null values.
    #[must_use]
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&Value) -> HalResult<Value> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    fn render(&self, source: &dyn FieldAccessor) -> HalResult<Value> {
        match source.attribute(&self.source) {
            None | Some(Value::Null) => Ok(Value::Null),
            Some(value) => match &self.transform {
                Some(transform) => transform(&value),
                None => Ok(value),
            },
        }
    }
}

/// Creates a [`FieldSpec`] for the named attribute.
pub fn field(name: &str) -> FieldSpec {
    FieldSpec::new(name)
}

/// Renders single resources.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    /// Route of the mandatory self link.
    pub detail_reverse: RouteSpec,
    /// Further links, merged after `self` in declaration order.
    pub links: Vec<LinkSpec>,
    /// Output fields, in declaration order.
    pub fields: Vec<FieldSpec>,
}

impl DocumentBuilder {
    /// Creates a builder with a self link and nothing else.
    pub const fn new(detail_reverse: RouteSpec) -> Self {
        Self {
            detail_reverse,
            links: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Builds `{"_links": {...}, <fields>...}` for `source`.
    ///
    /// # Errors
    ///
    /// Fails with [`HalError::NoReverseMatch`](django_hal_core::HalError::NoReverseMatch)
    /// if the self link does not reverse, and with
    /// [`HalError::ImproperlyConfigured`](django_hal_core::HalError::ImproperlyConfigured)
    /// for invalid link specs or missing link attributes. Transform errors
    /// are propagated. No partial document is returned.
    pub fn build(&self, source: &dyn FieldAccessor, ctx: &SerializerContext<'_>) -> HalResult<Document> {
        let mut links = Links::new();
        links.add("self", self.self_link(source, ctx)?);
        process_links(&mut links, &self.links, source, ctx)?;

        let mut document = Document::new();
        document.insert("_links".to_string(), links.to_value()?);
        for field in &self.fields {
            document.insert(field.name.clone(), field.render(source)?);
        }

        tracing::debug!(
            route = %self.detail_reverse.pattern,
            links = links.len(),
            fields = self.fields.len(),
            "Built resource document"
        );
        Ok(document)
    }

    fn self_link(&self, source: &dyn FieldAccessor, ctx: &SerializerContext<'_>) -> HalResult<ResolvedLink> {
        let route = &self.detail_reverse;
        resolve::reverse_route(&route.pattern, &route.kwargs, source, ctx)
            .map(ResolvedLink::new)
            .map_err(|err| {
                tracing::error!(route = %route.pattern, error = %err, "Self link did not resolve");
                err
            })
    }
}
