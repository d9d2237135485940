//! # django-hal-serializers
//!
//! HAL (Hypertext Application Language) documents for in-memory objects.
//! Objects expose their attributes through [`FieldAccessor`]; links are
//! declared with [`LinkSpec`] and resolved through a
//! [`UrlReverser`](django_hal_http::UrlReverser); [`HalSerializer`] assembles
//! `_links`, fields, and (for collections) `_embedded`.
//!
//! ## Modules
//!
//! - [`accessor`] - Attribute access on serialized objects
//! - [`link`] - Declarative link and route specifications
//! - [`resolve`] - Link resolution and `_links` merging
//! - [`context`] - Per-call serializer context
//! - [`document`] - Single-resource documents
//! - [`list`] - Collection documents
//! - [`serializer`] - The `HalSerializer` front-end

pub mod accessor;
pub mod context;
pub mod document;
pub mod link;
pub mod list;
pub mod resolve;
pub mod serializer;

pub use accessor::{to_accessor, FieldAccessor};
pub use context::SerializerContext;
pub use document::{field, Document, DocumentBuilder, FieldSpec, FieldTransform};
pub use link::{link, pattern, KwargsSpec, LinkSpec, LinkTarget, PatternSpec, RouteSpec};
pub use list::{Collection, HalListSerializer, ListMeta};
pub use resolve::{process_links, resolve_link, LinkEntry, Links, ResolvedLink};
pub use serializer::HalSerializer;
