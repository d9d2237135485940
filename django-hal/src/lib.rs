//! # django-hal
//!
//! HAL (Hypertext Application Language) documents for Rust objects, with
//! hyperlinks computed by Django-style named URL reversal.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `django-hal` to get everything, or depend on individual
//! crates for finer-grained control.
//!
//! # Examples
//!
//! ```
//! use django_hal::prelude::*;
//! use serde_json::json;
//!
//! let urls = root(vec![
//!     path("users/", Some("user-list")).unwrap().into(),
//!     path("users/<int:pk>/", Some("user-detail")).unwrap().into(),
//! ])
//! .unwrap();
//! let settings = Settings::default();
//! let request = HttpRequest::builder().query_string("page=2").build();
//! let ctx = SerializerContext::new(&urls, &settings).with_request(&request);
//!
//! let serializer = HalSerializer::new(RouteSpec::detail("user-detail"))
//!     .with_field(field("username"))
//!     .with_list(ListMeta::new("user-list").with_resource_name("users"));
//!
//! let users = vec![json!({"pk": 1, "username": "alice"})];
//! let doc = serializer.build_collection(&Collection::new(&users), &ctx).unwrap();
//! assert_eq!(doc["_links"]["self"]["href"], "http://localhost/users/?page=2");
//! assert_eq!(doc["_embedded"]["users"][0]["username"], "alice");
//! ```

/// Error type, settings, settings loading, and logging.
pub use django_hal_core as core;

/// Request context, query strings, and URL reversal.
pub use django_hal_http as http;

/// Link specifications, link resolution, and document builders.
pub use django_hal_serializers as serializers;

/// JSON values, as used for documents and attributes.
pub use serde_json;

/// The types needed to declare and run a serializer.
pub mod prelude {
    pub use django_hal_core::{HalError, HalResult, Settings};
    pub use django_hal_http::urls::pattern::path;
    pub use django_hal_http::urls::resolver::{include, root, URLEntry, URLResolver};
    pub use django_hal_http::{reverse, HttpRequest, UrlReverser};
    pub use django_hal_serializers::{
        field, link, pattern, Collection, FieldAccessor, HalSerializer, KwargsSpec, LinkSpec,
        ListMeta, PatternSpec, RouteSpec, SerializerContext,
    };
}
