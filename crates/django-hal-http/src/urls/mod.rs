//! URL configuration and reversal.
//!
//! This module provides the Django-style URL layer that HAL links are built on:
//!
//! - [`pattern`]: Route templates and `path()`
//! - [`converters`]: Path type converters (`int`, `str`, `slug`, `uuid`, `path`)
//! - [`resolver`]: Nested URL configurations with namespace support
//! - [`reverse`]: Reverse URL generation and the [`UrlReverser`](reverse::UrlReverser) seam
//!
//! # Examples
//!
//! ```
//! use django_hal_http::urls::pattern::path;
//! use django_hal_http::urls::resolver::{include, root};
//! use django_hal_http::urls::reverse::reverse;
//! use std::collections::HashMap;
//!
//! let users = include(
//!     "users/",
//!     vec![path("<int:pk>/", Some("detail")).unwrap().into()],
//!     Some("users"),
//!     None,
//! )
//! .unwrap();
//! let resolver = root(vec![users.into()]).unwrap();
//!
//! let kwargs = HashMap::from([("pk".to_string(), "42".to_string())]);
//! let url = reverse("users:detail", &kwargs, &resolver).unwrap();
//! assert_eq!(url, "/users/42/");
//! ```

pub mod converters;
pub mod pattern;
pub mod resolver;
pub mod reverse;
