//! Path converters for URL reversal.
//!
//! This module provides the [`PathConverter`] trait and the built-in converters
//! of Django's `django.urls.converters` module. During reversal a converter
//! turns a keyword argument into its URL form; the result must then match the
//! converter's regex for the route to be a candidate.
//!
//! # Built-in converters
//!
//! | Name   | Regex                                  |
//! |--------|----------------------------------------|
//! | `int`  | `[0-9]+`                               |
//! | `str`  | `[^/]+`                                |
//! | `slug` | `[-a-zA-Z0-9_]+`                       |
//! | `uuid` | `[0-9a-f]{8}-...-[0-9a-f]{12}`         |
//! | `path` | `.+`                                   |

use std::fmt;
use std::sync::Arc;

use django_hal_core::{HalError, HalResult};

/// Trait for converting keyword arguments into URL path segments.
///
/// This mirrors the `regex` / `to_url` half of Django's converter protocol.
pub trait PathConverter: Send + Sync + fmt::Debug {
    /// Returns the regex pattern that matches valid values for this converter.
    fn regex(&self) -> &'static str;

    /// Converts a keyword argument into its URL representation.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::NoReverseMatch`] if the value cannot be represented
    /// by this converter.
    fn to_url(&self, value: &str) -> HalResult<String>;
}

/// Converter for integer path segments.
///
/// Django equivalent: `django.urls.converters.IntConverter`
#[derive(Debug, Clone, Copy)]
pub struct IntConverter;

impl PathConverter for IntConverter {
    fn regex(&self) -> &'static str {
        "[0-9]+"
    }

    fn to_url(&self, value: &str) -> HalResult<String> {
        value
            .parse::<u64>()
            .map(|v| v.to_string())
            .map_err(|_| HalError::NoReverseMatch(format!("Invalid integer value: {value}")))
    }
}

/// Converter for string path segments (no slashes).
///
/// Django equivalent: `django.urls.converters.StringConverter`
#[derive(Debug, Clone, Copy)]
pub struct StrConverter;

impl PathConverter for StrConverter {
    fn regex(&self) -> &'static str {
        "[^/]+"
    }

    fn to_url(&self, value: &str) -> HalResult<String> {
        Ok(value.to_string())
    }
}

/// Converter for slug path segments.
///
/// Django equivalent: `django.urls.converters.SlugConverter`
#[derive(Debug, Clone, Copy)]
pub struct SlugConverter;

impl PathConverter for SlugConverter {
    fn regex(&self) -> &'static str {
        "[-a-zA-Z0-9_]+"
    }

    fn to_url(&self, value: &str) -> HalResult<String> {
        Ok(value.to_string())
    }
}

/// Converter for UUID path segments.
///
/// Accepts any UUID spelling `uuid` can parse and emits the lowercase
/// hyphenated form.
///
/// Django equivalent: `django.urls.converters.UUIDConverter`
#[derive(Debug, Clone, Copy)]
pub struct UuidConverter;

impl PathConverter for UuidConverter {
    fn regex(&self) -> &'static str {
        "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
    }

    fn to_url(&self, value: &str) -> HalResult<String> {
        value
            .parse::<uuid::Uuid>()
            .map(|v| v.hyphenated().to_string())
            .map_err(|_| HalError::NoReverseMatch(format!("Invalid UUID: {value}")))
    }
}

/// Converter for path segments that may contain slashes.
///
/// Django equivalent: `django.urls.converters.PathConverter`
#[derive(Debug, Clone, Copy)]
pub struct PathSegmentConverter;

impl PathConverter for PathSegmentConverter {
    fn regex(&self) -> &'static str {
        ".+"
    }

    fn to_url(&self, value: &str) -> HalResult<String> {
        Ok(value.to_string())
    }
}

/// Returns a shared path converter for the given type name.
///
/// # Errors
///
/// Returns [`HalError::ImproperlyConfigured`] if the type name is not recognized.
pub fn get_converter(type_name: &str) -> HalResult<Arc<dyn PathConverter>> {
    match type_name {
        "int" => Ok(Arc::new(IntConverter)),
        "str" => Ok(Arc::new(StrConverter)),
        "slug" => Ok(Arc::new(SlugConverter)),
        "uuid" => Ok(Arc::new(UuidConverter)),
        "path" => Ok(Arc::new(PathSegmentConverter)),
        _ => Err(HalError::ImproperlyConfigured(format!(
            "Unknown path converter type: {type_name}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_converter_to_url() {
        let conv = IntConverter;
        assert_eq!(conv.to_url("42").unwrap(), "42");
        assert_eq!(conv.to_url("007").unwrap(), "7");
        assert!(conv.to_url("abc").is_err());
        assert!(conv.to_url("-1").is_err());
        assert!(conv.to_url("").is_err());
    }

    #[test]
    fn test_str_and_slug_pass_through() {
        assert_eq!(StrConverter.to_url("alice").unwrap(), "alice");
        assert_eq!(SlugConverter.to_url("my-post_1").unwrap(), "my-post_1");
    }

    #[test]
    fn test_uuid_converter_normalizes() {
        let conv = UuidConverter;
        assert_eq!(
            conv.to_url("550E8400-E29B-41D4-A716-446655440000").unwrap(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
        assert!(conv.to_url("not-a-uuid").is_err());
    }

    #[test]
    fn test_converter_regexes() {
        let slug = regex::Regex::new(&format!("^(?:{})$", SlugConverter.regex())).unwrap();
        assert!(slug.is_match("hello-world"));
        assert!(!slug.is_match("hello world"));

        let s = regex::Regex::new(&format!("^(?:{})$", StrConverter.regex())).unwrap();
        assert!(!s.is_match("a/b"));

        let p = regex::Regex::new(&format!("^(?:{})$", PathSegmentConverter.regex())).unwrap();
        assert!(p.is_match("a/b/c"));
    }

    #[test]
    fn test_get_converter_known_types() {
        for name in ["int", "str", "slug", "uuid", "path"] {
            assert!(get_converter(name).is_ok(), "{name} should be known");
        }
    }

    #[test]
    fn test_get_converter_unknown_type() {
        assert!(matches!(
            get_converter("custom"),
            Err(HalError::ImproperlyConfigured(_))
        ));
    }
}
