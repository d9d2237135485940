//! Settings for django-hal.
//!
//! [`Settings`] holds the options that shape generated HAL documents. There is
//! no global instance; callers pass a `&Settings` through the serializer
//! context.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The complete set of django-hal settings.
///
/// # Examples
///
/// ```
/// use django_hal_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.absolute_urls);
/// assert_eq!(settings.default_resource_name, "items");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (selects the pretty log format).
    pub debug: bool,

    // ── Links ────────────────────────────────────────────────────────

    /// Whether reversed paths become absolute URLs when a request is present.
    pub absolute_urls: bool,
    /// Host used for absolute URLs when the request carries no host.
    pub default_host: String,
    /// Whether a collection's self link carries the request's query string.
    pub pass_through_query: bool,
    /// The `_embedded` key used when a list configuration names none.
    pub default_resource_name: String,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            absolute_urls: true,
            default_host: "localhost".to_string(),
            pass_through_query: true,
            default_resource_name: "items".to_string(),
            log_level: "info".to_string(),
            extra: HashMap::new(),
        }
    }
}
