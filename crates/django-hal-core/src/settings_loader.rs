//! Settings loading from configuration files and the environment.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (keys present in the file override defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `DJANGO_HAL_DEBUG` | `debug` |
//! | `DJANGO_HAL_LOG_LEVEL` | `log_level` |
//! | `DJANGO_HAL_ABSOLUTE_URLS` | `absolute_urls` |
//! | `DJANGO_HAL_DEFAULT_HOST` | `default_host` |
//! | `DJANGO_HAL_PASS_THROUGH_QUERY` | `pass_through_query` |
//! | `DJANGO_HAL_DEFAULT_RESOURCE_NAME` | `default_resource_name` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use django_hal_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/hal.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::HalError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, HalError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| HalError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    from_json_value(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, HalError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, HalError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, HalError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| HalError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    from_json_value(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, HalError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Boolean variables accept "true"/"1"/"yes" (case-insensitive) as true and
/// anything else as false.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("DJANGO_HAL_DEBUG") {
        settings.debug = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("DJANGO_HAL_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("DJANGO_HAL_ABSOLUTE_URLS") {
        settings.absolute_urls = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("DJANGO_HAL_DEFAULT_HOST") {
        settings.default_host = val;
    }

    if let Ok(val) = std::env::var("DJANGO_HAL_PASS_THROUGH_QUERY") {
        settings.pass_through_query = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("DJANGO_HAL_DEFAULT_RESOURCE_NAME") {
        settings.default_resource_name = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path, format: &str) -> Result<String, HalError> {
    std::fs::read_to_string(path).map_err(|e| {
        HalError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

/// Merges a parsed configuration document over the default settings.
fn from_json_value(value: serde_json::Value, format: &str) -> Result<Settings, HalError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        HalError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        HalError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = match base_map.remove(&key) {
                    Some(base_v) => merge_json(base_v, override_v),
                    None => override_v,
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
