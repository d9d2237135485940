//! Core error type for django-hal.
//!
//! [`HalError`] covers the small set of conditions that can stop a HAL
//! document from being built: a route that cannot be reversed, a link or
//! serializer configuration that does not fit the object being serialized,
//! settings that cannot be loaded, and field serialization failures.

use thiserror::Error;

/// The primary error type for django-hal.
///
/// Only [`HalError::NoReverseMatch`] is ever treated as recoverable: a related
/// link whose route does not reverse is dropped from `_links`, while the same
/// failure on a self link aborts the document. Every other variant indicates a
/// configuration defect and is surfaced to the caller unchanged.
#[derive(Error, Debug)]
pub enum HalError {
    // ── URL reversal ─────────────────────────────────────────────────

    /// No configured route matches the given name and keyword arguments.
    #[error("No reverse match: {0}")]
    NoReverseMatch(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A link, route, or serializer is configured in a way that cannot work
    /// for the object being serialized.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A settings file or environment value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// A field transformer or JSON conversion failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl HalError {
    /// Returns `true` if a caller may substitute "no link" for this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoReverseMatch(_))
    }

    /// Returns `true` if this error signals a configuration defect.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ImproperlyConfigured(_) | Self::ConfigurationError(_)
        )
    }
}

impl From<serde_json::Error> for HalError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, HalError>`.
pub type HalResult<T> = Result<T, HalError>;
