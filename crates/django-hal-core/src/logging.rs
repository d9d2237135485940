//! Logging integration for django-hal.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-serialization
//! spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info", "warn",
/// "error"). In debug mode a pretty, human-readable format is used; otherwise
/// a structured JSON format is used. Calling this more than once is harmless:
/// the first installed subscriber wins.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span covering the serialization of one resource or
/// collection.
///
/// # Examples
///
/// ```
/// use django_hal_core::logging::serialization_span;
///
/// let span = serialization_span("user");
/// let _guard = span.enter();
/// tracing::debug!("building document");
/// ```
pub fn serialization_span(resource: &str) -> tracing::Span {
    tracing::info_span!("hal_serialize", resource = resource)
}
