//! # django-hal-core
//!
//! Core types shared by every django-hal crate. This crate has no dependency on
//! the URL layer or the serializers and provides the foundation for both.
//!
//! ## Modules
//!
//! - [`error`] - Error type and result alias
//! - [`settings`] - Serializer settings
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{HalError, HalResult};
pub use settings::Settings;
