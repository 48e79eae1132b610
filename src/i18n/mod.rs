//! Localization.
//!
//! Dictionaries are TOML resources compiled into the plugin, one per
//! [`Locale`]. Components never hardcode user-facing text; they read it from the
//! [`Dictionary`] held in the application state.

pub mod dictionary;
pub mod locale;

pub use dictionary::{ActionTypeLabels, Dictionary, KeyHints};
pub use locale::Locale;
