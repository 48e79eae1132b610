//! Actionboard: a Zellij plugin for browsing corporate actions and processing
//! client holdings.
//!
//! The plugin shows a read-only dataset of corporate action announcements:
//! - Corporate Actions: every announcement, searchable and filterable, five per page
//! - Holding Processing: actions of the holding types, split into pending and completed
//! - Holding Detail: one action with its affected client holdings and a confirm dialog
//! - CSV export of the current result list
//! - English and Chinese interface text, switchable at runtime

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point, key mapping
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, toasts, overlays                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Engine        │   │ Worker Layer  │
//! │ (ui/)         │   │ (engine/)     │   │ (worker/)     │
//! │ - Rendering   │   │ - Filter/sort │   │ - Queries     │
//! │ - Theming     │   │ - Pagination  │   │ - CSV writes  │
//! │ - Components  │   │               │   │ - KV flag     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Storage, Export, i18n, Infrastructure      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← OTLP JSON to file
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/actionboard.wasm" {
//!         locale "zh"
//!         theme "catppuccin-mocha"
//!         export_dir "~/exports"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use actionboard::{handle_event, initialize, Action, Config, Event};
//! use actionboard::worker::WorkerMessage;
//!
//! let mut state = initialize(&Config::default())?;
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: vec![] })?;
//! assert!(matches!(actions[0], Action::PostToWorker(WorkerMessage::Initialize { .. })));
//! # Ok::<(), actionboard::ActionboardError>(())
//! ```

pub mod app;
pub mod domain;
pub mod engine;
pub mod export;
pub mod i18n;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, View};
pub use domain::{ActionRecord, ActionType, ActionboardError, Result};
pub use i18n::{Dictionary, Locale};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Directory exports go to when `export_dir` is not configured.
pub const DEFAULT_EXPORT_DIR: &str = "/host";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface language at startup. Default: English.
    pub locale: Locale,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// Where CSV exports are written, with `~` already mapped to `/host`.
    pub export_dir: String,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            theme_name: None,
            theme_file: None,
            export_dir: DEFAULT_EXPORT_DIR.to_string(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Reads `locale`, `theme`, `theme_file`, `export_dir` and `trace_level`.
    ///
    /// Unknown locales fall back to English and blank values count as unset.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use actionboard::{Config, Locale};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("locale".to_string(), "zh-CN".to_string());
    /// map.insert("export_dir".to_string(), "~/exports".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.locale, Locale::Zh);
    /// assert_eq!(config.export_dir, "/host/exports");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let locale = value("locale")
            .and_then(|code| Locale::from_code(&code))
            .unwrap_or_default();

        let export_dir = value("export_dir").map_or_else(
            || DEFAULT_EXPORT_DIR.to_string(),
            |dir| infrastructure::expand_tilde(dir.trim_end_matches('/')),
        );

        Self {
            locale,
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            export_dir,
            trace_level: value("trace_level"),
        }
    }
}

/// Builds the initial [`AppState`]: theme, dictionary and export directory.
///
/// A theme that cannot be loaded falls back to the default theme.
///
/// # Errors
///
/// Returns [`ActionboardError::Dictionary`] if the bundled dictionary for
/// `config.locale` is incomplete.
pub fn initialize(config: &Config) -> Result<AppState> {
    tracing::debug!(locale = %config.locale, "initializing actionboard plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let dictionary = Dictionary::load(config.locale)?;

    Ok(AppState::new(
        theme,
        config.locale,
        dictionary,
        config.export_dir.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_for_missing_and_blank_values() {
        let mut map = BTreeMap::new();
        map.insert("locale".to_string(), "fr".to_string());
        map.insert("theme".to_string(), "  ".to_string());

        let config = Config::from_zellij(&map);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.theme_name, None);
        assert_eq!(config.export_dir, DEFAULT_EXPORT_DIR);
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn unknown_theme_still_initializes() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            locale: Locale::Zh,
            ..Config::default()
        };
        let state = initialize(&config).unwrap();
        assert_eq!(state.locale, Locale::Zh);
        assert_eq!(state.export_dir, "/host");
    }
}
