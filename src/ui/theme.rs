//! Color themes and ANSI escape helpers.
//!
//! Built-in themes are Catppuccin Mocha (default) and Latte. A custom theme is
//! a TOML file with the same shape:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! # header_bg is optional
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! new_tag_fg = "#f9e2af"
//! toast_success_fg = "#a6e3a1"
//! toast_warning_fg = "#f38ba8"
//! ```

use crate::domain::error::{ActionboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_THEME: &str = "catppuccin-mocha";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every styled element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, secondary columns, placeholders.
    pub text_dim: String,

    pub border: String,

    /// Frame of the search box and of dialogs.
    pub search_bar_border: String,
    /// Search term occurrences in ticker and company columns.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    pub new_tag_fg: String,

    pub toast_success_fg: String,
    /// Also used for validation messages.
    pub toast_warning_fg: String,
}

impl Theme {
    /// Loads a built-in theme, `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        match toml::from_str(source) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::error!(theme = name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a custom theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ActionboardError::Io`] if the file cannot be read and
    /// [`ActionboardError::Config`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| ActionboardError::Config(format!("invalid theme file: {e}")))
    }

    /// Parses `#rrggbb`; anything malformed renders white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        const FALLBACK: (u8, u8, u8) = (255, 255, 255);

        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return FALLBACK;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Some(r), Some(g), Some(b)) => (r, g, b),
            _ => FALLBACK,
        }
    }

    /// 24-bit foreground escape sequence.
    ///
    /// ```
    /// use actionboard::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#cdd6f4"), "\u{1b}[38;2;205;214;244m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Never in practice: the built-in theme is covered by tests.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        for name in ["catppuccin-mocha", "catppuccin-latte"] {
            assert_eq!(Theme::from_name(name).unwrap().name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn custom_theme_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(include_str!("../../themes/catppuccin-latte.toml").as_bytes())
            .unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.colors.header_bg.as_deref(), Some("#eff1f5"));
    }

    #[test]
    fn incomplete_theme_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"\n[colors]\nheader_fg = \"#000000\"\n")
            .unwrap();

        assert!(matches!(
            Theme::from_file(file.path()),
            Err(ActionboardError::Config(_))
        ));
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("#12"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("zzzzzz"), "\u{1b}[48;2;255;255;255m");
    }
}
