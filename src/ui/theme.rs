//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system, supporting both built-in
//! themes and custom themes loaded from TOML files. It provides utilities for
//! converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `default`: Dark theme (default)
//! - `light`: Light theme for bright terminals
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#89b4fa"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! badge_fg = "#cba6f7"
//! busy_fg = "#fab387"
//! success_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! modal_border = "#f5c2e7"
//! ```
//!
//! # Example
//!
//! ```rust
//! use notehub::ui::theme::Theme;
//!
//! let theme = Theme::from_name("light").unwrap();
//! let line = format!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! assert_eq!(theme.name, "light");
//! assert!(line.starts_with('\u{1b}'));
//! ```

use crate::domain::error::{NotehubError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#cdd6f4").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,

    /// Tag and rating badge color.
    pub badge_fg: String,
    /// Color of rows with a mutation in flight.
    pub busy_fg: String,

    /// Success notifications.
    pub success_fg: String,
    /// Error notifications and the error status line.
    pub error_fg: String,

    /// Border of the form and detail overlays.
    pub modal_border: String,
}

impl Theme {
    /// Names accepted by [`Theme::from_name`].
    pub const BUILT_IN: [&'static str; 2] = ["default", "light"];

    /// Loads a built-in theme by name.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "default" => include_str!("../../themes/default.toml"),
            "light" => include_str!("../../themes/light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`NotehubError::Theme`] if the file cannot be read or the TOML
    /// content cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| NotehubError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| NotehubError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Resolves a theme setting: a built-in name, or else a path to a TOML
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`NotehubError::Theme`] if `spec` is neither a built-in name
    /// nor a readable theme file.
    pub fn resolve(spec: &str) -> Result<Self> {
        Self::from_name(spec).map_or_else(|| Self::from_file(spec), Ok)
    }

    /// Palette used if the built-in default ever fails to parse: plain
    /// terminal colors only.
    fn monochrome() -> Self {
        let white = "#ffffff".to_string();
        let grey = "#808080".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: white.clone(),
                header_bg: None,
                text_normal: white.clone(),
                text_dim: grey.clone(),
                border: grey.clone(),
                search_bar_border: white.clone(),
                match_highlight_fg: "#000000".to_string(),
                match_highlight_bg: white.clone(),
                empty_state_fg: white.clone(),
                badge_fg: white.clone(),
                busy_fg: grey,
                success_fg: white.clone(),
                error_fg: white.clone(),
                modal_border: white,
            },
        }
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use notehub::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence (`\x1b[2m`).
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the built-in `default` theme.
    fn default() -> Self {
        Self::from_name("default").unwrap_or_else(Self::monochrome)
    }
}
