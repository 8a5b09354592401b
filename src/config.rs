//! Style configuration for generated glyphs
//!
//! Loads settings from ~/.jumpmark.toml (or %USERPROFILE%\.jumpmark.toml on Windows)
//!
//! Format: TOML with a `[placeholder]` and a `[highlight]` table.
//! Missing keys fall back to their defaults.
//!
//! Example:
//! ```text
//! # jumpmark configuration
//! [placeholder]
//! width = 12
//! height = 14
//! background-color = "#ffb400"
//! upper-case = true
//! characters = ["a", "s", "d", "f"]
//!
//! [highlight]
//! width = 8
//! offset-y = 1
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Full style snapshot. Replaced wholesale on every configuration load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StyleConfig {
    /// Single-character jump glyphs
    pub placeholder: PlaceholderStyle,
    /// Multi-character highlight bars
    pub highlight: HighlightStyle,
}

/// Placeholder glyph settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlaceholderStyle {
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
    /// Fill color of the rounded background
    pub background_color: String,
    /// Text color
    pub color: String,
    pub font_family: String,
    pub font_weight: String,
    pub font_size: u32,
    /// Text anchor x
    pub text_pos_x: u32,
    /// Text anchor y (baseline)
    pub text_pos_y: u32,
    /// Render labels upper-cased
    pub upper_case: bool,
    /// Character codes a placeholder can be labelled with
    pub characters: Vec<char>,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            width: 12,
            height: 14,
            background_color: "yellow".to_string(),
            color: "black".to_string(),
            font_family: "Consolas".to_string(),
            font_weight: "bold".to_string(),
            font_size: 14,
            text_pos_x: 2,
            text_pos_y: 12,
            upper_case: false,
            characters: ('a'..='z').collect(),
        }
    }
}

/// Highlight bar settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HighlightStyle {
    /// Width of one highlighted character
    pub width: u32,
    /// Bar height
    pub height: u32,
    pub background_color: String,
    /// Viewbox origin x
    pub offset_x: u32,
    /// Viewbox origin y
    pub offset_y: u32,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            width: 8,
            height: 14,
            background_color: "yellow".to_string(),
            offset_x: 0,
            offset_y: 0,
        }
    }
}

impl StyleConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".jumpmark.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".jumpmark.toml"))
        }
    }

    /// Load configuration from the default path.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded style config");
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: StyleConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the glyph builder relies on
    pub fn validate(&self) -> Result<()> {
        let placeholder = &self.placeholder;
        if placeholder.characters.is_empty() {
            return Err(Error::InvalidConfig(
                "placeholder.characters must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for &ch in &placeholder.characters {
            if !seen.insert(ch) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate placeholder character '{}'",
                    ch
                )));
            }
        }

        if placeholder.width == 0 || placeholder.height == 0 {
            return Err(Error::InvalidConfig(
                "placeholder width and height must be positive".to_string(),
            ));
        }

        if self.highlight.width == 0 || self.highlight.height == 0 {
            return Err(Error::InvalidConfig(
                "highlight width and height must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
