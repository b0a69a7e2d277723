//! Theme system for node styling
//!
//! Maps a node's model type to a border color and an optional icon. Themes
//! are injected into the layout engine at construction, so independent
//! diagrams can carry independent palettes; they can be loaded from TOML
//! or built in code.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::surface::NodeVisual;

/// Errors that can occur when loading or parsing themes
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("failed to read theme file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse theme TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A theme mapping model types to visual treatments
#[derive(Debug, Clone)]
pub struct Theme {
    /// Optional name for the theme
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Model type -> border color
    pub colors: HashMap<String, String>,
    /// Model type -> icon resource
    pub icons: HashMap<String, String>,
}

/// TOML structure for deserializing themes
#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    colors: HashMap<String, String>,
    #[serde(default)]
    icons: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Rotation palette for model types the theme does not name
const FALLBACK_CYCLE: [&str; 6] = [
    "#2196f3", "#4caf50", "#ff9800", "#9c27b0", "#00bcd4", "#795548",
];

/// Default palette for common model relationship kinds
const DEFAULT_THEME: &str = r##"
[colors]
model = "#eec900"
fusion = "#ff4500"
subscription = "#a020f0"
grant = "#bfac00"
filter = "#7cbf00"
application = "#76ee00"
"##;

impl Theme {
    /// Load a theme from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a theme from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        Ok(Theme {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
            icons: parsed.icons,
        })
    }

    /// Border color for a model type, if the theme names one
    pub fn color(&self, model_type: &str) -> Option<&str> {
        self.colors.get(model_type).map(|s| s.as_str())
    }

    /// Icon resource for a model type, if the theme names one
    pub fn icon(&self, model_type: &str) -> Option<&str> {
        self.icons.get(model_type).map(|s| s.as_str())
    }

    /// Resolve the full visual treatment for a model type.
    ///
    /// Unknown types get a color from a fixed rotation palette, picked by
    /// a stable hash of the type name so the same type keeps the same
    /// color across diagrams and runs.
    pub fn visual(&self, model_type: &str) -> NodeVisual {
        let color = self
            .color(model_type)
            .unwrap_or_else(|| fallback_color(model_type))
            .to_string();
        NodeVisual {
            color,
            icon: self.icon(model_type).map(str::to_string),
        }
    }
}

fn fallback_color(model_type: &str) -> &'static str {
    // FNV-1a keeps the pick stable without HashMap's per-process seeding
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in model_type.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    FALLBACK_CYCLE[(hash % FALLBACK_CYCLE.len() as u64) as usize]
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_str(DEFAULT_THEME).expect("Default theme should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert!(theme.colors.contains_key("model"));
        assert!(theme.colors.contains_key("application"));
        assert!(theme.icons.is_empty());
    }

    #[test]
    fn test_resolve_existing_type() {
        let theme = Theme::default();
        assert_eq!(theme.color("model"), Some("#eec900"));
        assert_eq!(theme.color("filter"), Some("#7cbf00"));
    }

    #[test]
    fn test_resolve_missing_type() {
        let theme = Theme::default();
        assert_eq!(theme.color("nonexistent"), None);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let theme = Theme::default();
        let first = theme.visual("mystery");
        let second = theme.visual("mystery");
        assert_eq!(first, second);
        assert!(FALLBACK_CYCLE.contains(&first.color.as_str()));
    }

    #[test]
    fn test_parse_toml_with_metadata_and_icons() {
        let toml_str = r##"
[metadata]
name = "Test Theme"
description = "A test theme"

[colors]
service = "#000000"

[icons]
service = "icons/service.png"
"##;
        let theme = Theme::from_str(toml_str).expect("Should parse");
        assert_eq!(theme.name, Some("Test Theme".to_string()));
        assert_eq!(theme.description, Some("A test theme".to_string()));
        assert_eq!(theme.color("service"), Some("#000000"));
        assert_eq!(theme.icon("service"), Some("icons/service.png"));
    }

    #[test]
    fn test_parse_toml_without_metadata() {
        let toml_str = r##"
[colors]
service = "#111111"
"##;
        let theme = Theme::from_str(toml_str).expect("Should parse");
        assert_eq!(theme.name, None);
        assert_eq!(theme.color("service"), Some("#111111"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        let result = Theme::from_str(invalid);
        assert!(result.is_err());
    }

    #[test]
    fn test_visual_carries_icon() {
        let toml_str = r##"
[colors]
db = "#123456"

[icons]
db = "db.svg"
"##;
        let theme = Theme::from_str(toml_str).expect("Should parse");
        let visual = theme.visual("db");
        assert_eq!(visual.color, "#123456");
        assert_eq!(visual.icon.as_deref(), Some("db.svg"));
    }
}
