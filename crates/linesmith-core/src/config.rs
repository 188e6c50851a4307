//! Editor configuration: every tunable constant of the editor.

use crate::shapes::SerializableColor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunable constants of the editor.
///
/// Every field has a default, so a config file only needs to list what it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Margin kept free along every canvas edge while dragging.
    pub canvas_inset: f64,
    /// Stroke width used when hit testing lines (selection and insertion).
    pub hit_stroke_width: f64,
    /// Maximum distance from a segment for a double-click to insert an elbow.
    pub insert_threshold: f64,

    /// Radius of the circular point handles.
    pub handle_radius: f64,
    /// Press distance that grabs a point handle.
    pub handle_hit_radius: f64,
    /// Hover distance that shows the grab cursor over a point.
    pub hover_grab_radius: f64,

    /// Offset of an elbow's delete glyph from the elbow.
    pub delete_offset: (f64, f64),
    pub delete_radius: f64,
    pub delete_hit_radius: f64,

    /// Distance of the icon row above the line's top edge.
    pub icon_offset_y: f64,
    /// Horizontal distance between neighbouring icons.
    pub icon_spacing: f64,
    pub icon_size: f64,
    pub icon_hit_radius: f64,

    /// Extra width of the highlight drawn under active or hovered lines.
    pub highlight_extra_width: f64,
    pub accent_color: SerializableColor,
    pub delete_color: SerializableColor,

    /// Color and width of newly added lines.
    pub default_color: SerializableColor,
    pub default_width: u32,

    /// Colors offered by the color palette menu.
    pub palette: Vec<SerializableColor>,
    /// Widths offered by the width dropdown.
    pub width_options: Vec<u32>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_inset: 5.0,
            hit_stroke_width: 20.0,
            insert_threshold: 30.0,
            handle_radius: 6.0,
            handle_hit_radius: 15.0,
            hover_grab_radius: 10.0,
            delete_offset: (15.0, -15.0),
            delete_radius: 8.0,
            delete_hit_radius: 10.0,
            icon_offset_y: 45.0,
            icon_spacing: 40.0,
            icon_size: 30.0,
            icon_hit_radius: 15.0,
            highlight_extra_width: 4.0,
            accent_color: SerializableColor::rgb(0xc0, 0x31, 0xff),
            delete_color: SerializableColor::rgb(0xef, 0x44, 0x44),
            default_color: SerializableColor::rgb(0x3b, 0x82, 0xf6),
            default_width: 6,
            palette: default_palette(),
            width_options: (1..=50).step_by(2).collect(),
        }
    }
}

fn default_palette() -> Vec<SerializableColor> {
    vec![
        SerializableColor::rgb(0x00, 0x00, 0x00), // black
        SerializableColor::rgb(0x64, 0x74, 0x8b), // slate-500
        SerializableColor::rgb(0xef, 0x44, 0x44), // red-500
        SerializableColor::rgb(0xf9, 0x73, 0x16), // orange-500
        SerializableColor::rgb(0xea, 0xb3, 0x08), // yellow-500
        SerializableColor::rgb(0x22, 0xc5, 0x5e), // green-500
        SerializableColor::rgb(0x14, 0xb8, 0xa6), // teal-500
        SerializableColor::rgb(0x3b, 0x82, 0xf6), // blue-500
        SerializableColor::rgb(0x8b, 0x5c, 0xf6), // violet-500
        SerializableColor::rgb(0xec, 0x48, 0x99), // pink-500
    ]
}

impl EditorConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        let non_negative = [
            ("canvas_inset", self.canvas_inset),
            ("hit_stroke_width", self.hit_stroke_width),
            ("insert_threshold", self.insert_threshold),
            ("handle_radius", self.handle_radius),
            ("handle_hit_radius", self.handle_hit_radius),
            ("hover_grab_radius", self.hover_grab_radius),
            ("delete_radius", self.delete_radius),
            ("delete_hit_radius", self.delete_hit_radius),
            ("icon_size", self.icon_size),
            ("icon_hit_radius", self.icon_hit_radius),
            ("highlight_extra_width", self.highlight_extra_width),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.default_width == 0 {
            return Err(ConfigError::Invalid("default_width must be positive".into()));
        }
        if self.width_options.contains(&0) {
            return Err(ConfigError::Invalid("width_options must be positive".into()));
        }
        Ok(())
    }
}
