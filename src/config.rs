//! Viewer configuration.
//!
//! Window and camera settings that can be overridden from a JSON file.
//! Every field has a default, so a partial file is fine:
//!
//! ```json
//! { "title": "Andromeda", "width": 1600, "height": 900, "max_pixel_ratio": 1.0 }
//! ```
//!
//! Galaxy parameters are not part of the configuration; they always start
//! from [`GalaxyParams::default`](crate::params::GalaxyParams::default).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;
use crate::viewport::DEFAULT_MAX_PIXEL_RATIO;

/// Environment variable naming a config file when no argument is given.
pub const CONFIG_ENV: &str = "GALAXY_CONFIG";

/// Window and camera settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial logical window width.
    pub width: f64,
    /// Initial logical window height.
    pub height: f64,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub camera_position: [f32; 3],
    pub damping: f32,
    pub max_pixel_ratio: f64,
    /// Clear color, in any form the color parser accepts.
    pub background: String,
    pub show_panel: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Galaxy".into(),
            width: 1280.0,
            height: 720.0,
            fov: 75.0,
            camera_position: [5.0, 5.0, 0.0],
            damping: 0.05,
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
            background: "#000000".into(),
            show_panel: true,
        }
    }
}

impl ViewerConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for the binary.
    ///
    /// The first command-line argument wins, then [`CONFIG_ENV`]; without
    /// either the defaults are used.
    pub fn from_args_or_env() -> Result<Self, ConfigError> {
        let path = std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(CONFIG_ENV));
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov must be between 0 and 180 degrees, got {}",
                self.fov
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigError::Invalid(format!(
                "damping must be within 0..=1, got {}",
                self.damping
            )));
        }
        if !(self.max_pixel_ratio >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "max_pixel_ratio must be at least 1, got {}",
                self.max_pixel_ratio
            )));
        }
        self.background_color()?;
        Ok(())
    }

    pub fn background_color(&self) -> Result<Color, ConfigError> {
        self.background
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("background: {}", e)))
    }

    pub fn camera_position(&self) -> glam::Vec3 {
        glam::Vec3::from_array(self.camera_position)
    }
}
