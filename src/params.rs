//! The galaxy parameter set and the UI ranges declared for each field.
//!
//! There is exactly one [`GalaxyParams`] in a running viewer. The control
//! panel edits it in place and the generator reads it by reference.

use crate::color::Color;
use crate::error::ColorParseError;

/// Parameters of the procedural galaxy.
///
/// Ranges in [`ParamField::range`] are only used to clamp UI widgets;
/// nothing here validates them.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyParams {
    /// Number of particles.
    pub count: u32,
    /// On-screen point size (world units at distance 1 with attenuation).
    pub size: f32,
    /// Maximum galaxy radius.
    pub radius: f32,
    /// Number of spiral arms. Must be at least 1.
    pub branches: u32,
    /// Radians of angular twist per unit radius.
    pub spin: f32,
    /// Jitter magnitude scale.
    pub randomness: f32,
    /// Jitter sharpness. Higher values pull jitter toward zero.
    pub randomness_power: f32,
    /// Color at the galaxy core (hex or CSS name).
    pub inside_color: String,
    /// Color at the galaxy rim (hex or CSS name).
    pub outside_color: String,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: "#ff6030".to_string(),
            outside_color: "#1b3984".to_string(),
        }
    }
}

impl GalaxyParams {
    /// Parse both gradient endpoints.
    pub fn colors(&self) -> Result<(Color, Color), ColorParseError> {
        Ok((self.inside_color.parse()?, self.outside_color.parse()?))
    }
}

/// Identifies one field of [`GalaxyParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    RandomnessPower,
    InsideColor,
    OutsideColor,
}

/// Declared slider bounds for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// How a field is presented in the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Integer,
    Float,
    Color,
}

impl ParamField {
    /// All fields, in panel order.
    pub const ALL: [ParamField; 9] = [
        ParamField::Count,
        ParamField::Size,
        ParamField::Radius,
        ParamField::Branches,
        ParamField::Spin,
        ParamField::Randomness,
        ParamField::RandomnessPower,
        ParamField::InsideColor,
        ParamField::OutsideColor,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ParamField::Count => "count",
            ParamField::Size => "size",
            ParamField::Radius => "radius",
            ParamField::Branches => "branches",
            ParamField::Spin => "spin",
            ParamField::Randomness => "randomness",
            ParamField::RandomnessPower => "randomnessPower",
            ParamField::InsideColor => "insideColor",
            ParamField::OutsideColor => "outsideColor",
        }
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            ParamField::Count | ParamField::Branches => ParamKind::Integer,
            ParamField::InsideColor | ParamField::OutsideColor => ParamKind::Color,
            _ => ParamKind::Float,
        }
    }

    /// Slider bounds, or `None` for free-form color fields.
    pub fn range(&self) -> Option<ParamRange> {
        match self {
            ParamField::Count => Some(ParamRange::new(100.0, 1_000_000.0, 100.0)),
            ParamField::Size => Some(ParamRange::new(0.001, 0.1, 0.001)),
            ParamField::Radius => Some(ParamRange::new(0.01, 20.0, 0.01)),
            ParamField::Branches => Some(ParamRange::new(2.0, 8.0, 1.0)),
            ParamField::Spin => Some(ParamRange::new(-5.0, 5.0, 0.01)),
            ParamField::Randomness => Some(ParamRange::new(0.0, 2.0, 0.01)),
            ParamField::RandomnessPower => Some(ParamRange::new(1.0, 10.0, 0.001)),
            ParamField::InsideColor | ParamField::OutsideColor => None,
        }
    }
}
