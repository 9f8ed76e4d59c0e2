use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::FractalResult;
use crate::params::check_range;

/// Fixed cosine palettes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    /// Cool blue-violet rainbow.
    #[default]
    Set1,
    /// Warm yellow-green cycle.
    Set2,
    /// Pastel magenta cycle.
    Set3,
}

/// Interpolation between the three custom key colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorInterpolation {
    /// Straight linear ramp.
    #[default]
    Linear,
    /// Smoothstepped ramp.
    Smooth,
}

/// Explicit start/middle/end colors that override the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomColors {
    /// Color at the start of the curve.
    pub start: Rgba8,
    /// Color at the middle of the curve.
    pub middle: Rgba8,
    /// Color at the end of the curve.
    pub end: Rgba8,
}

impl Default for CustomColors {
    fn default() -> Self {
        Self {
            start: Rgba8::BLACK,
            middle: Rgba8::opaque(0x7F, 0x7F, 0x7F),
            end: Rgba8::WHITE,
        }
    }
}

/// Coloring controls. `use_custom_colors` selects between `palette` and `custom`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorParameters {
    /// Active palette when custom colors are off.
    pub palette: Palette,
    /// Key colors used when custom colors are on.
    pub custom: CustomColors,
    /// Toggle between the palette and the custom key colors.
    pub use_custom_colors: bool,
    /// Interpolation for custom key colors.
    pub interpolation: ColorInterpolation,
    /// Speed of the color cycle over time, in `[0.1, 5]`.
    pub animation_speed: f64,
}

impl Default for ColorParameters {
    fn default() -> Self {
        Self {
            palette: Palette::Set1,
            custom: CustomColors::default(),
            use_custom_colors: false,
            interpolation: ColorInterpolation::Linear,
            animation_speed: 1.0,
        }
    }
}

impl ColorParameters {
    /// Check declared numeric ranges.
    pub fn validate(&self) -> FractalResult<()> {
        check_range("color.animation_speed", self.animation_speed, 0.1, 5.0)
    }
}
