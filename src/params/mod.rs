//! Shared parameter state read by the renderer and the capture loop every tick.

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{FractalError, FractalResult};

/// Curve blend weights and method.
pub mod blend;
/// Palette and custom color settings.
pub mod color;
/// Animation, particle and camera settings.
pub mod render;

pub use blend::{BlendMethod, BlendParameters, CurveFamily};
pub use color::{ColorInterpolation, ColorParameters, CustomColors, Palette};
pub use render::RenderParameters;

/// Immutable snapshot of everything the renderer needs for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    /// Curve blend weights and method.
    pub blend: BlendParameters,
    /// Palette or custom colors.
    pub color: ColorParameters,
    /// Speed, size, depth, background and camera.
    pub render: RenderParameters,
}

impl SceneParams {
    /// Parse and validate a JSON parameter document.
    pub fn from_json(json: &str) -> FractalResult<Self> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| FractalError::validation(format!("invalid scene params: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse and validate a JSON parameter file.
    pub fn from_path(path: impl AsRef<Path>) -> FractalResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene params '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> FractalResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FractalError::validation(format!("failed to serialize params: {e}")))
    }

    /// Check every declared range and the blend invariant.
    pub fn validate(&self) -> FractalResult<()> {
        self.blend.validate()?;
        self.color.validate()?;
        self.render.validate()
    }
}

pub(crate) fn check_range(name: &str, v: f64, lo: f64, hi: f64) -> FractalResult<()> {
    if !v.is_finite() || v < lo || v > hi {
        return Err(FractalError::validation(format!(
            "{name} must be in [{lo}, {hi}], got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/params/scene.rs"]
mod tests;
