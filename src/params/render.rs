use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{FractalError, FractalResult};
use crate::params::check_range;
use crate::scene::camera::OrbitCamera;

/// Upper bound on particles drawn per frame.
pub const MAX_PARTICLES: u32 = 100_000;

/// Per-frame render controls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParameters {
    /// Angular speed multiplier, in `[0.1, 5]`.
    pub animation_speed: f64,
    /// World-space edge length of each particle, in `[0.01, 0.1]`.
    pub element_size: f64,
    /// Uniform scale applied to curve positions, in `[0.5, 2]`.
    pub depth: f64,
    /// Number of particles sampled along the curve.
    pub particle_count: u32,
    /// Clear color for the frame.
    pub background: Rgba8,
    /// Orbit camera.
    pub camera: OrbitCamera,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            animation_speed: 1.0,
            element_size: 0.04,
            depth: 1.0,
            particle_count: 5000,
            background: Rgba8::BLACK,
            camera: OrbitCamera::default(),
        }
    }
}

impl RenderParameters {
    /// Check declared numeric ranges.
    pub fn validate(&self) -> FractalResult<()> {
        check_range("render.animation_speed", self.animation_speed, 0.1, 5.0)?;
        check_range("render.element_size", self.element_size, 0.01, 0.1)?;
        check_range("render.depth", self.depth, 0.5, 2.0)?;
        if self.particle_count == 0 || self.particle_count > MAX_PARTICLES {
            return Err(FractalError::validation(format!(
                "render.particle_count must be in [1, {MAX_PARTICLES}], got {}",
                self.particle_count
            )));
        }
        self.camera.validate()
    }
}
