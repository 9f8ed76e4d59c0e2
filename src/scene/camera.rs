use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::foundation::core::Resolution;
use crate::foundation::error::{FractalError, FractalResult};
use crate::params::check_range;

const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;
const MAX_ELEVATION_DEG: f64 = 89.0;

/// Orbit camera looking at the origin.
///
/// Azimuth `0` and elevation `0` put the eye on the +z axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitCamera {
    /// Rotation around the y axis, in degrees.
    pub azimuth_deg: f64,
    /// Rotation above the xz plane, in degrees (`[-89, 89]`).
    pub elevation_deg: f64,
    /// Eye distance from the origin.
    pub distance: f64,
    /// Vertical field of view, in degrees.
    pub fov_deg: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            azimuth_deg: 0.0,
            elevation_deg: 0.0,
            distance: 3.0,
            fov_deg: 75.0,
        }
    }
}

impl OrbitCamera {
    /// Check declared ranges.
    pub fn validate(&self) -> FractalResult<()> {
        if !self.azimuth_deg.is_finite() {
            return Err(FractalError::validation("camera.azimuth_deg must be finite"));
        }
        check_range(
            "camera.elevation_deg",
            self.elevation_deg,
            -MAX_ELEVATION_DEG,
            MAX_ELEVATION_DEG,
        )?;
        check_range("camera.distance", self.distance, 0.2, 50.0)?;
        check_range("camera.fov_deg", self.fov_deg, 10.0, 170.0)
    }

    /// Rotate around the target; elevation is clamped short of the poles.
    pub fn orbit(&mut self, d_azimuth_deg: f64, d_elevation_deg: f64) {
        self.azimuth_deg = (self.azimuth_deg + d_azimuth_deg).rem_euclid(360.0);
        self.elevation_deg =
            (self.elevation_deg + d_elevation_deg).clamp(-MAX_ELEVATION_DEG, MAX_ELEVATION_DEG);
    }

    /// Scale the eye distance, clamped to the accepted range.
    pub fn zoom(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.distance = (self.distance * factor).clamp(0.2, 50.0);
        }
    }

    /// World-space eye position.
    pub fn eye(&self) -> Vec3 {
        let az = self.azimuth_deg.to_radians() as f32;
        let el = self.elevation_deg.to_radians() as f32;
        let d = self.distance as f32;
        Vec3::new(el.cos() * az.sin(), el.sin(), el.cos() * az.cos()) * d
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    /// View-to-clip transform for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            (self.fov_deg as f32).to_radians(),
            aspect,
            Z_NEAR,
            Z_FAR,
        )
    }

    /// Bind the camera to a viewport for projecting many points.
    pub fn viewport(&self, resolution: Resolution) -> Viewport {
        let view = self.view_matrix();
        let proj = self.projection_matrix(resolution.aspect());
        let half_fov = (self.fov_deg as f32).to_radians() * 0.5;
        Viewport {
            view,
            view_proj: proj * view,
            width: resolution.width as f32,
            height: resolution.height as f32,
            focal_px: resolution.height as f32 * 0.5 / half_fov.tan(),
        }
    }
}

/// A point projected into pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Pixel x, origin at the left edge.
    pub x: f64,
    /// Pixel y, origin at the top edge.
    pub y: f64,
    /// Distance in front of the eye along the view axis.
    pub view_depth: f32,
}

/// Camera matrices bound to a pixel viewport.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    view: Mat4,
    view_proj: Mat4,
    width: f32,
    height: f32,
    focal_px: f32,
}

impl Viewport {
    /// Project a world-space point; `None` when it is behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<Projected> {
        let view_depth = -(self.view * world.extend(1.0)).z;
        if view_depth <= Z_NEAR {
            return None;
        }
        let clip: Vec4 = self.view_proj * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Projected {
            x: f64::from((ndc.x + 1.0) * 0.5 * self.width),
            y: f64::from((1.0 - ndc.y) * 0.5 * self.height),
            view_depth,
        })
    }

    /// Pixel length of a world-space length seen at `view_depth`.
    pub fn world_to_pixels(&self, world_len: f32, view_depth: f32) -> f64 {
        f64::from(world_len * self.focal_px / view_depth.max(Z_NEAR))
    }
}
