//! The blended curve scene: geometry, coloring and camera.

/// Orbit camera and perspective projection.
pub mod camera;
pub mod curves;
pub mod palette;
/// Particle evaluation, projection and depth sorting.
pub mod particles;

pub use camera::{OrbitCamera, Projected, Viewport};
pub use particles::{Particle, build_particles};
