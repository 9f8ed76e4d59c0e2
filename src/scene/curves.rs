//! Closed-form curve families and blend methods.

use glam::{Vec2, Vec3};

use crate::foundation::math::{linear_step, mix3, smoothstep};
use crate::params::blend::{BlendMethod, BlendParameters};

#[allow(clippy::approx_constant)]
const PI_APPROX: f32 = 3.14159;
/// Full turns the curve parameter sweeps from `t = 0` to `t = 1`.
const TURNS: f32 = 8.0;

/// Sweep angle for curve parameter `t` at `time` seconds.
pub fn curve_angle(t: f32, time: f32, animation_speed: f32) -> f32 {
    t * 2.0 * PI_APPROX * TURNS + time * animation_speed
}

/// Expanding helix.
pub fn spiral(t: f32, angle: f32) -> Vec3 {
    let r = 0.5 + t * 0.5;
    Vec3::new(angle.sin() * r, angle.cos() * r, t * 2.0 - 1.0)
}

/// Ring with a doubled vertical twist.
pub fn mobius(t: f32, angle: f32) -> Vec3 {
    let r = 0.5 + t * 0.5;
    Vec3::new(angle.sin() * r, angle.cos() * r, (angle * 2.0).sin() * 0.2)
}

/// (2,3) torus knot scaled to roughly unit size.
pub fn trefoil(_t: f32, angle: f32) -> Vec3 {
    let (p, q) = (2.0_f32, 3.0_f32);
    let ring = 2.0 + (q * angle).cos();
    Vec3::new(
        ring * (p * angle).cos(),
        ring * (p * angle).sin(),
        (q * angle).sin(),
    ) * 0.3
}

/// Combine three curve positions.
///
/// `uv.x` is the curve parameter and `uv.y` is fixed at 0.5 by the renderer; only
/// [`BlendMethod::Linear`] reads `weights`.
pub fn blend_curves(a: Vec3, b: Vec3, c: Vec3, weights: Vec3, method: BlendMethod, uv: Vec2) -> Vec3 {
    match method {
        BlendMethod::Linear => a * weights.x + b * weights.y + c * weights.z,
        BlendMethod::SmoothStep => {
            let ab = mix3(a, b, smoothstep(0.0, 1.0, uv.x));
            mix3(ab, c, smoothstep(0.0, 1.0, uv.y))
        }
        BlendMethod::Radial => {
            let dist = (uv - Vec2::splat(0.5)).length();
            let ab = mix3(a, b, linear_step(0.0, 0.5, dist));
            mix3(ab, c, smoothstep(0.0, 1.0, dist * 2.0))
        }
    }
}

/// Blended, unscaled position of the particle at curve parameter `t`.
pub fn blended_position(blend: &BlendParameters, t: f32, angle: f32) -> Vec3 {
    blend_curves(
        spiral(t, angle),
        mobius(t, angle),
        trefoil(t, angle),
        blend.weights_vec3(),
        blend.method,
        Vec2::new(t, 0.5),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scene/curves.rs"]
mod tests;
