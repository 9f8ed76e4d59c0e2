use glam::Vec3;

/// Hermite smoothstep between `edge0` and `edge1`, matching GLSL `smoothstep`.
pub(crate) fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = linear_step(edge0, edge1, x);
    t * t * (3.0 - 2.0 * t)
}

/// Clamped linear ramp between `edge0` and `edge1`.
pub(crate) fn linear_step(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 == edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0)
}

/// Fractional part, matching GLSL `fract` (always in `[0, 1)`).
pub(crate) fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Component-wise `a + (b - a) * t`, matching GLSL `mix`.
pub(crate) fn mix3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
