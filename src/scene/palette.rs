//! Per-particle coloring: cosine palettes, custom three-stop ramps and the brightness pulse.

use glam::Vec3;

use crate::foundation::math::{fract, mix3, smoothstep};
use crate::params::color::{ColorInterpolation, ColorParameters, CustomColors, Palette};

const TAU_APPROX: f32 = 6.28318;

/// `(c, d)` coefficients of `0.5 + 0.5 * cos(2π(c·t + d + phase))`.
fn palette_coefficients(palette: Palette) -> (Vec3, Vec3) {
    match palette {
        Palette::Set1 => (Vec3::ONE, Vec3::new(0.263, 0.416, 0.557)),
        Palette::Set2 => (Vec3::new(1.0, 1.0, 0.5), Vec3::new(0.8, 0.9, 0.3)),
        Palette::Set3 => (Vec3::new(1.0, 0.7, 1.0), Vec3::new(0.0, 0.15, 0.2)),
    }
}

fn cosine_palette(palette: Palette, t: f32, phase: f32) -> Vec3 {
    let (c, d) = palette_coefficients(palette);
    let arg = (c * t + d + Vec3::splat(phase)) * TAU_APPROX;
    Vec3::splat(0.5) + Vec3::splat(0.5) * Vec3::new(arg.x.cos(), arg.y.cos(), arg.z.cos())
}

fn custom_ramp(custom: &CustomColors, interpolation: ColorInterpolation, u: f32) -> Vec3 {
    let start = Vec3::from_array(custom.start.to_rgb_f32());
    let middle = Vec3::from_array(custom.middle.to_rgb_f32());
    let end = Vec3::from_array(custom.end.to_rgb_f32());

    let (from, to, local) = if u < 0.5 {
        (start, middle, u * 2.0)
    } else {
        (middle, end, (u - 0.5) * 2.0)
    };
    let k = match interpolation {
        ColorInterpolation::Linear => local,
        ColorInterpolation::Smooth => smoothstep(0.0, 1.0, local),
    };
    mix3(from, to, k)
}

/// Base color at curve parameter `t` and `time`, before the pulse.
pub fn base_color(color: &ColorParameters, t: f32, time: f32) -> Vec3 {
    let phase = time * color.animation_speed as f32 * 0.1;
    if color.use_custom_colors {
        custom_ramp(&color.custom, color.interpolation, fract(t + phase))
    } else {
        cosine_palette(color.palette, t, phase)
    }
}

/// Final particle color in `[0, 1]`, including the per-particle brightness pulse.
pub fn particle_color(color: &ColorParameters, t: f32, time: f32, index: u32) -> [f32; 3] {
    let base = base_color(color, t, time);
    let pulse = (time * 2.0 + index as f32 * 0.01).sin() * 0.5 + 0.5;
    let lit = mix3(base, base * 1.5, pulse);
    lit.clamp(Vec3::ZERO, Vec3::ONE).to_array()
}
