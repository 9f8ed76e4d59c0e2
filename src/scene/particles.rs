use kurbo::{Point, Rect, Size};

use crate::foundation::core::{Resolution, Rgba8};
use crate::params::SceneParams;
use crate::scene::curves::{blended_position, curve_angle};
use crate::scene::palette::particle_color;

/// Height of a particle strip relative to its width.
pub const STRIP_ASPECT: f64 = 0.1;

/// A camera-facing particle in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Index along the curve (`0..particle_count`).
    pub index: u32,
    /// Screen-space strip covered by the particle, `element_size` wide and a tenth as tall.
    pub bounds: Rect,
    /// Distance from the eye, used for back-to-front ordering.
    pub view_depth: f32,
    /// Opaque fill color.
    pub color: Rgba8,
}

/// Evaluate, project and depth-sort every particle of the scene at `time` seconds.
///
/// The result is ordered farthest first so it can be painted in order. Particles behind the
/// camera are dropped.
pub fn build_particles(params: &SceneParams, time: f64, resolution: Resolution) -> Vec<Particle> {
    let count = params.render.particle_count.max(1);
    let viewport = params.render.camera.viewport(resolution);
    let time = time as f32;
    let speed = params.render.animation_speed as f32;
    let depth = params.render.depth as f32;
    let element_size = params.render.element_size as f32;

    let mut out = Vec::with_capacity(count as usize);
    for index in 0..count {
        let t = index as f32 / count as f32;
        let angle = curve_angle(t, time, speed);
        let world = blended_position(&params.blend, t, angle) * depth;
        let Some(p) = viewport.project(world) else {
            continue;
        };
        let width = viewport.world_to_pixels(element_size, p.view_depth).max(1.0);
        let height = (width * STRIP_ASPECT).max(1.0);
        out.push(Particle {
            index,
            bounds: Rect::from_center_size(Point::new(p.x, p.y), Size::new(width, height)),
            view_depth: p.view_depth,
            color: Rgba8::from_rgb_f32(particle_color(&params.color, t, time, index)),
        });
    }

    // Stable sort keeps curve order for equal depths, so output is deterministic.
    out.sort_by(|a, b| b.view_depth.total_cmp(&a.view_depth));
    out
}
