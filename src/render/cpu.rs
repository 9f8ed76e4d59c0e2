use crate::foundation::core::Resolution;
use crate::foundation::error::{FractalError, FractalResult};
use crate::params::SceneParams;
use crate::render::backend::{Background, FrameRGBA, OffscreenTarget, RenderSurface, TargetTracker};
use crate::scene::particles::build_particles;

/// CPU backend powered by `vello_cpu`.
///
/// Draws every particle as an opaque strip, back to front, over the background.
#[derive(Debug, Default)]
pub struct CpuCurveRenderer {
    targets: TargetTracker,
}

impl CpuCurveRenderer {
    /// Create a renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of offscreen targets created by this renderer that are still alive.
    pub fn live_targets(&self) -> usize {
        self.targets.live()
    }
}

impl RenderSurface for CpuCurveRenderer {
    fn create_target(&mut self, resolution: Resolution) -> FractalResult<OffscreenTarget> {
        Ok(OffscreenTarget::new(resolution)?.tracked(&self.targets))
    }

    #[tracing::instrument(level = "trace", skip(self, params, target), fields(res = %target.resolution()))]
    fn render_into(
        &mut self,
        params: &SceneParams,
        time: f64,
        target: &mut OffscreenTarget,
        background: Background,
    ) -> FractalResult<FrameRGBA> {
        if !time.is_finite() {
            return Err(FractalError::validation("render time must be finite"));
        }
        let res = target.resolution();
        let particles = build_particles(params, time, res);
        let (w, h) = (f64::from(res.width), f64::from(res.height));

        let bg = background.color;
        let bg_alpha = (f32::from(bg.a) * background.opacity.clamp(0.0, 1.0)).round() as u8;

        let ctx = &mut target.ctx;
        ctx.reset();
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        if bg_alpha > 0 {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg_alpha));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        }

        for p in &particles {
            let b = p.bounds;
            if b.x1 < 0.0 || b.y1 < 0.0 || b.x0 > w || b.y0 > h {
                continue;
            }
            let c = p.color;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(b.x0, b.y0, b.x1, b.y1));
        }

        // `vello_cpu` composites onto the destination, so start from a transparent pixmap.
        target.pixmap.data_as_u8_slice_mut().fill(0);
        ctx.flush();
        ctx.render_to_pixmap(&mut target.pixmap);

        tracing::trace!(particles = particles.len(), "rendered scene");
        Ok(FrameRGBA {
            width: res.width,
            height: res.height,
            data: target.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}
