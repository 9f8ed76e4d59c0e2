use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::foundation::core::{Resolution, Rgba8};
use crate::foundation::error::{FractalError, FractalResult};
use crate::params::SceneParams;

/// A rendered frame as RGBA8 pixels.
///
/// Renderers output **premultiplied** pixels; decoded PNG frames are straight alpha. The
/// `premultiplied` flag makes this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Allocate a transparent frame.
    pub fn blank(resolution: Resolution) -> Self {
        Self {
            width: resolution.width,
            height: resolution.height,
            data: vec![0; resolution.rgba8_len()],
            premultiplied: true,
        }
    }

    /// Frame dimensions.
    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }
}

/// Offscreen rendering context sized to a capture resolution.
///
/// Owns the rasterizer state and the backing pixmap. Dropping the target releases both; a
/// surface that hands out targets can observe how many are alive through
/// [`TargetTracker`].
pub struct OffscreenTarget {
    resolution: Resolution,
    pub(crate) ctx: vello_cpu::RenderContext,
    pub(crate) pixmap: vello_cpu::Pixmap,
    tracker: Option<TargetTracker>,
}

impl OffscreenTarget {
    /// Allocate a CPU raster target.
    ///
    /// Fails with [`FractalError::CanvasContextUnavailable`] when the rasterizer cannot address
    /// the requested size.
    pub fn new(resolution: Resolution) -> FractalResult<Self> {
        resolution.validate()?;
        let w: u16 = resolution.width.try_into().map_err(|_| {
            FractalError::canvas_unavailable(format!("target width {} exceeds u16", resolution.width))
        })?;
        let h: u16 = resolution.height.try_into().map_err(|_| {
            FractalError::canvas_unavailable(format!(
                "target height {} exceeds u16",
                resolution.height
            ))
        })?;
        Ok(Self {
            resolution,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            tracker: None,
        })
    }

    /// Register this target with a tracker so its lifetime is counted.
    pub fn tracked(mut self, tracker: &TargetTracker) -> Self {
        tracker.0.fetch_add(1, Ordering::SeqCst);
        self.tracker = Some(tracker.clone());
        self
    }

    /// Target dimensions.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }
}

impl Drop for OffscreenTarget {
    fn drop(&mut self) {
        if let Some(t) = self.tracker.take() {
            t.0.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl std::fmt::Debug for OffscreenTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OffscreenTarget")
            .field("resolution", &self.resolution)
            .finish_non_exhaustive()
    }
}

/// Shared counter of live [`OffscreenTarget`]s.
#[derive(Clone, Debug, Default)]
pub struct TargetTracker(Arc<AtomicUsize>);

impl TargetTracker {
    /// Number of targets currently alive.
    pub fn live(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Background fill for a render call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Background {
    /// Clear color.
    pub color: Rgba8,
    /// Opacity multiplier in `[0, 1]`, applied on top of `color.a`.
    pub opacity: f32,
}

impl Background {
    /// Fully opaque background.
    pub fn opaque(color: Rgba8) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }
}

/// Something that can draw the scene into an offscreen target.
///
/// The live display and the capture loop both go through this trait with the same
/// [`SceneParams`] snapshot, so captured frames match what is shown.
pub trait RenderSurface {
    /// Create an offscreen target at `resolution`.
    fn create_target(&mut self, resolution: Resolution) -> FractalResult<OffscreenTarget>;

    /// Render the scene at `time` seconds into `target` and read the pixels back.
    fn render_into(
        &mut self,
        params: &SceneParams,
        time: f64,
        target: &mut OffscreenTarget,
        background: Background,
    ) -> FractalResult<FrameRGBA>;

    /// Convenience: render once into a temporary target.
    fn render_frame(
        &mut self,
        params: &SceneParams,
        time: f64,
        resolution: Resolution,
        background: Background,
    ) -> FractalResult<FrameRGBA> {
        let mut target = self.create_target(resolution)?;
        self.render_into(params, time, &mut target, background)
    }
}
