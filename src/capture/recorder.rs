use crate::capture::frame_buffer::{DEFAULT_FRAME_BUDGET_BYTES, FrameBuffer};
use crate::capture::policy::{AnimationTick, CapturePolicy, TickGate};
use crate::encode::png::encode_png;
use crate::foundation::core::{FrameIndex, Resolution};
use crate::foundation::error::{FractalError, FractalResult};
use crate::params::SceneParams;
use crate::render::backend::{Background, OffscreenTarget, RenderSurface};

/// Capture session settings. Fixed for the duration of a recording.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecorderConfig {
    /// Offscreen target size.
    pub resolution: Resolution,
    /// Background opacity in `[0, 1]`.
    pub opacity: f32,
    /// Tick admission policy.
    pub policy: CapturePolicy,
    /// Encoded byte ceiling for the frame buffer (`None` is unbounded).
    pub budget: Option<usize>,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            opacity: 1.0,
            policy: CapturePolicy::default(),
            budget: Some(DEFAULT_FRAME_BUDGET_BYTES),
        }
    }
}

impl RecorderConfig {
    /// Check resolution, opacity and policy.
    pub fn validate(&self) -> FractalResult<()> {
        self.resolution.validate()?;
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(FractalError::validation(format!(
                "opacity must be in [0, 1], got {}",
                self.opacity
            )));
        }
        self.policy.validate()
    }
}

/// What happened to one animation tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No recording is active.
    Inactive,
    /// The capture policy skipped this tick.
    Skipped,
    /// A frame was appended at this index.
    Captured(FrameIndex),
    /// The frame did not fit the byte budget; the recording stopped.
    BudgetExhausted,
}

/// Frame capture loop.
///
/// While active, every admitted tick renders the current parameter snapshot into a dedicated
/// offscreen target and appends it to the frame buffer as PNG. Stopping (or dropping the
/// recorder) releases the target; captured frames stay until the next start.
#[derive(Debug)]
pub struct Recorder {
    cfg: RecorderConfig,
    frames: FrameBuffer,
    gate: TickGate,
    target: Option<OffscreenTarget>,
}

impl Recorder {
    /// Create an inactive recorder.
    pub fn new(cfg: RecorderConfig) -> FractalResult<Self> {
        cfg.validate()?;
        Ok(Self {
            frames: FrameBuffer::with_budget(cfg.budget),
            gate: TickGate::new(cfg.policy),
            target: None,
            cfg,
        })
    }

    /// Current settings.
    pub fn config(&self) -> &RecorderConfig {
        &self.cfg
    }

    /// Replace settings. Refused while a recording is active.
    pub fn set_config(&mut self, cfg: RecorderConfig) -> FractalResult<()> {
        if self.is_active() {
            return Err(FractalError::validation(
                "recorder settings cannot change while recording",
            ));
        }
        cfg.validate()?;
        self.gate = TickGate::new(cfg.policy);
        self.cfg = cfg;
        Ok(())
    }

    /// Begin a new recording: discard previous frames and allocate the offscreen target.
    #[tracing::instrument(level = "debug", skip(self, surface), fields(res = %self.cfg.resolution))]
    pub fn start(&mut self, surface: &mut dyn RenderSurface) -> FractalResult<()> {
        self.target = None;
        // Allocate first so a failed start leaves the previous recording intact.
        let target = surface.create_target(self.cfg.resolution)?;
        self.frames = FrameBuffer::with_budget(self.cfg.budget);
        self.gate = TickGate::new(self.cfg.policy);
        self.target = Some(target);
        tracing::info!(policy = ?self.cfg.policy, "recording started");
        Ok(())
    }

    /// End the recording and release the target. Returns `false` if nothing was active.
    pub fn stop(&mut self) -> bool {
        let was_active = self.target.take().is_some();
        if was_active {
            tracing::info!(frames = self.frames.len(), "recording stopped");
        }
        was_active
    }

    /// `true` between `start` and `stop`.
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Frames captured by the current or most recent recording.
    pub fn frames(&self) -> &FrameBuffer {
        &self.frames
    }

    /// Handle one animation tick.
    pub fn on_tick(
        &mut self,
        tick: &AnimationTick,
        params: &SceneParams,
        surface: &mut dyn RenderSurface,
    ) -> FractalResult<TickOutcome> {
        let Some(target) = self.target.as_mut() else {
            return Ok(TickOutcome::Inactive);
        };
        if !self.gate.admit(tick) {
            return Ok(TickOutcome::Skipped);
        }

        let background = Background {
            color: params.render.background,
            opacity: self.cfg.opacity,
        };
        let frame = surface.render_into(params, tick.elapsed_secs, target, background)?;
        let png = encode_png(&frame)?;
        let len = png.len();

        match self.frames.try_push(self.cfg.resolution, png) {
            Some(index) => {
                tracing::debug!(index = index.0, seq = tick.seq, bytes = len, "frame captured");
                Ok(TickOutcome::Captured(index))
            }
            None => {
                tracing::warn!(
                    frames = self.frames.len(),
                    bytes_used = self.frames.bytes_used(),
                    budget = ?self.frames.budget(),
                    "frame buffer budget exhausted, stopping recording"
                );
                self.stop();
                Ok(TickOutcome::BudgetExhausted)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/recorder.rs"]
mod tests;
