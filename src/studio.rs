use crate::capture::{AnimationTick, CapturePolicy, Recorder, RecorderConfig, TickOutcome};
use crate::encode::ffmpeg::FfmpegBackend;
use crate::encode::png::encode_png;
use crate::encode::sink::ArtifactSink;
use crate::encode::video::VideoBackend;
use crate::export::{ExportOptions, ExportReport, Exporter};
use crate::foundation::error::{FractalError, FractalResult};
use crate::params::{CurveFamily, SceneParams};
use crate::render::backend::{Background, RenderSurface};
use crate::render::cpu::CpuCurveRenderer;

/// Control surface: owns the parameters, the recording session and the exporter.
///
/// The host calls [`Studio::on_animation_frame`] once per display tick. Parameter edits take
/// effect on the next tick, for the display and the capture alike.
pub struct Studio {
    params: SceneParams,
    options: ExportOptions,
    surface: Box<dyn RenderSurface>,
    video: Box<dyn VideoBackend>,
    recorder: Recorder,
    exporter: Exporter,
    ticks: u64,
    elapsed_secs: f64,
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("params", &self.params)
            .field("options", &self.options)
            .field("recorder", &self.recorder)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl Studio {
    /// Studio with the CPU renderer, `ffmpeg` video and default options.
    pub fn new() -> FractalResult<Self> {
        Self::with_parts(
            Box::new(CpuCurveRenderer::new()),
            Box::new(FfmpegBackend::new()),
            ExportOptions::default(),
        )
    }

    /// Studio with explicit render surface, video runtime and options.
    pub fn with_parts(
        surface: Box<dyn RenderSurface>,
        video: Box<dyn VideoBackend>,
        options: ExportOptions,
    ) -> FractalResult<Self> {
        options.validate()?;
        let recorder = Recorder::new(RecorderConfig {
            resolution: options.resolution,
            ..RecorderConfig::default()
        })?;
        Ok(Self {
            params: SceneParams::default(),
            options,
            surface,
            video,
            recorder,
            exporter: Exporter::new(),
            ticks: 0,
            elapsed_secs: 0.0,
        })
    }

    /// Current parameter snapshot.
    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    /// Mutable parameters; edits apply from the next tick.
    pub fn params_mut(&mut self) -> &mut SceneParams {
        &mut self.params
    }

    /// Set one blend weight and renormalize the others.
    pub fn update_blend_factor(&mut self, family: CurveFamily, value: f64) -> FractalResult<()> {
        self.params.blend.update_blend_factor(family, value)
    }

    /// Export and recording options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Replace options. Refused while recording.
    pub fn set_options(&mut self, options: ExportOptions) -> FractalResult<()> {
        options.validate()?;
        self.recorder.set_config(RecorderConfig {
            resolution: options.resolution,
            ..*self.recorder.config()
        })?;
        self.options = options;
        Ok(())
    }

    /// Background opacity used for captured frames.
    pub fn set_opacity(&mut self, opacity: f32) -> FractalResult<()> {
        self.recorder.set_config(RecorderConfig {
            opacity,
            ..*self.recorder.config()
        })
    }

    /// Tick admission policy for the next recording.
    pub fn set_capture_policy(&mut self, policy: CapturePolicy) -> FractalResult<()> {
        self.recorder.set_config(RecorderConfig {
            policy,
            ..*self.recorder.config()
        })
    }

    /// Begin a new recording, discarding frames of the previous one.
    pub fn start_recording(&mut self) -> FractalResult<()> {
        self.recorder.start(self.surface.as_mut())
    }

    /// End the recording. Returns `false` if none was active.
    pub fn stop_recording(&mut self) -> bool {
        self.recorder.stop()
    }

    /// `true` while a recording is active.
    pub fn is_recording(&self) -> bool {
        self.recorder.is_active()
    }

    /// Frames captured by the current or most recent recording.
    pub fn frame_count(&self) -> usize {
        self.recorder.frames().len()
    }

    /// Frames a full recording contains before it stops on its own.
    pub fn expected_frames(&self) -> u64 {
        self.options.expected_frames()
    }

    /// Recorder state, including the frame buffer.
    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Handle one display tick at `elapsed_secs` since the animation started.
    ///
    /// Captures a frame when recording and the policy admits the tick, and stops the recording
    /// once [`Studio::expected_frames`] frames exist.
    pub fn on_animation_frame(&mut self, elapsed_secs: f64) -> FractalResult<TickOutcome> {
        if !elapsed_secs.is_finite() {
            return Err(FractalError::validation("elapsed time must be finite"));
        }
        let tick = AnimationTick {
            seq: self.ticks,
            elapsed_secs,
        };
        self.ticks += 1;
        self.elapsed_secs = elapsed_secs;

        let outcome = self
            .recorder
            .on_tick(&tick, &self.params, self.surface.as_mut())?;
        if matches!(outcome, TickOutcome::Captured(_))
            && self.frame_count() as u64 >= self.expected_frames()
        {
            tracing::info!(frames = self.frame_count(), "recording reached its duration");
            self.recorder.stop();
        }
        Ok(outcome)
    }

    /// Export the captured frames with `options` (format, rate, bitrate, batching).
    pub fn export_as(
        &mut self,
        options: &ExportOptions,
        sink: &mut dyn ArtifactSink,
        on_progress: &mut dyn FnMut(f64),
    ) -> FractalResult<ExportReport> {
        self.exporter.export_with(
            self.recorder.frames(),
            options,
            self.video.as_mut(),
            sink,
            on_progress,
        )
    }

    /// Export a single PNG: the first captured frame, or the currently displayed frame when
    /// nothing was captured.
    pub fn export_current_frame(&mut self, sink: &mut dyn ArtifactSink) -> FractalResult<String> {
        if let Some(first) = self.recorder.frames().first() {
            return self.exporter.export_still(first.png.clone(), sink, &mut |_| {});
        }
        let frame = self.surface.render_frame(
            &self.params,
            self.elapsed_secs,
            self.options.resolution,
            Background {
                color: self.params.render.background,
                opacity: self.recorder.config().opacity,
            },
        )?;
        let png = encode_png(&frame)?;
        self.exporter.export_still(png, sink, &mut |_| {})
    }

    /// Progress of the current or last export.
    pub fn export_progress(&self) -> f64 {
        self.exporter.progress()
    }

    /// `true` while an export runs.
    pub fn is_exporting(&self) -> bool {
        self.exporter.is_exporting()
    }

    /// Handle sharing this studio's busy flag and progress.
    pub fn exporter(&self) -> Exporter {
        self.exporter.clone()
    }
}
