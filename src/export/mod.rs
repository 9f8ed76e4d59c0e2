//! Export pipeline: turns a frame buffer into a PNG, a PNG sequence (loose or zipped) or a video.
//!
//! Every export goes through [`Exporter`], which enforces the shared contract: options are
//! validated, only one export runs at a time per busy flag, empty buffers are rejected, progress
//! is monotonic and completes exactly once on success.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::capture::FrameBuffer;
use crate::encode::codec::CodecCandidate;
use crate::encode::ffmpeg::FfmpegBackend;
use crate::encode::sink::ArtifactSink;
use crate::encode::video::VideoBackend;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FractalError, FractalResult};

/// Format and option types.
pub mod format;
/// Artifact naming.
pub mod naming;
/// Progress reporting.
pub mod progress;
mod sequence;
mod single;
mod video;

pub use format::{ExportFormat, ExportOptions};
pub use progress::{ProgressCell, ProgressReporter};

/// Summary of a finished export.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportReport {
    /// Requested format.
    pub format: ExportFormat,
    /// Delivered file names, in delivery order.
    pub artifacts: Vec<String>,
    /// Frames that ended up in the artifacts.
    pub frames_exported: usize,
    /// Frames skipped because they could not be decoded.
    pub frames_dropped: Vec<FrameIndex>,
    /// Codec actually used, for video formats.
    pub codec: Option<CodecCandidate>,
    /// `true` when the video used the runtime's fallback instead of a preferred codec.
    pub fell_back: bool,
}

/// Runs exports against a shared busy flag.
///
/// Clones share the flag and the observable progress, so a UI can poll
/// [`Exporter::is_exporting`] and [`Exporter::progress`] while another clone works.
#[derive(Clone, Debug, Default)]
pub struct Exporter {
    busy: Arc<AtomicBool>,
    progress: ProgressCell,
}

struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> FractalResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| FractalError::ExportInProgress)?;
        Ok(Self(flag.clone()))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Exporter {
    /// Create an idle exporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while an export holds the busy flag.
    pub fn is_exporting(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Progress of the current or last export, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    /// Export with the system `ffmpeg` as video runtime.
    pub fn export(
        &self,
        frames: &FrameBuffer,
        opts: &ExportOptions,
        sink: &mut dyn ArtifactSink,
        on_progress: &mut dyn FnMut(f64),
    ) -> FractalResult<ExportReport> {
        self.export_with(frames, opts, &mut FfmpegBackend::new(), sink, on_progress)
    }

    /// Export with an explicit video runtime.
    #[tracing::instrument(level = "info", skip_all, fields(format = %opts.format, frames = frames.len()))]
    pub fn export_with(
        &self,
        frames: &FrameBuffer,
        opts: &ExportOptions,
        backend: &mut dyn VideoBackend,
        sink: &mut dyn ArtifactSink,
        on_progress: &mut dyn FnMut(f64),
    ) -> FractalResult<ExportReport> {
        opts.validate()?;
        let _busy = BusyGuard::acquire(&self.busy)?;
        if frames.is_empty() {
            tracing::warn!("export requested with an empty frame buffer");
            return Err(FractalError::EmptyFrameBuffer);
        }

        let mut progress = ProgressReporter::new(on_progress).observed_by(self.progress.clone());
        let ts = naming::timestamp_millis();
        let report = match opts.format {
            ExportFormat::Png => {
                let name = single::export_first_frame(frames, sink, &mut progress, ts)?;
                ExportReport {
                    format: opts.format,
                    artifacts: vec![name],
                    frames_exported: 1,
                    frames_dropped: Vec::new(),
                    codec: None,
                    fell_back: false,
                }
            }
            ExportFormat::PngSequence if opts.archive => {
                let name = sequence::export_archive(frames, sink, &mut progress, ts)?;
                ExportReport {
                    format: opts.format,
                    artifacts: vec![name],
                    frames_exported: frames.len(),
                    frames_dropped: Vec::new(),
                    codec: None,
                    fell_back: false,
                }
            }
            ExportFormat::PngSequence => {
                let names = sequence::export_sequence(
                    frames,
                    opts.batch_size,
                    opts.batch_delay(),
                    sink,
                    &mut progress,
                )?;
                ExportReport {
                    format: opts.format,
                    frames_exported: names.len(),
                    artifacts: names,
                    frames_dropped: Vec::new(),
                    codec: None,
                    fell_back: false,
                }
            }
            ExportFormat::Webm | ExportFormat::Mp4 => {
                let container = opts.format.container().ok_or_else(|| {
                    FractalError::validation(format!("{} is not a video format", opts.format))
                })?;
                let out = video::export_video(
                    frames,
                    container,
                    opts.fps()?,
                    opts.bitrate_mbps,
                    backend,
                    sink,
                    &mut progress,
                    ts,
                )?;
                ExportReport {
                    format: opts.format,
                    artifacts: vec![out.filename],
                    frames_exported: out.drawn,
                    frames_dropped: out.dropped,
                    codec: Some(out.candidate),
                    fell_back: out.fell_back,
                }
            }
        };
        progress.complete();
        tracing::info!(artifacts = report.artifacts.len(), "export finished");
        Ok(report)
    }

    /// Deliver already-encoded PNG bytes as `fractal-frame-<ts>.png`, under the busy flag.
    pub fn export_still(
        &self,
        png: Vec<u8>,
        sink: &mut dyn ArtifactSink,
        on_progress: &mut dyn FnMut(f64),
    ) -> FractalResult<String> {
        let _busy = BusyGuard::acquire(&self.busy)?;
        let mut progress = ProgressReporter::new(on_progress).observed_by(self.progress.clone());
        let name = single::deliver_still(png, sink, naming::timestamp_millis())?;
        progress.complete();
        Ok(name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;
