use std::io::{Cursor, Write as _};
use std::time::Duration;

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::capture::FrameBuffer;
use crate::encode::sink::{Artifact, ArtifactKind, ArtifactSink};
use crate::export::naming::{archive_name, sequence_frame_name, sequence_pad_width};
use crate::export::progress::ProgressReporter;
use crate::foundation::error::{FractalError, FractalResult};

/// Share of archive progress spent writing entries; delivery takes the rest.
const ARCHIVE_WRITE_SHARE: f64 = 0.9;

/// Deliver every frame as `frame_<index>.png`, `batch_size` files at a time with `batch_delay`
/// between batches. Progress is files delivered over total.
#[tracing::instrument(level = "debug", skip(frames, sink, progress), fields(frames = frames.len()))]
pub(crate) fn export_sequence(
    frames: &FrameBuffer,
    batch_size: usize,
    batch_delay: Duration,
    sink: &mut dyn ArtifactSink,
    progress: &mut ProgressReporter<'_>,
) -> FractalResult<Vec<String>> {
    if frames.is_empty() {
        return Err(FractalError::EmptyFrameBuffer);
    }
    let total = frames.len();
    let width = sequence_pad_width(total);
    let mut names = Vec::with_capacity(total);

    progress.report(0.0);
    for (batch_no, batch) in frames.frames().chunks(batch_size.max(1)).enumerate() {
        if batch_no > 0 && !batch_delay.is_zero() {
            std::thread::sleep(batch_delay);
        }
        for frame in batch {
            let filename = sequence_frame_name(names.len(), width);
            sink.deliver(Artifact {
                filename: filename.clone(),
                kind: ArtifactKind::Image,
                mime: "image/png",
                bytes: frame.png.clone(),
            })?;
            names.push(filename);
            progress.report(names.len() as f64 / total as f64);
        }
        tracing::trace!(batch = batch_no, delivered = names.len(), "sequence batch delivered");
    }
    Ok(names)
}

/// Pack every frame as a stored `frame_<index>.png` entry into `fractal-frames-<ts>.zip` and
/// deliver the archive once. Returns the archive name.
#[tracing::instrument(level = "debug", skip(frames, sink, progress), fields(frames = frames.len()))]
pub(crate) fn export_archive(
    frames: &FrameBuffer,
    sink: &mut dyn ArtifactSink,
    progress: &mut ProgressReporter<'_>,
    ts: u128,
) -> FractalResult<String> {
    if frames.is_empty() {
        return Err(FractalError::EmptyFrameBuffer);
    }
    let total = frames.len();
    let width = sequence_pad_width(total);
    // PNG data is already deflated.
    let entry_opts = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    progress.report(0.0);
    for (i, frame) in frames.frames().iter().enumerate() {
        zip.start_file(sequence_frame_name(i, width), entry_opts)
            .map_err(archive_error)?;
        zip.write_all(&frame.png).map_err(archive_error)?;
        progress.report(ARCHIVE_WRITE_SHARE * (i + 1) as f64 / total as f64);
    }
    let bytes = zip.finish().map_err(archive_error)?.into_inner();

    let filename = archive_name(ts);
    tracing::debug!(entries = total, bytes = bytes.len(), "frame archive written");
    sink.deliver(Artifact {
        filename: filename.clone(),
        kind: ArtifactKind::Archive,
        mime: "application/zip",
        bytes,
    })?;
    Ok(filename)
}

fn archive_error(e: impl std::fmt::Display) -> FractalError {
    FractalError::encode(format!("frame archive: {e}"))
}
