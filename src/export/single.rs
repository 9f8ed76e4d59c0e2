use crate::capture::FrameBuffer;
use crate::encode::sink::{Artifact, ArtifactKind, ArtifactSink};
use crate::export::naming::single_frame_name;
use crate::export::progress::ProgressReporter;
use crate::foundation::error::{FractalError, FractalResult};

/// Deliver the first captured frame as `fractal-frame-<ts>.png`.
pub(crate) fn export_first_frame(
    frames: &FrameBuffer,
    sink: &mut dyn ArtifactSink,
    progress: &mut ProgressReporter<'_>,
    ts: u128,
) -> FractalResult<String> {
    let first = frames.first().ok_or(FractalError::EmptyFrameBuffer)?;
    let name = deliver_still(first.png.clone(), sink, ts)?;
    progress.complete();
    Ok(name)
}

/// Deliver already-encoded PNG bytes as a still image.
pub(crate) fn deliver_still(
    png: Vec<u8>,
    sink: &mut dyn ArtifactSink,
    ts: u128,
) -> FractalResult<String> {
    let filename = single_frame_name(ts);
    sink.deliver(Artifact {
        filename: filename.clone(),
        kind: ArtifactKind::Image,
        mime: "image/png",
        bytes: png,
    })?;
    Ok(filename)
}
