use crate::capture::FrameBuffer;
use crate::encode::codec::{CodecCandidate, Container, negotiate, preferred_candidates};
use crate::encode::png::{decode_png, scale_to};
use crate::encode::sink::{Artifact, ArtifactKind, ArtifactSink};
use crate::encode::video::{VideoBackend, VideoEncoder, VideoEncoderConfig};
use crate::export::naming::video_name;
use crate::export::progress::ProgressReporter;
use crate::foundation::core::{Fps, FrameIndex, Rgba8};
use crate::foundation::error::{FractalError, FractalResult};
use crate::render::backend::FrameRGBA;

/// Share of progress covered by drawing frames; the rest is encoder finalization.
const DRAW_PROGRESS_SHARE: f64 = 0.9;

/// Result of a successful video export.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct VideoOutcome {
    pub(crate) filename: String,
    pub(crate) candidate: CodecCandidate,
    pub(crate) fell_back: bool,
    pub(crate) drawn: usize,
    pub(crate) dropped: Vec<FrameIndex>,
}

/// Encode every decodable frame into `container` (or the runtime's fallback) and deliver the
/// result once the encoder has finished.
#[tracing::instrument(level = "debug", skip(frames, backend, sink, progress), fields(frames = frames.len()))]
#[allow(clippy::too_many_arguments)]
pub(crate) fn export_video(
    frames: &FrameBuffer,
    container: Container,
    fps: Fps,
    bitrate_mbps: u32,
    backend: &mut dyn VideoBackend,
    sink: &mut dyn ArtifactSink,
    progress: &mut ProgressReporter<'_>,
    ts: u128,
) -> FractalResult<VideoOutcome> {
    if frames.is_empty() {
        return Err(FractalError::EmptyFrameBuffer);
    }
    let total = frames.len();
    let mut dropped = Vec::new();
    progress.report(0.0);

    // The first decodable frame fixes the canvas size.
    let mut first = None;
    let mut first_err = None;
    for (pos, f) in frames.frames().iter().enumerate() {
        match decode_png(f.index, &f.png) {
            Ok(decoded) => {
                first = Some((pos, decoded));
                break;
            }
            Err(e) => {
                tracing::warn!(index = f.index.0, error = %e, "dropping undecodable frame");
                dropped.push(f.index);
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
    }
    let Some((first_pos, first_frame)) = first else {
        return Err(first_err.unwrap_or(FractalError::EmptyFrameBuffer));
    };

    let mut canvas = Canvas::new(&first_frame)?;
    let (mut encoder, candidate) = open_encoder(
        backend,
        container,
        VideoEncoderConfig {
            resolution: canvas.frame.resolution(),
            fps,
            bitrate_mbps,
            candidate: CodecCandidate::MKV_MPEG4,
            background: Rgba8::BLACK,
        },
    )?;
    let fell_back = !preferred_candidates(container).contains(&candidate);
    if fell_back {
        tracing::warn!(requested = ?container, codec = %candidate, "no preferred codec available, using fallback");
    } else {
        tracing::info!(codec = %candidate, "negotiated video codec");
    }

    let interval = fps.frame_interval();
    let mut drawn = 0usize;
    let mut pending_first = Some(first_frame);
    for f in &frames.frames()[first_pos..] {
        let decoded = match pending_first.take() {
            Some(d) => d,
            None => match decode_png(f.index, &f.png) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(index = f.index.0, error = %e, "dropping undecodable frame");
                    dropped.push(f.index);
                    continue;
                }
            },
        };
        canvas.draw(decoded)?;
        // Each drawn frame is held for one frame interval of presentation time.
        encoder.present(&canvas.frame, interval * drawn as u32)?;
        drawn += 1;
        progress.report(DRAW_PROGRESS_SHARE * drawn as f64 / total as f64);
    }

    let bytes = encoder.finish()?;
    let filename = video_name(ts, candidate.extension());
    sink.deliver(Artifact {
        filename: filename.clone(),
        kind: ArtifactKind::Video,
        mime: candidate.container.mime(),
        bytes,
    })?;
    Ok(VideoOutcome {
        filename,
        candidate,
        fell_back,
        drawn,
        dropped,
    })
}

fn open_encoder(
    backend: &mut dyn VideoBackend,
    container: Container,
    base: VideoEncoderConfig,
) -> FractalResult<(Box<dyn VideoEncoder>, CodecCandidate)> {
    let mut last_err = None;
    for candidate in negotiate(container, &*backend) {
        match backend.open(&VideoEncoderConfig { candidate, ..base }) {
            Ok(enc) => return Ok((enc, candidate)),
            Err(FractalError::UnsupportedCodec(msg)) => {
                tracing::warn!(codec = %candidate, reason = %msg, "codec rejected by encoder");
                last_err = Some(FractalError::UnsupportedCodec(msg));
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_err.unwrap_or_else(|| FractalError::unsupported_codec(format!("{container:?}"))))
}

/// The shared drawing surface the encoder samples.
struct Canvas {
    frame: FrameRGBA,
}

impl Canvas {
    fn new(first: &FrameRGBA) -> FractalResult<Self> {
        let res = first.resolution();
        res.validate()?;
        Ok(Self {
            frame: FrameRGBA::blank(res),
        })
    }

    fn draw(&mut self, frame: FrameRGBA) -> FractalResult<()> {
        let scaled = scale_to(frame, self.frame.resolution())?;
        self.frame.data.copy_from_slice(&scaled.data);
        self.frame.premultiplied = scaled.premultiplied;
        Ok(())
    }
}
