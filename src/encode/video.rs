use std::time::Duration;

use crate::encode::codec::{CodecCandidate, CodecSupport};
use crate::foundation::core::{Fps, Resolution, Rgba8};
use crate::foundation::error::FractalResult;
use crate::render::backend::FrameRGBA;

/// Parameters for one encoding session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VideoEncoderConfig {
    /// Canvas size every presented frame must match.
    pub resolution: Resolution,
    /// Presentation rate.
    pub fps: Fps,
    /// Target bitrate in megabits per second.
    pub bitrate_mbps: u32,
    /// Negotiated container/codec pair.
    pub candidate: CodecCandidate,
    /// Color used to flatten transparent pixels.
    pub background: Rgba8,
}

/// An open encoding session.
///
/// Frames are presented in order with strictly increasing presentation timestamps. The payload is
/// only available once [`VideoEncoder::finish`] succeeds.
pub trait VideoEncoder {
    /// Submit the canvas contents shown from `pts` until the next frame.
    fn present(&mut self, frame: &FrameRGBA, pts: Duration) -> FractalResult<()>;

    /// Stop encoding and return the finished container bytes.
    fn finish(self: Box<Self>) -> FractalResult<Vec<u8>>;
}

/// Encoder runtime: answers codec queries and opens sessions.
pub trait VideoBackend: CodecSupport {
    /// Open a session for `cfg`.
    ///
    /// Returns [`crate::FractalError::UnsupportedCodec`] when the candidate cannot be encoded,
    /// which lets the caller move on to the next candidate.
    fn open(&mut self, cfg: &VideoEncoderConfig) -> FractalResult<Box<dyn VideoEncoder>>;
}
