//! fractal-blend renders an animated particle curve that blends three parametric 3D curve
//! families, records it frame by frame and exports the recording.
//!
//! The API is facade-oriented:
//!
//! - Edit a [`SceneParams`] snapshot (blend weights, palette, animation settings)
//! - Drive a [`Studio`] once per display tick with [`Studio::on_animation_frame`]
//! - Export the captured frames as a PNG, a PNG sequence or a WebM/MP4 video into an
//!   [`ArtifactSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame capture loop.
pub mod capture;
/// Still-image and video encoding.
pub mod encode;
/// Export pipeline.
pub mod export;
/// Scene parameters.
pub mod params;
/// Rendering backend(s).
pub mod render;
/// Curve, palette and camera model.
pub mod scene;
mod studio;

pub use crate::foundation::core::{Fps, FrameIndex, MAX_RESOLUTION_EDGE, Resolution, Rgba8};
pub use crate::foundation::error::{FractalError, FractalResult};

pub use crate::capture::{
    AnimationTick, CapturePolicy, EncodedFrame, FrameBuffer, Recorder, RecorderConfig, TickOutcome,
};
pub use crate::encode::codec::{CodecCandidate, CodecSupport, Container, VideoCodec};
pub use crate::encode::ffmpeg::{FfmpegBackend, is_ffmpeg_on_path};
pub use crate::encode::sink::{
    Artifact, ArtifactKind, ArtifactSink, DirectorySink, InMemoryArtifactSink,
};
pub use crate::encode::video::{VideoBackend, VideoEncoder, VideoEncoderConfig};
pub use crate::export::{ExportFormat, ExportOptions, ExportReport, Exporter};
pub use crate::params::{BlendMethod, CurveFamily, SceneParams};
pub use crate::render::backend::{Background, FrameRGBA, OffscreenTarget, RenderSurface};
pub use crate::render::cpu::CpuCurveRenderer;
pub use crate::studio::Studio;
