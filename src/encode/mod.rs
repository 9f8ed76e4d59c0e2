//! Still-image and video encoding, plus artifact delivery.
//!
//! Captured frames are stored as PNG; video export streams decoded frames into an encoder
//! runtime chosen through codec negotiation.

/// Container/codec table and negotiation.
pub mod codec;
/// `ffmpeg`-based video encoder runtime.
pub mod ffmpeg;
/// PNG encode/decode and frame resampling.
pub mod png;
/// Artifact sink trait and built-in sinks.
pub mod sink;
/// Video encoder traits.
pub mod video;
