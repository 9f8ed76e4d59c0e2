//! Frame capture loop: tick admission, offscreen rendering and the in-memory frame buffer.

/// Captured frame storage.
pub mod frame_buffer;
/// Tick admission policy.
pub mod policy;
/// The capture state machine.
pub mod recorder;

pub use frame_buffer::{DEFAULT_FRAME_BUDGET_BYTES, EncodedFrame, FrameBuffer};
pub use policy::{AnimationTick, CapturePolicy};
pub use recorder::{Recorder, RecorderConfig, TickOutcome};
