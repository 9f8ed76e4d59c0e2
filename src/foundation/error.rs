use crate::foundation::core::FrameIndex;

/// Result alias used throughout the crate.
pub type FractalResult<T> = Result<T, FractalError>;

/// Error type for parameter handling, capture, encoding and export.
#[derive(thiserror::Error, Debug)]
pub enum FractalError {
    /// Out-of-range option or malformed parameter input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Export was requested for a frame buffer without frames.
    #[error("export error: frame buffer is empty")]
    EmptyFrameBuffer,

    /// Another export currently holds the shared busy flag.
    #[error("export error: an export is already in progress")]
    ExportInProgress,

    /// The requested video codec is not available on this runtime.
    #[error("unsupported codec: {0}")]
    UnsupportedCodec(String),

    /// A single captured frame could not be decoded.
    #[error("frame decode error: frame {index:?}: {reason}")]
    FrameDecode {
        /// Position of the frame in the frame buffer.
        index: FrameIndex,
        /// Decoder message.
        reason: String,
    },

    /// The host could not provide a drawing target.
    #[error("canvas context unavailable: {0}")]
    CanvasContextUnavailable(String),

    /// Encoder process failure (spawn, pipe, non-zero exit).
    #[error("encode error: {0}")]
    Encode(String),

    /// Everything else, usually IO with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FractalError {
    /// Build a [`FractalError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FractalError::UnsupportedCodec`].
    pub fn unsupported_codec(msg: impl Into<String>) -> Self {
        Self::UnsupportedCodec(msg.into())
    }

    /// Build a [`FractalError::FrameDecode`].
    pub fn frame_decode(index: FrameIndex, reason: impl Into<String>) -> Self {
        Self::FrameDecode {
            index,
            reason: reason.into(),
        }
    }

    /// Build a [`FractalError::CanvasContextUnavailable`].
    pub fn canvas_unavailable(msg: impl Into<String>) -> Self {
        Self::CanvasContextUnavailable(msg.into())
    }

    /// Build a [`FractalError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
