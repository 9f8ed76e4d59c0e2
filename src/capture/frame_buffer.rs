use crate::foundation::core::{FrameIndex, Resolution};

/// Default ceiling on encoded frame bytes held by one recording (2 GiB).
pub const DEFAULT_FRAME_BUDGET_BYTES: usize = 2 * 1024 * 1024 * 1024;

/// One captured still image, PNG-encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    /// Capture-order position.
    pub index: FrameIndex,
    /// Pixel size of the encoded image.
    pub resolution: Resolution,
    /// PNG bytes.
    pub png: Vec<u8>,
}

/// Ordered in-memory sequence of captured frames for one recording session.
///
/// Indices are contiguous from zero. An optional byte budget bounds memory growth; a push that
/// would exceed it is refused rather than evicting earlier frames.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    frames: Vec<EncodedFrame>,
    bytes: usize,
    budget: Option<usize>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::with_budget(Some(DEFAULT_FRAME_BUDGET_BYTES))
    }
}

impl FrameBuffer {
    /// Empty buffer with the default budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with an explicit budget (`None` disables the ceiling).
    pub fn with_budget(budget: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            bytes: 0,
            budget,
        }
    }

    /// Append an encoded frame. Returns `None`, leaving the buffer untouched, when the frame
    /// would push the total past the budget.
    pub fn try_push(&mut self, resolution: Resolution, png: Vec<u8>) -> Option<FrameIndex> {
        let bytes = self.bytes.checked_add(png.len())?;
        if let Some(budget) = self.budget
            && bytes > budget
        {
            return None;
        }
        let index = self
            .frames
            .last()
            .map_or(FrameIndex(0), |last| last.index.next());
        self.frames.push(EncodedFrame {
            index,
            resolution,
            png,
        });
        self.bytes = bytes;
        Some(index)
    }

    /// Drop every frame, keeping the budget.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.bytes = 0;
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when no frames were captured.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total encoded bytes held.
    pub fn bytes_used(&self) -> usize {
        self.bytes
    }

    /// Configured byte ceiling.
    pub fn budget(&self) -> Option<usize> {
        self.budget
    }

    /// Frames in capture order.
    pub fn frames(&self) -> &[EncodedFrame] {
        &self.frames
    }

    /// First captured frame.
    pub fn first(&self) -> Option<&EncodedFrame> {
        self.frames.first()
    }
}
