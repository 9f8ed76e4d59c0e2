use serde::{Deserialize, Serialize};

/// Video container formats the exporter can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    /// WebM (`.webm`).
    WebM,
    /// MPEG-4 Part 14 (`.mp4`).
    Mp4,
    /// Matroska (`.mkv`), the universal fallback.
    Matroska,
}

impl Container {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::WebM => "webm",
            Self::Mp4 => "mp4",
            Self::Matroska => "mkv",
        }
    }

    /// MIME type of the container.
    pub fn mime(self) -> &'static str {
        match self {
            Self::WebM => "video/webm",
            Self::Mp4 => "video/mp4",
            Self::Matroska => "video/x-matroska",
        }
    }

    /// Muxer name passed to `ffmpeg -f`.
    pub fn ffmpeg_muxer(self) -> &'static str {
        match self {
            Self::WebM => "webm",
            Self::Mp4 => "mp4",
            Self::Matroska => "matroska",
        }
    }
}

/// Video codecs known to the negotiation table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    /// VP9.
    Vp9,
    /// VP8.
    Vp8,
    /// H.264 / AVC.
    H264,
    /// MPEG-4 Part 2.
    Mpeg4,
}

impl VideoCodec {
    /// Short codec name as used in MIME `codecs=` parameters.
    pub fn name(self) -> &'static str {
        match self {
            Self::Vp9 => "vp9",
            Self::Vp8 => "vp8",
            Self::H264 => "h264",
            Self::Mpeg4 => "mpeg4",
        }
    }

    /// Encoder name understood by `ffmpeg -c:v`.
    pub fn ffmpeg_encoder(self) -> &'static str {
        match self {
            Self::Vp9 => "libvpx-vp9",
            Self::Vp8 => "libvpx",
            Self::H264 => "libx264",
            Self::Mpeg4 => "mpeg4",
        }
    }
}

/// A container/codec pair the encoder runtime may or may not support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodecCandidate {
    /// Output container.
    pub container: Container,
    /// Video codec inside the container.
    pub codec: VideoCodec,
}

impl CodecCandidate {
    /// WebM with VP9.
    pub const WEBM_VP9: Self = Self::new(Container::WebM, VideoCodec::Vp9);
    /// WebM with VP8.
    pub const WEBM_VP8: Self = Self::new(Container::WebM, VideoCodec::Vp8);
    /// MP4 with H.264.
    pub const MP4_H264: Self = Self::new(Container::Mp4, VideoCodec::H264);
    /// Matroska with MPEG-4 Part 2.
    pub const MKV_MPEG4: Self = Self::new(Container::Matroska, VideoCodec::Mpeg4);

    /// Pair a container with a codec.
    pub const fn new(container: Container, codec: VideoCodec) -> Self {
        Self { container, codec }
    }

    /// Output file extension.
    pub fn extension(self) -> &'static str {
        self.container.extension()
    }

    /// MIME-style label, e.g. `video/webm;codecs=vp9`.
    pub fn label(self) -> String {
        format!("{};codecs={}", self.container.mime(), self.codec.name())
    }
}

impl std::fmt::Display for CodecCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Ordered preference list for a requested container.
pub fn preferred_candidates(container: Container) -> &'static [CodecCandidate] {
    match container {
        Container::WebM => &[CodecCandidate::WEBM_VP9, CodecCandidate::WEBM_VP8],
        Container::Mp4 => &[CodecCandidate::MP4_H264],
        Container::Matroska => &[CodecCandidate::MKV_MPEG4],
    }
}

/// Capability query answered by an encoder runtime.
pub trait CodecSupport {
    /// Whether `candidate` can be encoded.
    fn supports(&self, candidate: CodecCandidate) -> bool;

    /// The candidate this runtime can always produce.
    fn guaranteed_fallback(&self) -> CodecCandidate;
}

/// Candidates to try, in order, for `requested`.
///
/// Supported preferred candidates come first; the runtime's guaranteed fallback is always last,
/// so the list is never empty.
pub fn negotiate(requested: Container, support: &dyn CodecSupport) -> Vec<CodecCandidate> {
    let fallback = support.guaranteed_fallback();
    let mut out: Vec<CodecCandidate> = preferred_candidates(requested)
        .iter()
        .copied()
        .filter(|c| *c != fallback && support.supports(*c))
        .collect();
    out.push(fallback);
    out
}
