use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::encode::codec::Container;
use crate::foundation::core::{Fps, Resolution};
use crate::foundation::error::{FractalError, FractalResult};
use crate::params::check_range;

/// Longest accepted recording in seconds.
pub const MAX_RECORDING_SECS: f64 = 3600.0;

/// Artifact kind requested by the user.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ExportFormat {
    /// First captured frame as one PNG.
    #[serde(rename = "png")]
    Png,
    /// Every captured frame as `frame_<index>.png`, optionally bundled into one zip.
    #[default]
    #[serde(rename = "png-sequence")]
    PngSequence,
    /// WebM video (VP9 or VP8).
    #[serde(rename = "webm")]
    Webm,
    /// MP4 video (H.264).
    #[serde(rename = "mp4")]
    Mp4,
}

impl ExportFormat {
    /// Every format, in menu order.
    pub const ALL: [Self; 4] = [Self::Png, Self::PngSequence, Self::Webm, Self::Mp4];

    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::PngSequence => "png-sequence",
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
        }
    }

    /// Requested video container, or `None` for still-image formats.
    pub fn container(self) -> Option<Container> {
        match self {
            Self::Webm => Some(Container::WebM),
            Self::Mp4 => Some(Container::Mp4),
            Self::Png | Self::PngSequence => None,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                FractalError::validation(format!(
                    "unknown export format '{s}' (expected png, png-sequence, webm or mp4)"
                ))
            })
    }
}

/// User-facing export and recording settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Artifact kind.
    pub format: ExportFormat,
    /// Frames per second, `[1, 60]`.
    pub frame_rate: u32,
    /// Video bitrate in Mbps, `[1, 16]`.
    pub bitrate_mbps: u32,
    /// Capture resolution.
    pub resolution: Resolution,
    /// Recording length in seconds, `(0, 3600]`.
    pub recording_duration_secs: f64,
    /// Files delivered per batch in sequence export.
    pub batch_size: usize,
    /// Pause between sequence batches, in milliseconds.
    pub batch_delay_ms: u64,
    /// Bundle a PNG sequence into one `fractal-frames-<ts>.zip` instead of separate files.
    pub archive: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            frame_rate: 24,
            bitrate_mbps: 8,
            resolution: Resolution::default(),
            recording_duration_secs: 5.0,
            batch_size: 5,
            batch_delay_ms: 200,
            archive: false,
        }
    }
}

impl ExportOptions {
    /// Check every range.
    pub fn validate(&self) -> FractalResult<()> {
        if !(1..=60).contains(&self.frame_rate) {
            return Err(FractalError::validation(format!(
                "frame_rate must be in [1, 60], got {}",
                self.frame_rate
            )));
        }
        if !(1..=16).contains(&self.bitrate_mbps) {
            return Err(FractalError::validation(format!(
                "bitrate must be in [1, 16] Mbps, got {}",
                self.bitrate_mbps
            )));
        }
        self.resolution.validate()?;
        if self.recording_duration_secs <= 0.0 {
            return Err(FractalError::validation(
                "recording_duration must be > 0 seconds",
            ));
        }
        check_range(
            "recording_duration",
            self.recording_duration_secs,
            0.0,
            MAX_RECORDING_SECS,
        )?;
        if self.batch_size == 0 {
            return Err(FractalError::validation("batch_size must be >= 1"));
        }
        Ok(())
    }

    /// Frame rate as [`Fps`].
    pub fn fps(&self) -> FractalResult<Fps> {
        Fps::integer(self.frame_rate)
    }

    /// Frames a full recording should contain: `ceil(duration * frame_rate)`.
    pub fn expected_frames(&self) -> u64 {
        Fps::integer(self.frame_rate)
            .map_or(0, |fps| fps.secs_to_frames_ceil(self.recording_duration_secs))
    }

    /// Pause between sequence batches.
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/format.rs"]
mod tests;
