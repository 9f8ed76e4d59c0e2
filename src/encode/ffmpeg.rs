use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::Context as _;

use crate::encode::codec::{CodecCandidate, CodecSupport, Container};
use crate::encode::video::{VideoBackend, VideoEncoder, VideoEncoderConfig};
use crate::foundation::core::{Fps, Rgba8};
use crate::foundation::error::{FractalError, FractalResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

/// Encoder runtime backed by the system `ffmpeg`.
///
/// Codec support is probed once through `ffmpeg -encoders`. MPEG-4 Part 2 in Matroska uses
/// ffmpeg's built-in encoder and is the guaranteed fallback.
#[derive(Debug, Default)]
pub struct FfmpegBackend {
    encoders: OnceLock<Option<String>>,
}

impl FfmpegBackend {
    /// Create a backend; nothing is spawned until the first query.
    pub fn new() -> Self {
        Self::default()
    }

    fn encoder_listing(&self) -> Option<&str> {
        self.encoders
            .get_or_init(|| {
                let out = Command::new("ffmpeg")
                    .args(["-hide_banner", "-encoders"])
                    .stdin(Stdio::null())
                    .stderr(Stdio::null())
                    .output()
                    .ok()?;
                out.status
                    .success()
                    .then(|| String::from_utf8_lossy(&out.stdout).into_owned())
            })
            .as_deref()
    }
}

impl CodecSupport for FfmpegBackend {
    fn supports(&self, candidate: CodecCandidate) -> bool {
        let Some(listing) = self.encoder_listing() else {
            return false;
        };
        let name = candidate.codec.ffmpeg_encoder();
        // Listing rows look like ` V....D libx264   libx264 H.264 ...`.
        listing
            .lines()
            .any(|line| line.split_whitespace().nth(1) == Some(name))
    }

    fn guaranteed_fallback(&self) -> CodecCandidate {
        CodecCandidate::MKV_MPEG4
    }
}

impl VideoBackend for FfmpegBackend {
    fn open(&mut self, cfg: &VideoEncoderConfig) -> FractalResult<Box<dyn VideoEncoder>> {
        if cfg.candidate != self.guaranteed_fallback() && !self.supports(cfg.candidate) {
            return Err(FractalError::unsupported_codec(cfg.candidate.label()));
        }
        Ok(Box::new(FfmpegVideoEncoder::spawn(cfg)?))
    }
}

/// One `ffmpeg` process streaming raw RGBA frames into a temporary container file.
pub struct FfmpegVideoEncoder {
    cfg: VideoEncoderConfig,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    out: TempFileGuard,
    scratch: Vec<u8>,
    last_pts: Option<Duration>,
}

impl FfmpegVideoEncoder {
    /// Start `ffmpeg` for `cfg`.
    #[tracing::instrument(level = "debug", skip(cfg), fields(codec = %cfg.candidate, res = %cfg.resolution))]
    pub fn spawn(cfg: &VideoEncoderConfig) -> FractalResult<Self> {
        cfg.resolution.validate()?;
        if !(1..=16).contains(&cfg.bitrate_mbps) {
            return Err(FractalError::validation(format!(
                "bitrate must be in [1, 16] Mbps, got {}",
                cfg.bitrate_mbps
            )));
        }

        let path = std::env::temp_dir().join(format!(
            "fractal_blend_video_{}_{}.{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0),
            cfg.candidate.extension()
        ));
        let out = TempFileGuard(Some(path.clone()));

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &cfg.resolution.to_string(),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0", "-an", "-c:v", cfg.candidate.codec.ffmpeg_encoder()]);
        cmd.args(["-b:v", &format!("{}M", cfg.bitrate_mbps)]);
        // yuv420p needs even edges; pad odd canvases by one pixel.
        cmd.args([
            "-vf",
            "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-pix_fmt",
            "yuv420p",
        ]);
        if cfg.candidate.container == Container::Mp4 {
            cmd.args(["-movflags", "+faststart"]);
        }
        cmd.args(["-f", cfg.candidate.container.ffmpeg_muxer()]);
        cmd.arg(&path);

        let mut child = cmd.spawn().map_err(|e| {
            FractalError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| FractalError::encode("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| FractalError::encode("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        tracing::debug!(path = %path.display(), "ffmpeg started");
        Ok(Self {
            cfg: *cfg,
            child: Some(child),
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
            out,
            scratch: vec![0; cfg.resolution.rgba8_len()],
            last_pts: None,
        })
    }

    fn join_stderr(&mut self) -> String {
        let bytes = self
            .stderr_drain
            .take()
            .and_then(|h| h.join().ok())
            .and_then(|r| r.ok())
            .unwrap_or_default();
        String::from_utf8_lossy(&bytes).trim().to_owned()
    }
}

impl VideoEncoder for FfmpegVideoEncoder {
    fn present(&mut self, frame: &FrameRGBA, pts: Duration) -> FractalResult<()> {
        if let Some(last) = self.last_pts
            && pts <= last
        {
            return Err(FractalError::encode(
                "ffmpeg encoder received non-increasing presentation time",
            ));
        }
        self.last_pts = Some(pts);

        if frame.resolution() != self.cfg.resolution {
            return Err(FractalError::validation(format!(
                "frame size mismatch: got {}, expected {}",
                frame.resolution(),
                self.cfg.resolution
            )));
        }
        flatten_over_bg_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.cfg.background,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(FractalError::encode("ffmpeg encoder is already finished"));
        };
        use std::io::Write as _;
        if let Err(e) = stdin.write_all(&self.scratch) {
            drop(self.stdin.take());
            let stderr = self.join_stderr();
            return Err(FractalError::encode(format!(
                "failed to write frame to ffmpeg stdin: {e}: {stderr}"
            )));
        }
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> FractalResult<Vec<u8>> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| FractalError::encode("ffmpeg encoder not started"))?;
        let status = child
            .wait()
            .map_err(|e| FractalError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr = self.join_stderr();
        if !status.success() {
            return Err(FractalError::encode(format!(
                "ffmpeg exited with status {status}: {stderr}"
            )));
        }

        let path = self
            .out
            .0
            .as_deref()
            .ok_or_else(|| FractalError::encode("ffmpeg output path missing"))?;
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read encoded video '{}'", path.display()))?;
        tracing::debug!(bytes = bytes.len(), "ffmpeg finished");
        Ok(bytes)
    }
}

impl Drop for FfmpegVideoEncoder {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // For rawvideo input, `-r` before `-i` sets the input rate.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

pub(crate) fn flatten_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    premultiplied: bool,
    bg: Rgba8,
) -> FractalResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FractalError::validation(
            "flatten_over_bg_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_rgb = [u16::from(bg.r), u16::from(bg.g), u16::from(bg.b)];
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if premultiplied {
                u16::from(s[c])
            } else {
                mul_div255_u16(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255_u16(bg_rgb[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> FractalResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
