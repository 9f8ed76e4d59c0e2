//! Artifact file names.

/// Minimum zero-padding of sequence frame numbers.
pub const MIN_SEQUENCE_DIGITS: usize = 5;

/// Milliseconds since the Unix epoch, used to make names unique.
pub fn timestamp_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// `fractal-frame-<ts>.png`
pub fn single_frame_name(ts: u128) -> String {
    format!("fractal-frame-{ts}.png")
}

/// Digits needed for the last index of `count` frames, never fewer than five.
pub fn sequence_pad_width(count: usize) -> usize {
    let last = count.saturating_sub(1);
    let digits = last.checked_ilog10().map_or(1, |d| d as usize + 1);
    digits.max(MIN_SEQUENCE_DIGITS)
}

/// `frame_<index>.png`, zero-padded to `width`.
pub fn sequence_frame_name(index: usize, width: usize) -> String {
    format!("frame_{index:0width$}.png")
}

/// `fractal-frames-<ts>.zip`
pub fn archive_name(ts: u128) -> String {
    format!("fractal-frames-{ts}.zip")
}

/// `fractal-animation-<ts>.<ext>`
pub fn video_name(ts: u128, extension: &str) -> String {
    format!("fractal-animation-{ts}.{extension}")
}
