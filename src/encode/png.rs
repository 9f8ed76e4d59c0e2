use image::ImageEncoder as _;

use crate::foundation::core::{FrameIndex, Resolution};
use crate::foundation::error::{FractalError, FractalResult};
use crate::render::backend::FrameRGBA;

/// Encode a frame as a straight-alpha RGBA8 PNG.
pub fn encode_png(frame: &FrameRGBA) -> FractalResult<Vec<u8>> {
    check_len(frame)?;
    let straight;
    let data = if frame.premultiplied {
        straight = unpremultiply(&frame.data);
        &straight
    } else {
        &frame.data
    };

    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(data, frame.width, frame.height, image::ExtendedColorType::Rgba8)
        .map_err(|e| FractalError::encode(format!("png encode failed: {e}")))?;
    Ok(out)
}

/// Decode PNG bytes captured at `index` into a straight-alpha frame.
pub fn decode_png(index: FrameIndex, bytes: &[u8]) -> FractalResult<FrameRGBA> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| FractalError::frame_decode(index, e.to_string()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(FrameRGBA {
        width,
        height,
        data: img.into_raw(),
        premultiplied: false,
    })
}

/// Resample `frame` to `target`, returning it unchanged when the size already matches.
pub fn scale_to(frame: FrameRGBA, target: Resolution) -> FractalResult<FrameRGBA> {
    if frame.resolution() == target {
        return Ok(frame);
    }
    check_len(&frame)?;
    let premultiplied = frame.premultiplied;
    let src = image::RgbaImage::from_raw(frame.width, frame.height, frame.data)
        .ok_or_else(|| FractalError::validation("frame data does not match its dimensions"))?;
    let scaled = image::imageops::resize(
        &src,
        target.width,
        target.height,
        image::imageops::FilterType::Triangle,
    );
    Ok(FrameRGBA {
        width: target.width,
        height: target.height,
        data: scaled.into_raw(),
        premultiplied,
    })
}

fn check_len(frame: &FrameRGBA) -> FractalResult<()> {
    if frame.data.len() != frame.resolution().rgba8_len() {
        return Err(FractalError::validation(format!(
            "frame data length {} does not match {}x{} rgba8",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    Ok(())
}

pub(crate) fn unpremultiply(src: &[u8]) -> Vec<u8> {
    let mut out = src.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
