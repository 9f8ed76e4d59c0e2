use super::*;

fn frame(w: u32, h: u32, px: [u8; 4], premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied,
    }
}

#[test]
fn opaque_frame_survives_png() {
    let f = frame(3, 2, [10, 200, 30, 255], true);
    let png = encode_png(&f).unwrap();
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    let back = decode_png(FrameIndex(0), &png).unwrap();
    assert_eq!(back.resolution(), f.resolution());
    assert_eq!(back.data, f.data);
    assert!(!back.premultiplied);
}

#[test]
fn premultiplied_pixels_are_stored_straight() {
    let f = frame(1, 1, [64, 0, 0, 128], true);
    let back = decode_png(FrameIndex(0), &encode_png(&f).unwrap()).unwrap();
    assert_eq!(back.data, vec![128, 0, 0, 128]);
}

#[test]
fn corrupt_bytes_report_the_frame_index() {
    let err = decode_png(FrameIndex(7), b"not a png").unwrap_err();
    match err {
        FractalError::FrameDecode { index, .. } => assert_eq!(index, FrameIndex(7)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn length_mismatch_is_rejected() {
    let mut f = frame(2, 2, [0, 0, 0, 255], false);
    f.data.pop();
    assert!(encode_png(&f).is_err());
}

#[test]
fn scale_to_resamples_uniform_frames() {
    let f = frame(4, 4, [20, 40, 60, 255], false);
    let out = scale_to(f, Resolution::new(2, 3).unwrap()).unwrap();
    assert_eq!((out.width, out.height), (2, 3));
    assert!(out.data.chunks_exact(4).all(|p| p == [20, 40, 60, 255]));
}
