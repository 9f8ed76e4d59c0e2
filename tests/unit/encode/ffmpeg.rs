use super::*;

const BG: Rgba8 = Rgba8::opaque(10, 20, 30);

#[test]
fn transparent_pixels_become_background() {
    let mut dst = vec![0u8; 4];
    flatten_over_bg_to_opaque_rgba8(&mut dst, &[0, 0, 0, 0], true, BG).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
    flatten_over_bg_to_opaque_rgba8(&mut dst, &[99, 99, 99, 0], false, BG).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn opaque_pixels_pass_through() {
    let src = [1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_over_bg_to_opaque_rgba8(&mut dst, &src, false, BG).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn straight_and_premultiplied_agree() {
    let mut a = vec![0u8; 4];
    let mut b = vec![0u8; 4];
    flatten_over_bg_to_opaque_rgba8(&mut a, &[200, 100, 50, 128], false, BG).unwrap();
    flatten_over_bg_to_opaque_rgba8(&mut b, &[100, 50, 25, 128], true, BG).unwrap();
    assert_eq!(a, b);
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_over_bg_to_opaque_rgba8(&mut dst, &[0; 4], true, BG).is_err());
}

#[test]
fn fallback_is_matroska_mpeg4() {
    assert_eq!(
        FfmpegBackend::new().guaranteed_fallback(),
        CodecCandidate::MKV_MPEG4
    );
}
