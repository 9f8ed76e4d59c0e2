use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FractalError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FractalError::unsupported_codec("vp9")
            .to_string()
            .contains("unsupported codec: vp9")
    );
    assert!(
        FractalError::canvas_unavailable("x")
            .to_string()
            .contains("canvas context unavailable:")
    );
    assert!(FractalError::encode("x").to_string().contains("encode error:"));
    assert!(
        FractalError::EmptyFrameBuffer
            .to_string()
            .contains("frame buffer is empty")
    );
}

#[test]
fn frame_decode_names_the_frame() {
    let err = FractalError::frame_decode(FrameIndex(7), "bad magic");
    let msg = err.to_string();
    assert!(msg.contains("FrameIndex(7)"));
    assert!(msg.contains("bad magic"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FractalError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
