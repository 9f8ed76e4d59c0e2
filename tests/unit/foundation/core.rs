use super::*;

#[test]
fn fps_rejects_zero_and_reports_interval() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(24, 0).is_err());

    let fps = Fps::integer(25).unwrap();
    assert_eq!(fps.frame_interval(), std::time::Duration::from_millis(40));
    assert_eq!(fps.secs_to_frames_ceil(2.0), 50);
    assert_eq!(fps.secs_to_frames_ceil(0.01), 1);
}

#[test]
fn resolution_bounds_are_inclusive() {
    assert!(Resolution::new(1, 1).is_ok());
    assert!(Resolution::new(8192, 8192).is_ok());
    assert!(Resolution::new(0, 10).is_err());
    assert!(Resolution::new(10, 8193).is_err());
    assert_eq!(Resolution::new(4, 2).unwrap().rgba8_len(), 32);
    assert_eq!(Resolution::default().to_string(), "1920x1080");
}

#[test]
fn hex_colors_parse_and_format() {
    assert_eq!(Rgba8::from_hex("#7F7F7F").unwrap(), Rgba8::opaque(127, 127, 127));
    assert_eq!(
        Rgba8::from_hex("ff000080").unwrap(),
        Rgba8 {
            r: 255,
            g: 0,
            b: 0,
            a: 128
        }
    );
    assert!(Rgba8::from_hex("#fff").is_err());
    assert!(Rgba8::from_hex("#gg0000").is_err());
    assert_eq!(Rgba8::opaque(1, 2, 255).to_hex(), "#0102FF");
}

#[test]
fn colors_serialize_as_hex_strings() {
    let json = serde_json::to_string(&Rgba8::WHITE).unwrap();
    assert_eq!(json, "\"#FFFFFF\"");
    let back: Rgba8 = serde_json::from_str("\"#000000\"").unwrap();
    assert_eq!(back, Rgba8::BLACK);
}

#[test]
fn frame_index_next_is_contiguous() {
    assert_eq!(FrameIndex(0).next(), FrameIndex(1));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
}
