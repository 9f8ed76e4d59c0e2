use super::*;

#[test]
fn formats_parse_exactly_the_four_spellings() {
    for f in ExportFormat::ALL {
        assert_eq!(f.as_str().parse::<ExportFormat>().unwrap(), f);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, format!("\"{}\"", f.as_str()));
    }
    assert!("PNG".parse::<ExportFormat>().is_err());
    assert!("png_sequence".parse::<ExportFormat>().is_err());
    assert!("gif".parse::<ExportFormat>().is_err());
}

#[test]
fn clap_spellings_match_serde() {
    use clap::ValueEnum as _;
    for f in ExportFormat::ALL {
        let pv = f.to_possible_value().unwrap();
        assert_eq!(pv.get_name(), f.as_str());
    }
}

#[test]
fn only_video_formats_have_a_container() {
    assert_eq!(ExportFormat::Webm.container(), Some(Container::WebM));
    assert_eq!(ExportFormat::Mp4.container(), Some(Container::Mp4));
    assert_eq!(ExportFormat::Png.container(), None);
    assert_eq!(ExportFormat::PngSequence.container(), None);
}

#[test]
fn defaults_are_valid() {
    let o = ExportOptions::default();
    o.validate().unwrap();
    assert_eq!(o.format, ExportFormat::PngSequence);
    assert_eq!(o.batch_size, 5);
    assert_eq!(o.batch_delay(), Duration::from_millis(200));
}

#[test]
fn out_of_range_options_are_rejected() {
    let base = ExportOptions::default();
    for bad in [
        ExportOptions {
            frame_rate: 0,
            ..base
        },
        ExportOptions {
            frame_rate: 61,
            ..base
        },
        ExportOptions {
            bitrate_mbps: 17,
            ..base
        },
        ExportOptions {
            recording_duration_secs: 0.0,
            ..base
        },
        ExportOptions {
            recording_duration_secs: 3600.5,
            ..base
        },
        ExportOptions {
            resolution: Resolution {
                width: 8193,
                height: 10,
            },
            ..base
        },
        ExportOptions {
            batch_size: 0,
            ..base
        },
    ] {
        assert!(
            matches!(bad.validate(), Err(FractalError::Validation(_))),
            "{bad:?}"
        );
    }
}

#[test]
fn expected_frames_rounds_up() {
    let o = ExportOptions {
        frame_rate: 30,
        recording_duration_secs: 1.01,
        ..ExportOptions::default()
    };
    assert_eq!(o.expected_frames(), 31);
}

#[test]
fn options_json_uses_defaults_for_missing_fields() {
    let o: ExportOptions = serde_json::from_str(r#"{"format":"webm","frame_rate":30}"#).unwrap();
    assert_eq!(o.format, ExportFormat::Webm);
    assert_eq!(o.frame_rate, 30);
    assert_eq!(o.bitrate_mbps, 8);
    assert!(!o.archive);

    let o: ExportOptions = serde_json::from_str(r#"{"archive":true}"#).unwrap();
    assert!(o.archive);
    assert_eq!(o.format, ExportFormat::PngSequence);
}
