use super::*;
use crate::encode::png::encode_png;
use crate::encode::sink::InMemoryArtifactSink;
use crate::foundation::core::Resolution;
use crate::render::backend::FrameRGBA;

fn buffer(n: usize) -> FrameBuffer {
    let res = Resolution::new(4, 4).unwrap();
    let mut fb = FrameBuffer::with_budget(None);
    for i in 0..n {
        let frame = FrameRGBA {
            width: 4,
            height: 4,
            data: [i as u8, 0, 0, 255].repeat(16),
            premultiplied: true,
        };
        fb.try_push(res, encode_png(&frame).unwrap()).unwrap();
    }
    fb
}

fn fast_opts(format: ExportFormat) -> ExportOptions {
    ExportOptions {
        format,
        batch_delay_ms: 0,
        ..ExportOptions::default()
    }
}

#[test]
fn empty_buffer_is_rejected_and_flag_released() {
    let exporter = Exporter::new();
    let mut sink = InMemoryArtifactSink::new();
    let mut calls = 0;
    for format in ExportFormat::ALL {
        let err = exporter
            .export(&buffer(0), &fast_opts(format), &mut sink, &mut |_| calls += 1)
            .unwrap_err();
        assert!(matches!(err, FractalError::EmptyFrameBuffer), "{format}");
        assert!(!exporter.is_exporting());
    }
    assert!(sink.artifacts().is_empty());
    assert_eq!(calls, 0);
}

#[test]
fn held_flag_refuses_a_second_export() {
    let exporter = Exporter::new();
    let other = exporter.clone();
    let guard = BusyGuard::acquire(&exporter.busy).unwrap();
    assert!(other.is_exporting());

    let mut sink = InMemoryArtifactSink::new();
    let err = other
        .export(&buffer(2), &fast_opts(ExportFormat::Png), &mut sink, &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, FractalError::ExportInProgress));
    assert!(sink.artifacts().is_empty());

    drop(guard);
    assert!(!other.is_exporting());
    other
        .export(&buffer(2), &fast_opts(ExportFormat::Png), &mut sink, &mut |_| {})
        .unwrap();
}

#[test]
fn invalid_options_fail_before_taking_the_flag() {
    let exporter = Exporter::new();
    let opts = ExportOptions {
        frame_rate: 0,
        ..fast_opts(ExportFormat::Webm)
    };
    let err = exporter
        .export(&buffer(1), &opts, &mut InMemoryArtifactSink::new(), &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, FractalError::Validation(_)));
    assert!(!exporter.is_exporting());
}

#[test]
fn single_png_is_the_first_frame() {
    let exporter = Exporter::new();
    let fb = buffer(3);
    let mut sink = InMemoryArtifactSink::new();
    let mut seen = Vec::new();
    let report = exporter
        .export(&fb, &fast_opts(ExportFormat::Png), &mut sink, &mut |p| seen.push(p))
        .unwrap();
    assert_eq!(report.frames_exported, 1);
    let a = &sink.artifacts()[0];
    assert!(a.filename.starts_with("fractal-frame-") && a.filename.ends_with(".png"));
    assert_eq!(a.bytes, fb.frames()[0].png);
    assert_eq!(seen, vec![1.0]);
    assert_eq!(exporter.progress(), 1.0);
}

#[test]
fn still_export_respects_the_flag() {
    let exporter = Exporter::new();
    let _guard = BusyGuard::acquire(&exporter.busy).unwrap();
    let err = exporter
        .export_still(vec![1], &mut InMemoryArtifactSink::new(), &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, FractalError::ExportInProgress));
}
