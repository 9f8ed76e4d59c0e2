use super::*;
use crate::render::cpu::CpuCurveRenderer;

fn small_cfg() -> RecorderConfig {
    RecorderConfig {
        resolution: Resolution::new(16, 12).unwrap(),
        ..RecorderConfig::default()
    }
}

fn params() -> SceneParams {
    let mut p = SceneParams::default();
    p.render.particle_count = 50;
    p
}

fn tick(seq: u64) -> AnimationTick {
    AnimationTick {
        seq,
        elapsed_secs: seq as f64 / 60.0,
    }
}

#[test]
fn inactive_recorder_ignores_ticks() {
    let mut surface = CpuCurveRenderer::new();
    let mut rec = Recorder::new(small_cfg()).unwrap();
    assert_eq!(
        rec.on_tick(&tick(0), &params(), &mut surface).unwrap(),
        TickOutcome::Inactive
    );
    assert!(rec.frames().is_empty());
}

#[test]
fn twenty_ticks_capture_ten_frames_by_default() {
    let mut surface = CpuCurveRenderer::new();
    let mut rec = Recorder::new(small_cfg()).unwrap();
    rec.start(&mut surface).unwrap();
    let p = params();
    let outcomes: Vec<_> = (0..20)
        .map(|i| rec.on_tick(&tick(i), &p, &mut surface).unwrap())
        .collect();
    assert_eq!(outcomes[0], TickOutcome::Skipped);
    assert_eq!(outcomes[1], TickOutcome::Captured(FrameIndex(0)));
    assert_eq!(rec.frames().len(), 10);
    for f in rec.frames().frames() {
        assert_eq!(f.resolution, small_cfg().resolution);
    }
}

#[test]
fn stop_releases_target_and_keeps_frames() {
    let mut surface = CpuCurveRenderer::new();
    let mut rec = Recorder::new(RecorderConfig {
        policy: CapturePolicy::EveryTick,
        ..small_cfg()
    })
    .unwrap();
    rec.start(&mut surface).unwrap();
    assert_eq!(surface.live_targets(), 1);
    rec.on_tick(&tick(0), &params(), &mut surface).unwrap();
    assert!(rec.stop());
    assert!(!rec.stop());
    assert_eq!(surface.live_targets(), 0);
    assert_eq!(rec.frames().len(), 1);

    rec.start(&mut surface).unwrap();
    assert!(rec.frames().is_empty());
    drop(rec);
    assert_eq!(surface.live_targets(), 0);
}

#[test]
fn budget_exhaustion_stops_recording() {
    let mut surface = CpuCurveRenderer::new();
    let mut rec = Recorder::new(RecorderConfig {
        policy: CapturePolicy::EveryTick,
        budget: Some(1),
        ..small_cfg()
    })
    .unwrap();
    rec.start(&mut surface).unwrap();
    assert_eq!(
        rec.on_tick(&tick(0), &params(), &mut surface).unwrap(),
        TickOutcome::BudgetExhausted
    );
    assert!(!rec.is_active());
    assert_eq!(surface.live_targets(), 0);
}

#[test]
fn settings_are_locked_while_recording() {
    let mut surface = CpuCurveRenderer::new();
    let mut rec = Recorder::new(small_cfg()).unwrap();
    rec.start(&mut surface).unwrap();
    assert!(rec.set_config(RecorderConfig::default()).is_err());
    rec.stop();
    assert!(rec.set_config(RecorderConfig::default()).is_ok());
}

#[test]
fn invalid_settings_are_rejected() {
    let bad = RecorderConfig {
        opacity: 1.5,
        ..small_cfg()
    };
    assert!(matches!(
        Recorder::new(bad).unwrap_err(),
        FractalError::Validation(_)
    ));
}

struct NoCanvas;

impl RenderSurface for NoCanvas {
    fn create_target(&mut self, _: Resolution) -> FractalResult<OffscreenTarget> {
        Err(FractalError::canvas_unavailable("no 2d context"))
    }
    fn render_into(
        &mut self,
        _: &SceneParams,
        _: f64,
        _: &mut OffscreenTarget,
        _: Background,
    ) -> FractalResult<crate::render::backend::FrameRGBA> {
        unreachable!()
    }
}

#[test]
fn oversized_target_reports_canvas_unavailable() {
    let mut rec = Recorder::new(small_cfg()).unwrap();
    assert!(matches!(
        rec.start(&mut NoCanvas).unwrap_err(),
        FractalError::CanvasContextUnavailable(_)
    ));
    assert!(!rec.is_active());
}

#[test]
fn failed_start_keeps_previous_frames() {
    let mut surface = CpuCurveRenderer::new();
    let mut rec = Recorder::new(RecorderConfig {
        policy: CapturePolicy::EveryTick,
        ..small_cfg()
    })
    .unwrap();
    rec.start(&mut surface).unwrap();
    let p = params();
    for i in 0..3 {
        rec.on_tick(&tick(i), &p, &mut surface).unwrap();
    }
    rec.stop();
    let before: Vec<_> = rec.frames().frames().to_vec();
    assert_eq!(before.len(), 3);

    assert!(matches!(
        rec.start(&mut NoCanvas).unwrap_err(),
        FractalError::CanvasContextUnavailable(_)
    ));
    assert!(!rec.is_active());
    assert_eq!(rec.frames().frames(), before.as_slice());
}
