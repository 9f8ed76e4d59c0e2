use super::*;

#[test]
fn smoothstep_matches_glsl_reference_points() {
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    assert!((smoothstep(0.0, 1.0, 0.25) - 0.156_25).abs() < 1e-6);
}

#[test]
fn linear_step_handles_degenerate_edges() {
    assert_eq!(linear_step(0.0, 0.5, 0.25), 0.5);
    assert_eq!(linear_step(1.0, 1.0, 0.5), 0.0);
    assert_eq!(linear_step(1.0, 1.0, 1.5), 1.0);
}

#[test]
fn fract_is_positive_for_negative_inputs() {
    assert!((fract(1.25) - 0.25).abs() < 1e-6);
    assert!((fract(-0.25) - 0.75).abs() < 1e-6);
}

#[test]
fn mix3_interpolates_componentwise() {
    let m = mix3(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0), 0.5);
    assert_eq!(m, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(0, 200), 0);
}
