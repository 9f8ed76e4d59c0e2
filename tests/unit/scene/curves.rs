use super::*;

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn families_match_reference_points() {
    assert!(close(spiral(0.0, 0.0), Vec3::new(0.0, 0.5, -1.0)));
    assert!(close(spiral(1.0, 0.0), Vec3::new(0.0, 1.0, 1.0)));
    assert!(close(mobius(0.0, 0.0), Vec3::new(0.0, 0.5, 0.0)));
    // angle 0: (2 + 1) * (1, 0, 0) * 0.3
    assert!(close(trefoil(0.0, 0.0), Vec3::new(0.9, 0.0, 0.0)));
}

#[test]
fn linear_blend_with_one_hot_weights_selects_a_family() {
    let t = 0.3;
    let angle = curve_angle(t, 1.25, 1.0);
    for (weights, expected) in [
        ([1.0, 0.0, 0.0], spiral(t, angle)),
        ([0.0, 1.0, 0.0], mobius(t, angle)),
        ([0.0, 0.0, 1.0], trefoil(t, angle)),
    ] {
        let blend = BlendParameters::from_weights(weights, BlendMethod::Linear).unwrap();
        assert!(close(blended_position(&blend, t, angle), expected), "{weights:?}");
    }
}

#[test]
fn smoothstep_blend_ends_halfway_to_trefoil() {
    let (a, b, c) = (Vec3::X, Vec3::Y, Vec3::Z);
    // uv.y = 0.5 -> smoothstep = 0.5 toward c; uv.x = 0 keeps `a`.
    let out = blend_curves(a, b, c, Vec3::ZERO, BlendMethod::SmoothStep, Vec2::new(0.0, 0.5));
    assert!(close(out, Vec3::new(0.5, 0.0, 0.5)));
}

#[test]
fn radial_blend_at_center_is_first_family() {
    let out = blend_curves(
        Vec3::X,
        Vec3::Y,
        Vec3::Z,
        Vec3::ZERO,
        BlendMethod::Radial,
        Vec2::new(0.5, 0.5),
    );
    assert!(close(out, Vec3::X));
}

#[test]
fn angle_advances_with_time_and_speed() {
    assert_eq!(curve_angle(0.0, 2.0, 1.5), 3.0);
    assert!((curve_angle(1.0, 0.0, 1.0) - 2.0 * 3.14159 * 8.0).abs() < 1e-4);
}
