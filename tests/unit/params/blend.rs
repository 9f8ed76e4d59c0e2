use super::*;

fn sum(p: &BlendParameters) -> f64 {
    p.weights().iter().sum()
}

#[test]
fn weights_sum_to_one_after_every_single_component_edit() {
    let mut p = BlendParameters::default();
    let steps = [0.0, 0.01, 0.1, 0.25, 0.33, 0.5, 0.75, 0.99, 1.0];
    for family in CurveFamily::ALL {
        for v in steps {
            p.update_blend_factor(family, v).unwrap();
            assert!(
                (sum(&p) - 1.0).abs() < WEIGHT_SUM_TOLERANCE,
                "sum drifted after {family:?}={v}: {:?}",
                p.weights()
            );
            assert!(p.weights().iter().all(|w| *w >= 0.0));
            p.validate().unwrap();
        }
    }
}

#[test]
fn edit_rescales_proportionally() {
    let mut p = BlendParameters::from_weights([1.0, 1.0, 2.0], BlendMethod::Linear).unwrap();
    assert_eq!(p.weights(), [0.25, 0.25, 0.5]);

    p.update_blend_factor(CurveFamily::Spiral, 1.0).unwrap();
    // [1.0, 0.25, 0.5] / 1.75
    let w = p.weights();
    assert!((w[0] - 1.0 / 1.75).abs() < 1e-12);
    assert!((w[1] - 0.25 / 1.75).abs() < 1e-12);
    assert!((w[2] - 0.5 / 1.75).abs() < 1e-12);
}

#[test]
fn zeroing_every_weight_resets_to_equal_split() {
    let mut p = BlendParameters::from_weights([1.0, 0.0, 0.0], BlendMethod::Radial).unwrap();
    p.update_blend_factor(CurveFamily::Spiral, 0.0).unwrap();
    for w in p.weights() {
        assert!((w - 1.0 / 3.0).abs() < 1e-12);
    }
    assert_eq!(p.method, BlendMethod::Radial);
}

#[test]
fn out_of_range_edits_are_clamped_and_nan_rejected() {
    let mut p = BlendParameters::default();
    p.update_blend_factor(CurveFamily::Trefoil, 7.0).unwrap();
    assert!((sum(&p) - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
    p.update_blend_factor(CurveFamily::Mobius, -3.0).unwrap();
    assert_eq!(p.weight(CurveFamily::Mobius), 0.0);
    assert!(p.update_blend_factor(CurveFamily::Mobius, f64::NAN).is_err());
}

#[test]
fn deserialization_normalizes_and_rejects_bad_weights() {
    let p: BlendParameters =
        serde_json::from_str(r#"{"spiral": 2, "mobius": 1, "trefoil": 1, "method": "smooth_step"}"#)
            .unwrap();
    assert_eq!(p.weights(), [0.5, 0.25, 0.25]);
    assert_eq!(p.method, BlendMethod::SmoothStep);

    assert!(
        serde_json::from_str::<BlendParameters>(r#"{"spiral": 0, "mobius": 0, "trefoil": 0}"#)
            .is_err()
    );
    assert!(
        serde_json::from_str::<BlendParameters>(r#"{"spiral": -1, "mobius": 1, "trefoil": 1}"#)
            .is_err()
    );
}
