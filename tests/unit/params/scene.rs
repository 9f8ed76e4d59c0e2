use super::*;
use crate::foundation::core::Rgba8;

#[test]
fn defaults_validate_and_round_trip_through_json() {
    let params = SceneParams::default();
    params.validate().unwrap();

    let json = params.to_json_pretty().unwrap();
    let back = SceneParams::from_json(&json).unwrap();
    assert_eq!(back, params);
}

#[test]
fn partial_documents_fill_in_defaults() {
    let params = SceneParams::from_json(
        r##"{
            "color": { "use_custom_colors": true, "custom": { "start": "#FF0000", "middle": "#00FF00", "end": "#0000FF" } },
            "render": { "depth": 1.5, "background": "#101010" }
        }"##,
    )
    .unwrap();
    assert!(params.color.use_custom_colors);
    assert_eq!(params.color.custom.start, Rgba8::opaque(255, 0, 0));
    assert_eq!(params.render.depth, 1.5);
    assert_eq!(params.render.element_size, 0.04);
    assert_eq!(params.render.background, Rgba8::opaque(16, 16, 16));
    assert_eq!(params.blend, BlendParameters::default());
}

#[test]
fn out_of_range_values_are_rejected() {
    for doc in [
        r#"{"render": {"animation_speed": 0.0}}"#,
        r#"{"render": {"element_size": 0.5}}"#,
        r#"{"render": {"depth": 3.0}}"#,
        r#"{"render": {"particle_count": 0}}"#,
        r#"{"color": {"animation_speed": 9.0}}"#,
        r#"{"render": {"camera": {"distance": -1.0}}}"#,
    ] {
        let err = SceneParams::from_json(doc).unwrap_err();
        assert!(err.to_string().contains("validation error"), "{doc}: {err}");
    }
}

#[test]
fn from_path_reports_missing_files() {
    let err = SceneParams::from_path("target/does-not-exist/params.json").unwrap_err();
    assert!(err.to_string().contains("failed to read scene params"));
}
