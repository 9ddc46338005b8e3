//! Loading `AnimateHeightProps` from TOML and JSON.

use std::io::Write;

use reveal_core::animation::motion::Easing;
use reveal_core::animation::{Motion, SpringParams};
use reveal_widgets::animate_height::{Decorations, PropsError};
use reveal_widgets::{AnimateHeight, AnimateHeightProps, EnterFrom, Recompute};

#[test]
fn empty_toml_yields_defaults() {
    let props = AnimateHeightProps::from_toml_str("").unwrap();
    assert_eq!(props, AnimateHeightProps::default());
}

#[test]
fn toml_with_every_option() {
    let props = AnimateHeightProps::from_toml_str(
        r#"
        initial_height = 12.0
        hide_height = 4.0
        hide = "false"
        enter_from = "bottom"
        disabled = 0
        decorations = "OPACITY | SCALE"

        [motion]
        kind = "timed"
        duration_ms = 180
        easing = "ease_out_cubic"
        "#,
    )
    .unwrap();

    assert_eq!(props.initial_height, 12.0);
    assert_eq!(props.hide_height, 4.0);
    assert!(!props.hide.get());
    assert!(!props.disabled.get());
    assert_eq!(props.enter_from, EnterFrom::Bottom);
    assert_eq!(props.decorations, Decorations::OPACITY | Decorations::SCALE);
    assert_eq!(
        props.motion,
        Motion::Timed {
            duration_ms: 180,
            easing: Easing::EaseOutCubic,
        }
    );
}

#[test]
fn json_accepts_camel_case_and_loose_flags() {
    let props = AnimateHeightProps::from_json_str(
        r#"{
            "initialHeight": 0,
            "hideHeight": 8,
            "hide": "true",
            "enterFrom": "bottom",
            "disabled": null,
            "motion": { "kind": "spring", "stiffness": 200, "damping": 20 }
        }"#,
    )
    .unwrap();

    assert_eq!(props.hide_height, 8.0);
    assert!(props.hide.get());
    assert!(!props.disabled.get());
    assert_eq!(props.enter_from, EnterFrom::Bottom);
    assert_eq!(
        props.motion,
        Motion::Spring(SpringParams {
            stiffness: 200.0,
            damping: 20.0,
        })
    );
}

#[test]
fn loaded_flags_drive_the_controller() {
    let props = AnimateHeightProps::from_json_str(r#"{"hide": "true", "hideHeight": 3}"#).unwrap();
    let mut panel = AnimateHeight::new(props);
    let Recompute::Retargeted(request) = panel.set_hide("false") else {
        panic!("expected retarget back to the measured height");
    };
    assert_eq!(request.to, 0.0);
    assert!(!request.hidden);
}

#[test]
fn validation_failures_are_reported_together() {
    let err = AnimateHeightProps::from_toml_str(
        r#"
        hide_height = -1.0

        [motion]
        kind = "timed"
        duration_ms = 0
        easing = "linear"
        "#,
    )
    .unwrap_err();

    match err {
        PropsError::Validation(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().any(|e| e.contains("hide_height")));
            assert!(errors.iter().any(|e| e.contains("duration_ms")));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn malformed_input_surfaces_parser_errors() {
    let toml_err = AnimateHeightProps::from_toml_str("enter_from = \"left\"").unwrap_err();
    assert!(matches!(toml_err, PropsError::Toml(_)));
    assert!(toml_err.to_string().starts_with("TOML parse error"));

    let json_err = AnimateHeightProps::from_json_str("{").unwrap_err();
    assert!(matches!(json_err, PropsError::Json(_)));
    assert!(std::error::Error::source(&json_err).is_some());
}

#[test]
fn toml_round_trip_preserves_props() {
    let props = AnimateHeightProps::new()
        .hide_height(2.0)
        .hide(true)
        .enter_from(EnterFrom::Bottom)
        .decorations(Decorations::OPACITY)
        .motion(Motion::spring(250.0, 24.0));
    let text = props.to_toml_string().unwrap();
    assert_eq!(AnimateHeightProps::from_toml_str(&text).unwrap(), props);
}

#[test]
fn loads_from_files() {
    let mut toml_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(toml_file, "hide = true\nhide_height = 1.5").unwrap();
    let from_toml = AnimateHeightProps::from_toml_file(toml_file.path()).unwrap();
    assert!(from_toml.hide.get());
    assert_eq!(from_toml.hide_height, 1.5);

    let mut json_file = tempfile::NamedTempFile::new().unwrap();
    write!(json_file, r#"{{"enterFrom": "bottom"}}"#).unwrap();
    let from_json = AnimateHeightProps::from_json_file(json_file.path()).unwrap();
    assert_eq!(from_json.enter_from, EnterFrom::Bottom);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AnimateHeightProps::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, PropsError::Io(_)));
}
