use super::*;

fn parse(json: &str) -> SignOptions {
    serde_json::from_str(json).unwrap()
}

#[test]
fn empty_options_resolve_to_text_defaults() {
    let r = SignOptions::default().resolve().unwrap();
    assert_eq!(r.render, RenderConfig::default());
    assert!(r.palette.is_none());
    assert!(!r.looping);
    assert!(r.max_fps.is_none());
}

#[test]
fn camel_case_keys_and_loop_rename() {
    let o = parse(
        r##"{"mode":"matrix","dotPitch":5,"flipAnimation":true,"loop":true,"maxFps":30,
            "offColor":"#222","wheel":"clock","color":["red","#00ff00"]}"##,
    );
    assert_eq!(o.mode, Some(DisplayMode::Matrix));
    assert_eq!(o.dot_pitch, Some(5.0));
    assert_eq!(o.looping, Some(true));
    assert_eq!(o.wheel, Some(Wheel::Clock));
    assert!(matches!(o.color, Some(ColorSpec::List(ref l)) if l.len() == 2));

    let r = o.resolve().unwrap();
    assert!(r.looping);
    assert_eq!(r.max_fps, Some(30.0));
    assert_eq!(r.render.off_color, "#222");
}

#[test]
fn preset_forced_mode_beats_user_mode() {
    let o = parse(r#"{"preset":"splitflap","mode":"matrix","cells":4}"#);
    let r = o.resolve().unwrap();
    assert_eq!(r.render.mode, DisplayMode::SplitFlap);
    assert_eq!(r.render.cells, 4);
    assert_eq!(r.render.flip_duration, 60.0);
}

#[test]
fn user_values_layer_over_preset_defaults() {
    let o = parse(r##"{"preset":"flipdot","cols":20,"palette":["#ff0000","#00ff00"]}"##);
    let r = o.resolve().unwrap();
    assert_eq!(r.render.mode, DisplayMode::Matrix);
    assert!(r.render.flip_animation);
    assert_eq!(r.render.cols, 20);
    assert_eq!(r.render.rows, 7);
    let palette = r.palette.unwrap();
    assert_eq!(palette.entries(), ["#ff0000", "#00ff00"]);
}

#[test]
fn clock_preset_uses_clock_wheel() {
    let r = parse(r#"{"preset":"split-flap-clock"}"#).resolve().unwrap();
    assert_eq!(r.render.wheel, Wheel::Clock);
    assert_eq!(r.render.cells, 5);
}

#[test]
fn unknown_preset_is_a_config_error() {
    let err = parse(r#"{"preset":"neon"}"#).resolve().unwrap_err();
    assert!(matches!(err, SignError::Config(_)));
    assert!(err.to_string().contains("neon"));
}

#[test]
fn degenerate_geometry_is_rejected() {
    let err = parse(r#"{"mode":"matrix","rows":0}"#).resolve().unwrap_err();
    assert!(err.to_string().contains("rows"));
    assert!(parse(r#"{"width":-5}"#).resolve().is_err());
}

#[test]
fn overlay_prefers_top_values() {
    let base = parse(r#"{"rows":9,"cols":9,"glow":true}"#);
    let top = parse(r#"{"cols":3,"glow":false}"#);
    let o = base.overlay(&top);
    assert_eq!(o.rows, Some(9));
    assert_eq!(o.cols, Some(3));
    assert_eq!(o.glow, Some(false));
}

#[test]
fn every_preset_resolves() {
    for p in crate::config::PRESETS {
        let o = SignOptions {
            preset: Some(p.name.to_owned()),
            ..SignOptions::default()
        };
        let r = o.resolve().unwrap();
        assert_eq!(Some(r.render.mode), p.forced_mode, "{}", p.name);
    }
}
