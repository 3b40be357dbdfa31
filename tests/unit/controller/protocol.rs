use super::*;

#[test]
fn parses_every_action() {
    let cases = [
        (r#"{"action":"sequence","sequence":[{"phase":"pause"}]}"#, "sequence"),
        (r#"{"action":"setText","text":"HI"}"#, "setText"),
        (r#"{"action":"play"}"#, "play"),
        (r#"{"action":"pause"}"#, "pause"),
        (r#"{"action":"stop"}"#, "stop"),
        (r#"{"action":"setTheme","preset":"led"}"#, "setTheme"),
        (r##"{"action":"setColor","color":"#00ff00"}"##, "setColor"),
        (r#"{"action":"setStuckTiles","tiles":{"3":"on"}}"#, "setStuckTiles"),
        (r#"{"action":"config","maxFps":24}"#, "config"),
        (r#"{"action":"tokenUpdate","tokens":{"t":"1"}}"#, "tokenUpdate"),
        (r#"{"action":"getStatus"}"#, "getStatus"),
    ];
    for (json, action) in cases {
        let msg = ControlMessage::from_json(json).unwrap();
        assert_eq!(msg.action(), action, "{json}");
    }
}

#[test]
fn theme_options_sit_beside_the_action() {
    let msg =
        ControlMessage::from_json(r#"{"action":"setTheme","preset":"flipdot","cols":40,"loop":true}"#)
            .unwrap();
    let ControlMessage::SetTheme { options } = msg else {
        panic!("wrong variant");
    };
    assert_eq!(options.preset.as_deref(), Some("flipdot"));
    assert_eq!(options.cols, Some(40));
    assert_eq!(options.looping, Some(true));
}

#[test]
fn sequence_carries_optional_options() {
    let msg = ControlMessage::from_json(
        r#"{"action":"sequence","sequence":[{"text":"A","phase":"fade-in"}],"options":{"mode":"matrix"}}"#,
    )
    .unwrap();
    let ControlMessage::Sequence { sequence, options } = msg else {
        panic!("wrong variant");
    };
    assert_eq!(sequence[0].phase_type, "fade-in");
    assert!(options.unwrap().mode.is_some());
}

#[test]
fn set_text_phase_is_optional() {
    let msg = ControlMessage::from_json(r#"{"action":"setText","text":"GO","phase":"flash"}"#)
        .unwrap();
    assert!(matches!(msg, ControlMessage::SetText { ref phase, .. } if phase.as_deref() == Some("flash")));
}

#[test]
fn unknown_action_is_rejected() {
    let err = ControlMessage::from_json(r#"{"action":"reboot"}"#).unwrap_err();
    assert!(matches!(err, SignError::Serde(_)));
}

#[test]
fn tile_keys_must_be_indices() {
    let mut tiles = BTreeMap::new();
    tiles.insert("12".to_owned(), StuckState::On);
    tiles.insert(" 4 ".to_owned(), StuckState::Off);
    let parsed = parse_tiles(tiles).unwrap();
    assert_eq!(parsed.get(&12), Some(&StuckState::On));
    assert_eq!(parsed.get(&4), Some(&StuckState::Off));

    let mut bad = BTreeMap::new();
    bad.insert("left".to_owned(), StuckState::On);
    let err = parse_tiles(bad).unwrap_err();
    assert!(err.to_string().contains("left"));
}

#[test]
fn ok_reply_serializes_with_tag() {
    let json = serde_json::to_string(&ControlReply::Ok).unwrap();
    assert_eq!(json, r#"{"reply":"ok"}"#);
}

fn upper(text: &str, _tokens: &BTreeMap<String, String>) -> String {
    text.to_uppercase()
}

#[test]
fn plain_functions_resolve_tokens() {
    let tokens = BTreeMap::new();
    assert_eq!(TokenResolver::resolve(&upper, "abc", &tokens), "ABC");
}
