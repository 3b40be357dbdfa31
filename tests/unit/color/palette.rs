use super::*;

fn brute_force(p: &Palette, color: &str) -> String {
    let target = parse_rgb(color).unwrap();
    let mut best = (u32::MAX, 0usize);
    for (i, e) in p.entries().iter().enumerate() {
        let d = target.distance_sq(parse_rgb(e).unwrap());
        if d < best.0 {
            best = (d, i);
        }
    }
    p.entries()[best.1].clone()
}

#[test]
fn snapping_a_palette_entry_is_identity() {
    let p = Palette::new(["#ff0000", "#00ff00", "#ffbf00", "#222222"]);
    for e in p.entries() {
        assert_eq!(&p.snap(e), e);
    }
}

#[test]
fn snap_picks_minimum_distance() {
    let p = Palette::new(["#ff0000", "#00ff00", "#0000ff", "#ffffff", "#000000"]);
    for c in ["#123456", "#fedcba", "#808080", "#7f0000", "#00ff80", "#0a0a0a"] {
        assert_eq!(p.snap(c), brute_force(&p, c), "color {c}");
    }
}

#[test]
fn ties_resolve_to_first_entry() {
    // #010101 is equidistant (3) from both entries.
    let p = Palette::new(["#000000", "#020202"]);
    assert_eq!(p.snap("#010101"), "#000000");
    let p = Palette::new(["#020202", "#000000"]);
    assert_eq!(p.snap("#010101"), "#020202");
}

#[test]
fn blue_request_snaps_to_green_over_red() {
    // d(red) = 255^2 + 16^2 + 238^2 = 121925, d(green) = 239^2 + 238^2 = 113765
    let p = Palette::new(["#ff0000", "#00ff00"]);
    assert_eq!(p.snap("#0010ee"), "#00ff00");
}

#[test]
fn unparseable_input_snaps_default_color() {
    let p = Palette::new(["#ff0000", "#0000ff"]);
    // #ff3300 is nearest to red.
    assert_eq!(p.snap("???"), "#ff0000");
}

#[test]
fn palette_keeps_its_own_spelling() {
    let p = Palette::new(["Red", "#0F0"]);
    assert_eq!(p.snap("#fe0101"), "Red");
    assert_eq!(p.snap("lime"), "#0F0");
}

#[test]
fn deserializes_from_string_list() {
    let p: Palette = serde_json::from_str(r##"["#ff0000", "nope"]"##).unwrap();
    assert_eq!(p.entries().len(), 2);
    assert!(!p.is_empty());
    assert_eq!(p.snap("#00ff00"), "#ff0000");
}
