use super::*;

fn frame(text: &str, x: f64, colors: &[&str]) -> RenderState {
    RenderState {
        text: text.to_owned(),
        offset_x: x,
        offset_y: 4.0,
        opacity: 0.5,
        visible: true,
        colors: colors.iter().map(|c| (*c).to_owned()).collect(),
        progress: 0.0,
        stripe_direction: None,
        wipe_progress: None,
        background: None,
    }
}

fn renderer() -> TextRenderer {
    TextRenderer::new(RenderConfig {
        width: 500.0,
        char_width: 30.0,
        ..RenderConfig::default()
    })
}

#[test]
fn geometry_comes_from_config() {
    let r = renderer();
    assert_eq!(r.container_width(), 500.0);
    assert_eq!(r.measure_text("HI"), 60.0);
    assert_eq!(r.measure_text(""), 0.0);
}

#[test]
fn block_is_translated_and_faded() {
    let mut r = renderer();
    r.render(&frame("HI", 220.0, &["#ff0000", "#00ff00"]), 0.0);
    assert_eq!(r.offset(), Vec2::new(220.0, 4.0));
    assert_eq!(r.block().opacity, 0.5);
    assert_eq!(r.block().chars.len(), 2);
    assert_eq!(r.block().chars[1].color, "#00ff00");
}

#[test]
fn only_changed_colors_are_written() {
    let mut r = renderer();
    r.render(&frame("AB", 0.0, &["#ff0000", "#ff0000"]), 0.0);
    assert_eq!(r.stats().color_writes, 2);

    r.render(&frame("AB", 10.0, &["#ff0000", "#ff0000"]), 16.0);
    assert_eq!(r.stats().color_writes, 2);

    r.render(&frame("AB", 20.0, &["#ff0000", "#0000ff"]), 32.0);
    assert_eq!(r.stats().color_writes, 3);
    assert_eq!(r.stats().rebuilds, 1);
}

#[test]
fn text_change_rebuilds_elements() {
    let mut r = renderer();
    r.render(&frame("AB", 0.0, &["#ff0000"; 2]), 0.0);
    r.render(&frame("ABC", 0.0, &["#ff0000"; 3]), 16.0);
    assert_eq!(r.stats().rebuilds, 2);
    assert_eq!(r.block().chars.len(), 3);
    assert_eq!(r.block().chars[2].ch, 'C');
}

#[test]
fn wipe_hides_trailing_characters() {
    let mut r = renderer();
    let mut f = frame("ABCD", 0.0, &["#ff0000"; 4]);
    f.wipe_progress = Some(0.6);
    r.render(&f, 0.0);
    let hidden: Vec<bool> = r.block().chars.iter().map(|c| c.hidden).collect();
    assert_eq!(hidden, [false, false, true, true]);

    f.wipe_progress = None;
    r.render(&f, 16.0);
    assert!(r.block().chars.iter().all(|c| !c.hidden));
}

#[test]
fn destroy_releases_elements() {
    let mut r = renderer();
    r.render(&frame("AB", 0.0, &["#ff0000"; 2]), 0.0);
    r.destroy();
    assert!(r.block().chars.is_empty());
}
