use super::*;

#[test]
fn glyph_rows_fit_five_columns() {
    for c in (' '..='~').chain(['é']) {
        for row in glyph(c) {
            assert!(row < 0x20, "{c:?}");
        }
    }
}

#[test]
fn lowercase_shares_uppercase_shape() {
    assert_eq!(glyph('a'), glyph('A'));
    assert_eq!(glyph('z'), glyph('Z'));
}

#[test]
fn lit_reads_left_to_right() {
    let t = glyph('T');
    assert!((0..GLYPH_COLS).all(|c| lit(&t, 0, c)));
    assert!(lit(&t, 6, 2));
    assert!(!lit(&t, 6, 0));
    assert!(!lit(&t, 7, 2));
    assert!(!lit(&t, 0, 5));
}

#[test]
fn space_is_blank_and_unknown_is_boxed() {
    assert!(glyph(' ').iter().all(|r| *r == 0));
    assert_eq!(glyph('\u{2603}')[0], 0x1F);
}
