use super::*;

#[test]
fn install_is_idempotent() {
    let a = ensure_styles_installed();
    let b = ensure_styles_installed();
    assert!(std::ptr::eq(a, b));
    assert!(styles_installed());
    assert!(a.css.contains(".sign-dot"));
}
