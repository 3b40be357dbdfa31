use super::*;

#[test]
fn centered_x_splits_slack_evenly() {
    assert_eq!(centered_x(500.0, 60.0), 220.0);
    assert_eq!(centered_x(100.0, 140.0), -20.0);
}

#[test]
fn clamp01_handles_nan_and_bounds() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(-3.0), 0.0);
    assert_eq!(clamp01(0.25), 0.25);
    assert_eq!(clamp01(7.0), 1.0);
}

#[test]
fn side_and_stripe_use_lowercase_names() {
    let side: Side = serde_json::from_str("\"right\"").unwrap();
    assert_eq!(side, Side::Right);
    let stripe: StripeDirection = serde_json::from_str("\"horizontal\"").unwrap();
    assert_eq!(stripe, StripeDirection::Horizontal);
}
