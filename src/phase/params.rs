//! Numeric step parameters with their defaults.
//!
//! Absent values take the phase default. Zero durations complete instantly and a zero
//! speed falls back to the default. Negative durations, intervals and counts clamp to
//! zero; a negative speed uses its magnitude, since the phase type already fixes the
//! direction.

use super::step::StepDescription;

pub(crate) const DEFAULT_SPEED: f64 = 100.0;
pub(crate) const DEFAULT_DURATION: f64 = 1000.0;
pub(crate) const DEFAULT_SPLIT_FLAP_DURATION: f64 = 2000.0;
pub(crate) const DEFAULT_TIMES: i64 = 3;
pub(crate) const DEFAULT_INTERVAL: f64 = 250.0;
pub(crate) const DEFAULT_DISTANCE: f64 = 20.0;

pub(crate) fn duration(step: &StepDescription, default: f64) -> f64 {
    match step.duration {
        None => default,
        Some(d) if d.is_nan() => default,
        Some(d) if d < 0.0 => {
            tracing::warn!(phase = %step.phase_type, duration = d, "negative duration; completing instantly");
            0.0
        }
        Some(d) => d,
    }
}

pub(crate) fn speed(step: &StepDescription) -> f64 {
    match step.speed {
        None => DEFAULT_SPEED,
        Some(s) if s == 0.0 || s.is_nan() => DEFAULT_SPEED,
        Some(s) if s < 0.0 => {
            tracing::warn!(phase = %step.phase_type, speed = s, "negative speed; using its magnitude");
            -s
        }
        Some(s) => s,
    }
}

pub(crate) fn interval(step: &StepDescription) -> f64 {
    match step.interval {
        None => DEFAULT_INTERVAL,
        Some(i) if i.is_nan() => DEFAULT_INTERVAL,
        Some(i) => i.max(0.0),
    }
}

pub(crate) fn times(step: &StepDescription) -> u64 {
    step.times.unwrap_or(DEFAULT_TIMES).max(0) as u64
}

pub(crate) fn distance(step: &StepDescription) -> f64 {
    match step.distance {
        Some(d) if d.is_finite() => d,
        _ => DEFAULT_DISTANCE,
    }
}
