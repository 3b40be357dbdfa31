/// Horizontal side of the display a motion starts from or exits to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

/// Color striping direction for matrix surfaces.
///
/// Only horizontal striping changes projection: each glyph row takes its own color
/// instead of each character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripeDirection {
    Horizontal,
}

/// X offset that centers a run of `text_width` inside `container_width`.
pub fn centered_x(container_width: f64, text_width: f64) -> f64 {
    (container_width - text_width) / 2.0
}

pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
