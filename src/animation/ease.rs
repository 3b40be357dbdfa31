/// Easing curve applied to a phase's linear time fraction.
///
/// The CSS-style names `ease-in`, `ease-out` and `ease-in-out` are accepted as aliases
/// of the quadratic curves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[default]
    #[serde(rename = "linear")]
    Linear,
    #[serde(rename = "in-quad", alias = "ease-in")]
    InQuad,
    #[serde(rename = "out-quad", alias = "ease-out")]
    OutQuad,
    #[serde(rename = "in-out-quad", alias = "ease-in-out")]
    InOutQuad,
    #[serde(rename = "in-cubic")]
    InCubic,
    #[serde(rename = "out-cubic")]
    OutCubic,
    #[serde(rename = "in-out-cubic")]
    InOutCubic,
}

impl Ease {
    pub const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
