use crate::foundation::error::{SignError, SignResult};

/// Which presentation surface a renderer builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    #[default]
    Text,
    Matrix,
    #[serde(alias = "splitflap")]
    SplitFlap,
}

/// Character ordering a split-flap cell cycles through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Wheel {
    #[default]
    Full,
    Clock,
    Custom(String),
}

pub const FULL_WHEEL: &str = " ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,:;!?-+/'\"&#@$%*()";
pub const CLOCK_WHEEL: &str = " 0123456789:.-/";

impl Wheel {
    pub fn chars(&self) -> Vec<char> {
        match self {
            Self::Full => FULL_WHEEL.chars().collect(),
            Self::Clock => CLOCK_WHEEL.chars().collect(),
            Self::Custom(s) => {
                let mut out: Vec<char> = Vec::new();
                for c in s.chars() {
                    if !out.contains(&c) {
                        out.push(c);
                    }
                }
                out
            }
        }
    }
}

impl serde::Serialize for Wheel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Full => serializer.serialize_str("full"),
            Self::Clock => serializer.serialize_str("clock"),
            Self::Custom(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Wheel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "full" | "default" => Self::Full,
            "clock" => Self::Clock,
            _ => Self::Custom(s),
        })
    }
}

/// Geometry and hardware parameters for one renderer instance.
///
/// Lengths are pixels and times are milliseconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub mode: DisplayMode,
    /// Container width in text mode.
    pub width: f64,
    pub char_width: f64,
    pub rows: usize,
    pub cols: usize,
    pub dot_pitch: f64,
    /// Lit dots carry a halo in their own color.
    pub glow: bool,
    /// Route matrix updates through the column-by-column flip cascade.
    pub flip_animation: bool,
    pub flip_speed: f64,
    /// Warm-up/cool-down time of a dot, 0 for instant.
    pub dot_transition: f64,
    pub cells: usize,
    pub stagger: f64,
    pub flip_duration: f64,
    pub wheel: Wheel,
    pub background: String,
    pub off_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Text,
            width: 600.0,
            char_width: 24.0,
            rows: 7,
            cols: 80,
            dot_pitch: 6.0,
            glow: false,
            flip_animation: false,
            flip_speed: 30.0,
            dot_transition: 0.0,
            cells: 12,
            stagger: 40.0,
            flip_duration: 60.0,
            wheel: Wheel::Full,
            background: "#000000".to_owned(),
            off_color: "#1a1a1a".to_owned(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> SignResult<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SignError::config(format!("{name} must be > 0, got {v}")))
            }
        };
        match self.mode {
            DisplayMode::Text => {
                positive("width", self.width)?;
                positive("charWidth", self.char_width)?;
            }
            DisplayMode::Matrix => {
                if self.rows == 0 || self.cols == 0 {
                    return Err(SignError::config(format!(
                        "matrix needs rows and cols > 0, got {}x{}",
                        self.rows, self.cols
                    )));
                }
                positive("dotPitch", self.dot_pitch)?;
            }
            DisplayMode::SplitFlap => {
                if self.cells == 0 {
                    return Err(SignError::config("split-flap needs cells > 0"));
                }
                positive("charWidth", self.char_width)?;
                if self.wheel.chars().is_empty() {
                    return Err(SignError::config("split-flap wheel is empty"));
                }
            }
        }
        Ok(())
    }
}
