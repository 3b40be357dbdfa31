use std::{fmt, sync::Arc};

use crate::{
    animation::ease::Ease,
    color::resolve::ColorSpec,
    foundation::core::{Side, StripeDirection},
};

/// Where a scroll phase stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Until {
    /// Stop with the text horizontally centered.
    Center,
    /// Keep going until the text has fully left the display.
    Offscreen,
    /// Stop at this x offset.
    Position(f64),
}

impl<'de> serde::Deserialize<'de> for Until {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Keyword(String),
            Position(f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Position(x) => Ok(Self::Position(x)),
            Repr::Keyword(k) => match k.trim().to_ascii_lowercase().as_str() {
                "center" | "centre" => Ok(Self::Center),
                "offscreen" | "off-screen" => Ok(Self::Offscreen),
                other => Err(serde::de::Error::custom(format!(
                    "unknown until '{other}', expected center, offscreen or a number"
                ))),
            },
        }
    }
}

impl serde::Serialize for Until {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Center => serializer.serialize_str("center"),
            Self::Offscreen => serializer.serialize_str("offscreen"),
            Self::Position(x) => serializer.serialize_f64(*x),
        }
    }
}

/// Callback fired with the step's index when its phase starts or ends.
#[derive(Clone)]
pub struct StepHook(Arc<dyn Fn(usize) + Send + Sync>);

impl StepHook {
    pub fn new(f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, index: usize) {
        (self.0)(index)
    }
}

impl fmt::Debug for StepHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StepHook(..)")
    }
}

/// One user-authored step of a sequence.
///
/// Every field except the phase type is optional; omitted `text` inherits the previous
/// phase's text, omitted numbers take the phase type's defaults.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "phase")]
    pub phase_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Scroll speed in pixels per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<Until>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Ease>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_direction: Option<StripeDirection>,
    /// Text contains tokens that are re-resolved whenever token values change.
    #[serde(default)]
    pub live_tokens: bool,
    #[serde(skip)]
    pub on_start: Option<StepHook>,
    #[serde(skip)]
    pub on_end: Option<StepHook>,
}

impl StepDescription {
    pub fn new(phase_type: impl Into<String>) -> Self {
        Self {
            phase_type: phase_type.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_duration(mut self, ms: f64) -> Self {
        self.duration = Some(ms);
        self
    }

    pub fn with_speed(mut self, px_per_sec: f64) -> Self {
        self.speed = Some(px_per_sec);
        self
    }

    pub fn with_until(mut self, until: Until) -> Self {
        self.until = Some(until);
        self
    }

    pub fn with_flashes(mut self, times: i64, interval_ms: f64) -> Self {
        self.times = Some(times);
        self.interval = Some(interval_ms);
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_from(mut self, side: Side) -> Self {
        self.from = Some(side);
        self
    }

    pub fn with_color(mut self, color: ColorSpec) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn with_easing(mut self, ease: Ease) -> Self {
        self.easing = Some(ease);
        self
    }

    pub fn with_stripes(mut self, dir: StripeDirection) -> Self {
        self.stripe_direction = Some(dir);
        self
    }

    pub fn on_start(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_start = Some(StepHook::new(f));
        self
    }

    pub fn on_end(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_end = Some(StepHook::new(f));
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/phase/step.rs"]
mod tests;
