use crate::foundation::core::StripeDirection;

/// Everything a renderer needs to paint one frame.
///
/// Produced fresh by the active phase each frame. Positions are in the renderer's
/// native pixel space; `colors` holds exactly one entry per character of `text`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderState {
    pub text: String,
    pub offset_x: f64,
    pub offset_y: f64,
    /// In `[0, 1]`.
    pub opacity: f64,
    pub visible: bool,
    pub colors: Vec<String>,
    /// Phase progress in `[0, 1]`.
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_direction: Option<StripeDirection>,
    /// Fraction of the text revealed left to right, when a wipe is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wipe_progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl RenderState {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of leading characters a wipe leaves visible.
    pub fn revealed_chars(&self) -> usize {
        let n = self.char_count();
        match self.wipe_progress {
            Some(w) => ((n as f64) * w.clamp(0.0, 1.0)).floor() as usize,
            None => n,
        }
    }
}
