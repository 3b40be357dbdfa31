//! The phase engine: step descriptions in, per-frame [`RenderState`]s out.
//!
//! Each phase type is a factory registered by name in a [`PhaseRegistry`]. A factory
//! sees the step, the display geometry and the previous phase's last state, and returns
//! a boxed [`Phase`] that the sequencer drives until it reports completion.

use std::sync::Arc;

use crate::{
    color::{palette::Palette, resolve::ColorSpec},
    foundation::error::SignResult,
};

mod base;
pub mod builtin;
mod params;
pub mod registry;
pub mod state;
pub mod step;

pub use registry::PhaseRegistry;
pub use state::RenderState;
pub use step::{StepDescription, StepHook, Until};

/// A running phase instance.
pub trait Phase {
    /// Called once, right before the first `advance`.
    fn start(&mut self) {}

    /// Move time forward by `delta_ms`.
    ///
    /// Returns `Ok(true)` on the call that completes the phase and `Ok(false)` on every
    /// other call, including calls made after completion.
    fn advance(&mut self, delta_ms: f64) -> SignResult<bool>;

    /// The frame to paint for the current time.
    fn state(&self) -> RenderState;

    /// Whether the sequencer should hold this phase after completion until the
    /// renderer reports it has visually settled.
    fn awaits_renderer(&self) -> bool {
        false
    }
}

/// Everything a factory needs besides the step itself.
#[derive(Clone, Copy, Debug)]
pub struct PhaseCtx<'a> {
    pub container_width: f64,
    /// Measured width of the text this phase will show.
    pub text_width: f64,
    /// Last state read from the previous phase, if any.
    pub prev: Option<&'a RenderState>,
    pub palette: Option<&'a Palette>,
    /// Color spec in effect before this step; used when the step sets none.
    pub inherited_color: Option<&'a ColorSpec>,
    pub inherited_background: Option<&'a str>,
}

impl<'a> PhaseCtx<'a> {
    pub fn new(container_width: f64, text_width: f64) -> Self {
        Self {
            container_width,
            text_width,
            prev: None,
            palette: None,
            inherited_color: None,
            inherited_background: None,
        }
    }

    pub fn with_prev(mut self, prev: Option<&'a RenderState>) -> Self {
        self.prev = prev;
        self
    }

    pub fn with_palette(mut self, palette: Option<&'a Palette>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_inherited_color(mut self, color: Option<&'a ColorSpec>) -> Self {
        self.inherited_color = color;
        self
    }

    pub fn with_inherited_background(mut self, background: Option<&'a str>) -> Self {
        self.inherited_background = background;
        self
    }

    /// Text the step will show: its own, or its predecessor's.
    pub fn effective_text(&self, step: &StepDescription) -> String {
        effective_text(step, self.prev)
    }
}

pub fn effective_text(step: &StepDescription, prev: Option<&RenderState>) -> String {
    match (&step.text, prev) {
        (Some(t), _) => t.clone(),
        (None, Some(p)) => p.text.clone(),
        (None, None) => String::new(),
    }
}

/// Builds a phase instance from a step; see [`PhaseRegistry::register`].
pub type PhaseFactory =
    Arc<dyn Fn(&StepDescription, &PhaseCtx<'_>) -> SignResult<Box<dyn Phase>> + Send + Sync>;
