use crate::{
    color::{
        palette::Palette,
        resolve::{ColorSpec, resolve},
    },
    foundation::core::{StripeDirection, centered_x, clamp01},
};

use super::{PhaseCtx, state::RenderState, step::StepDescription};

/// State carried forward from the predecessor, adjusted by the step.
#[derive(Clone, Debug)]
pub(crate) struct Carry {
    pub text: String,
    pub offset_x: f64,
    pub offset_y: f64,
    pub stripe: Option<StripeDirection>,
    pub color: Option<ColorSpec>,
    pub background: Option<String>,
    pub palette: Option<Palette>,
    /// The step introduced text that differs from what was on screen.
    pub new_text: bool,
    pub container_width: f64,
    pub text_width: f64,
}

impl Carry {
    pub fn inherit(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        let prev = ctx.prev;
        let new_text = match (prev, &step.text) {
            (None, _) => true,
            (Some(p), Some(t)) => *t != p.text,
            (Some(_), None) => false,
        };
        Self {
            text: ctx.effective_text(step),
            offset_x: prev.map_or(0.0, |p| p.offset_x),
            offset_y: prev.map_or(0.0, |p| p.offset_y),
            stripe: step
                .stripe_direction
                .or_else(|| prev.and_then(|p| p.stripe_direction)),
            color: step.color.clone().or_else(|| ctx.inherited_color.cloned()),
            background: step
                .background
                .clone()
                .or_else(|| ctx.inherited_background.map(str::to_owned)),
            palette: ctx.palette.cloned(),
            new_text,
            container_width: ctx.container_width,
            text_width: ctx.text_width,
        }
    }

    /// Inherit, then center horizontally if the step brought new text.
    pub fn inherit_at_rest(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        let mut carry = Self::inherit(step, ctx);
        if carry.new_text {
            carry.offset_x = carry.centered_x();
        }
        carry
    }

    pub fn centered_x(&self) -> f64 {
        centered_x(self.container_width, self.text_width)
    }

    pub fn frame(&self, progress: f64) -> RenderState {
        let progress = clamp01(progress);
        RenderState {
            colors: resolve(
                self.color.as_ref(),
                &self.text,
                progress,
                self.palette.as_ref(),
            ),
            text: self.text.clone(),
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            opacity: 1.0,
            visible: true,
            progress,
            stripe_direction: self.stripe,
            wipe_progress: None,
            background: self.background.clone(),
        }
    }
}

/// Elapsed-time tracker that reports completion exactly once.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Clock {
    pub elapsed: f64,
    pub duration: f64,
    reported: bool,
}

impl Clock {
    pub fn new(duration: f64) -> Self {
        Self {
            elapsed: 0.0,
            duration,
            reported: false,
        }
    }

    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        if !self.duration.is_finite() {
            return 0.0;
        }
        clamp01(self.elapsed / self.duration)
    }

    pub fn advance(&mut self, delta_ms: f64) -> bool {
        if self.reported {
            return false;
        }
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.elapsed += delta_ms;
        }
        if self.progress() >= 1.0 {
            self.reported = true;
            return true;
        }
        false
    }
}
