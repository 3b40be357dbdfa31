use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Side, lerp},
        error::SignResult,
    },
    phase::{
        Phase, PhaseCtx,
        base::{Carry, Clock},
        params,
        state::RenderState,
        step::StepDescription,
    },
};

/// Timed move between an off-screen edge and the resting position.
pub struct Slide {
    carry: Carry,
    start_x: f64,
    end_x: f64,
    ease: Ease,
    clock: Clock,
}

impl Slide {
    /// Enter from the `from` edge (default right) and stop centered.
    pub fn slide_in(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        let carry = Carry::inherit_at_rest(step, ctx);
        let start_x = off_edge(step.from.unwrap_or(Side::Right), &carry);
        let end_x = carry.centered_x();
        Self::build(carry, start_x, end_x, step)
    }

    /// Leave toward the `from` edge (default left) from wherever the text rests.
    pub fn slide_out(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        let carry = Carry::inherit_at_rest(step, ctx);
        let start_x = carry.offset_x;
        let end_x = off_edge(step.from.unwrap_or(Side::Left), &carry);
        Self::build(carry, start_x, end_x, step)
    }

    fn build(carry: Carry, start_x: f64, end_x: f64, step: &StepDescription) -> Self {
        Self {
            carry,
            start_x,
            end_x,
            ease: step.easing.unwrap_or(Ease::OutQuad),
            clock: Clock::new(params::duration(step, params::DEFAULT_DURATION)),
        }
    }
}

fn off_edge(side: Side, carry: &Carry) -> f64 {
    match side {
        Side::Left => -carry.text_width,
        Side::Right => carry.container_width,
    }
}

impl Phase for Slide {
    fn advance(&mut self, delta_ms: f64) -> SignResult<bool> {
        Ok(self.clock.advance(delta_ms))
    }

    fn state(&self) -> RenderState {
        let p = self.clock.progress();
        let mut frame = self.carry.frame(p);
        frame.offset_x = lerp(self.start_x, self.end_x, self.ease.apply(p));
        frame
    }
}
