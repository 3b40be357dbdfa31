use crate::{
    animation::ease::Ease,
    foundation::error::SignResult,
    phase::{
        Phase, PhaseCtx,
        base::{Carry, Clock},
        params,
        state::RenderState,
        step::StepDescription,
    },
};

/// Vertical drift by `distance` from the inherited offset. Screen y grows downward.
pub struct Float {
    carry: Carry,
    start_y: f64,
    delta_y: f64,
    ease: Ease,
    clock: Clock,
}

impl Float {
    pub fn up(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        Self::new(-params::distance(step), step, ctx)
    }

    pub fn down(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        Self::new(params::distance(step), step, ctx)
    }

    fn new(delta_y: f64, step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        let carry = Carry::inherit_at_rest(step, ctx);
        Self {
            start_y: carry.offset_y,
            carry,
            delta_y,
            ease: step.easing.unwrap_or(Ease::InOutQuad),
            clock: Clock::new(params::duration(step, params::DEFAULT_DURATION)),
        }
    }
}

impl Phase for Float {
    fn advance(&mut self, delta_ms: f64) -> SignResult<bool> {
        Ok(self.clock.advance(delta_ms))
    }

    fn state(&self) -> RenderState {
        let p = self.clock.progress();
        let mut frame = self.carry.frame(p);
        frame.offset_y = self.start_y + self.delta_y * self.ease.apply(p);
        frame
    }
}
