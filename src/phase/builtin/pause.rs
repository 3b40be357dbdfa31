use crate::{
    foundation::error::SignResult,
    phase::{
        Phase, PhaseCtx,
        base::{Carry, Clock},
        params,
        state::RenderState,
        step::StepDescription,
    },
};

/// Holds the current text, position and colors for `duration`.
pub struct Pause {
    carry: Carry,
    clock: Clock,
}

impl Pause {
    pub fn new(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        Self {
            carry: Carry::inherit_at_rest(step, ctx),
            clock: Clock::new(params::duration(step, params::DEFAULT_DURATION)),
        }
    }
}

impl Phase for Pause {
    fn advance(&mut self, delta_ms: f64) -> SignResult<bool> {
        Ok(self.clock.advance(delta_ms))
    }

    fn state(&self) -> RenderState {
        self.carry.frame(self.clock.progress())
    }
}
