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

/// Publishes a new target text and waits; the split-flap renderer animates the wheels.
///
/// Completion needs both the configured duration and, through
/// [`Phase::awaits_renderer`], a settled board.
pub struct SplitFlap {
    carry: Carry,
    clock: Clock,
}

impl SplitFlap {
    pub fn new(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        let mut carry = Carry::inherit(step, ctx);
        carry.offset_x = carry.centered_x();
        Self {
            carry,
            clock: Clock::new(params::duration(step, params::DEFAULT_SPLIT_FLAP_DURATION)),
        }
    }
}

impl Phase for SplitFlap {
    fn advance(&mut self, delta_ms: f64) -> SignResult<bool> {
        Ok(self.clock.advance(delta_ms))
    }

    fn state(&self) -> RenderState {
        self.carry.frame(self.clock.progress())
    }

    fn awaits_renderer(&self) -> bool {
        true
    }
}
