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

/// Left-to-right reveal (`wipe-in`) or hide (`wipe-out`) of the characters.
pub struct Wipe {
    carry: Carry,
    revealing: bool,
    ease: Ease,
    clock: Clock,
}

impl Wipe {
    pub fn wipe_in(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        Self::new(true, step, ctx)
    }

    pub fn wipe_out(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        Self::new(false, step, ctx)
    }

    fn new(revealing: bool, step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        Self {
            carry: Carry::inherit_at_rest(step, ctx),
            revealing,
            ease: step.easing.unwrap_or(Ease::Linear),
            clock: Clock::new(params::duration(step, params::DEFAULT_DURATION)),
        }
    }
}

impl Phase for Wipe {
    fn advance(&mut self, delta_ms: f64) -> SignResult<bool> {
        Ok(self.clock.advance(delta_ms))
    }

    fn state(&self) -> RenderState {
        let p = self.clock.progress();
        let mut frame = self.carry.frame(p);
        let t = self.ease.apply(p);
        frame.wipe_progress = Some(if self.revealing { t } else { 1.0 - t });
        frame
    }
}
