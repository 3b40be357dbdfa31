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

pub struct Fade {
    carry: Carry,
    fading_in: bool,
    ease: Ease,
    clock: Clock,
}

impl Fade {
    pub fn fade_in(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        Self::new(true, step, ctx)
    }

    pub fn fade_out(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        Self::new(false, step, ctx)
    }

    fn new(fading_in: bool, step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        Self {
            carry: Carry::inherit_at_rest(step, ctx),
            fading_in,
            ease: step.easing.unwrap_or(Ease::Linear),
            clock: Clock::new(params::duration(step, params::DEFAULT_DURATION)),
        }
    }
}

impl Phase for Fade {
    fn advance(&mut self, delta_ms: f64) -> SignResult<bool> {
        Ok(self.clock.advance(delta_ms))
    }

    fn state(&self) -> RenderState {
        let p = self.clock.progress();
        let mut frame = self.carry.frame(p);
        let t = self.ease.apply(p);
        frame.opacity = if self.fading_in { t } else { 1.0 - t };
        frame
    }
}
