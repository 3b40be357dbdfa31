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

/// Blinks the text in place: `times` off/on pairs, one toggle per `interval`.
pub struct Flash {
    carry: Carry,
    interval: f64,
    total_toggles: u64,
    clock: Clock,
}

impl Flash {
    pub fn new(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        let interval = params::interval(step);
        let total_toggles = params::times(step).saturating_mul(2);
        Self {
            carry: Carry::inherit_at_rest(step, ctx),
            interval,
            total_toggles,
            clock: Clock::new(interval * total_toggles as f64),
        }
    }

    pub fn toggles(&self) -> u64 {
        if self.interval <= 0.0 {
            return self.total_toggles;
        }
        let crossed = (self.clock.elapsed / self.interval).floor();
        (crossed.max(0.0) as u64).min(self.total_toggles)
    }
}

impl Phase for Flash {
    fn advance(&mut self, delta_ms: f64) -> SignResult<bool> {
        Ok(self.clock.advance(delta_ms))
    }

    fn state(&self) -> RenderState {
        let mut frame = self.carry.frame(self.clock.progress());
        frame.visible = self.toggles() % 2 == 0;
        frame
    }
}
