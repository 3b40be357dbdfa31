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
        step::{StepDescription, Until},
    },
};

/// Constant-speed horizontal travel toward `until`.
///
/// `toward` is the side the text moves to: `scroll-left` travels toward the left edge
/// and therefore enters from the right.
pub struct Scroll {
    carry: Carry,
    start_x: f64,
    target_x: f64,
    ease: Ease,
    clock: Clock,
}

impl Scroll {
    pub fn new(toward: Side, step: &StepDescription, ctx: &PhaseCtx<'_>) -> Self {
        let carry = Carry::inherit(step, ctx);
        let cw = carry.container_width;
        let tw = carry.text_width;

        let start_x = if carry.new_text {
            match toward {
                Side::Left => cw,
                Side::Right => -tw,
            }
        } else {
            carry.offset_x
        };
        let target_x = match step.until.unwrap_or(Until::Offscreen) {
            Until::Center => carry.centered_x(),
            Until::Offscreen => match toward {
                Side::Left => -tw,
                Side::Right => cw,
            },
            Until::Position(x) => x,
        };

        let travel_ms = (target_x - start_x).abs() * 1000.0 / params::speed(step);
        tracing::debug!(
            ?toward,
            start_x,
            target_x,
            travel_ms,
            "scroll phase geometry"
        );

        Self {
            carry,
            start_x,
            target_x,
            ease: step.easing.unwrap_or(Ease::Linear),
            clock: Clock::new(travel_ms),
        }
    }
}

impl Phase for Scroll {
    fn advance(&mut self, delta_ms: f64) -> SignResult<bool> {
        Ok(self.clock.advance(delta_ms))
    }

    fn state(&self) -> RenderState {
        let p = self.clock.progress();
        let mut frame = self.carry.frame(p);
        frame.offset_x = lerp(self.start_x, self.target_x, self.ease.apply(p));
        frame
    }
}
