//! Built-in phase types.

use std::sync::Arc;

use crate::foundation::{core::Side, error::SignResult};

use super::{Phase, PhaseCtx, PhaseFactory, step::StepDescription};

mod fade;
mod flash;
mod float;
mod pause;
mod scroll;
mod slide;
mod split_flap;
mod wipe;

pub use fade::Fade;
pub use flash::Flash;
pub use float::Float;
pub use pause::Pause;
pub use scroll::Scroll;
pub use slide::Slide;
pub use split_flap::SplitFlap;
pub use wipe::Wipe;

/// Names `random` chooses from: every built-in that moves or changes visibly.
pub const ANIMATED: &[&str] = &[
    "scroll-left",
    "scroll-right",
    "slide-in",
    "slide-out",
    "flash",
    "float-up",
    "float-down",
    "fade-in",
    "fade-out",
    "wipe-in",
    "wipe-out",
];

macro_rules! factory {
    ($ctor:expr) => {{
        let f: PhaseFactory = Arc::new(
            |step: &StepDescription, ctx: &PhaseCtx<'_>| -> SignResult<Box<dyn Phase>> {
                Ok(Box::new($ctor(step, ctx)))
            },
        );
        f
    }};
}

pub(crate) fn factories() -> Vec<(&'static str, PhaseFactory)> {
    vec![
        ("scroll-left", factory!(scroll_left)),
        ("scroll-right", factory!(scroll_right)),
        ("slide-in", factory!(Slide::slide_in)),
        ("slide-out", factory!(Slide::slide_out)),
        ("flash", factory!(Flash::new)),
        ("pause", factory!(Pause::new)),
        ("float-up", factory!(Float::up)),
        ("float-down", factory!(Float::down)),
        ("fade-in", factory!(Fade::fade_in)),
        ("fade-out", factory!(Fade::fade_out)),
        ("wipe-in", factory!(Wipe::wipe_in)),
        ("wipe-out", factory!(Wipe::wipe_out)),
        ("split-flap", factory!(SplitFlap::new)),
    ]
}

fn scroll_left(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Scroll {
    Scroll::new(Side::Left, step, ctx)
}

fn scroll_right(step: &StepDescription, ctx: &PhaseCtx<'_>) -> Scroll {
    Scroll::new(Side::Right, step, ctx)
}

#[cfg(test)]
#[path = "../../../tests/unit/phase/builtin.rs"]
mod tests;
