//! Signflow drives animated text on simulated signage: LED and bulb matrices, flip-dot
//! boards, split-flap displays and plain styled text.
//!
//! A sign is a list of [`StepDescription`]s. The [`Sequencer`] turns each step into a
//! running [`phase::Phase`] and forwards one [`RenderState`] per frame to a [`Renderer`].
//! [`Controller`] wires options, presets, the sequencer and a [`Surface`] together and
//! accepts live [`ControlMessage`]s.
//!
//! Nothing here reads a clock. Hosts call [`Controller::tick`] with a monotonic
//! millisecond timestamp, typically from their frame callback.
#![forbid(unsafe_code)]

pub mod animation;
pub mod color;
pub mod config;
pub mod controller;
mod foundation;
pub mod phase;
pub mod render;
pub mod sequencer;

pub use crate::animation::ease::Ease;
pub use crate::color::resolve::ColorSpec;
pub use crate::config::{SequenceDocument, SignOptions};
pub use crate::controller::{ControlMessage, ControlReply, Controller, Status, TokenResolver};
pub use crate::foundation::core::{Side, StripeDirection};
pub use crate::foundation::error::{SignError, SignResult};
pub use crate::phase::{PhaseRegistry, RenderState, StepDescription, Until};
pub use crate::render::{DisplayMode, RenderConfig, Renderer, StuckState, Surface};
pub use crate::sequencer::{PlayState, SequenceEvent, Sequencer, StopHandle, TickOutcome};
