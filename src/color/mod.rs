//! Color resolution: turning a step's color spec into concrete per-character colors,
//! optionally constrained to a hardware palette.

pub mod palette;
pub mod parse;
pub mod resolve;

/// Color used when neither the step, its predecessors, nor the display config say
/// otherwise.
pub const DEFAULT_COLOR: &str = "#ff3300";
