//! Presentation surfaces.
//!
//! Every surface is an in-memory element model that a host paints from (or rasterizes
//! with [`Surface::rasterize`]). Surfaces diff each frame against what they last
//! painted and only touch elements that changed.

use std::collections::BTreeMap;

use image::RgbaImage;

use crate::phase::RenderState;

pub mod config;
pub mod flip;
pub mod glyphs;
pub mod matrix;
pub mod raster;
pub mod split_flap;
pub mod styles;
pub mod text;

pub use config::{DisplayMode, RenderConfig, Wheel};
pub use matrix::{MatrixRenderer, StuckState};
pub use split_flap::SplitFlapRenderer;
pub use styles::ensure_styles_installed;
pub use text::TextRenderer;

/// Consumer of per-frame [`RenderState`]s.
pub trait Renderer {
    /// Paint one frame. `now` drives renderer-owned timers (flip queue, flap stepping).
    fn render(&mut self, state: &RenderState, now: f64);

    /// Advance renderer-owned timers without a new frame.
    fn pump(&mut self, _now: f64) {}

    fn container_width(&self) -> f64;

    fn measure_text(&self, text: &str) -> f64;

    /// No renderer-owned motion is pending.
    fn is_settled(&self) -> bool {
        true
    }

    /// Cancel renderer-owned motion, freezing the display as currently shown.
    fn cancel_pending(&mut self) {}

    /// Drop elements and cancel pending timers.
    fn destroy(&mut self) {}
}

/// One of the three surfaces, chosen by [`DisplayMode`].
pub enum Surface {
    Text(TextRenderer),
    Matrix(MatrixRenderer),
    SplitFlap(SplitFlapRenderer),
}

impl Surface {
    pub fn new(config: RenderConfig) -> Self {
        match config.mode {
            DisplayMode::Text => Self::Text(TextRenderer::new(config)),
            DisplayMode::Matrix => Self::Matrix(MatrixRenderer::new(config)),
            DisplayMode::SplitFlap => Self::SplitFlap(SplitFlapRenderer::new(config)),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        match self {
            Self::Text(_) => DisplayMode::Text,
            Self::Matrix(_) => DisplayMode::Matrix,
            Self::SplitFlap(_) => DisplayMode::SplitFlap,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        match self {
            Self::Text(r) => r.config(),
            Self::Matrix(r) => r.config(),
            Self::SplitFlap(r) => r.config(),
        }
    }

    fn inner(&self) -> &dyn Renderer {
        match self {
            Self::Text(r) => r,
            Self::Matrix(r) => r,
            Self::SplitFlap(r) => r,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Renderer {
        match self {
            Self::Text(r) => r,
            Self::Matrix(r) => r,
            Self::SplitFlap(r) => r,
        }
    }

    /// Returns `false` when the surface has no dots to stick.
    pub fn set_stuck_tiles(&mut self, tiles: BTreeMap<usize, StuckState>) -> bool {
        match self {
            Self::Matrix(r) => {
                r.set_stuck_tiles(tiles);
                true
            }
            _ => false,
        }
    }

    /// Per-dot flip counts; `None` unless this is flip-dot hardware.
    pub fn wear(&self) -> Option<&[u32]> {
        match self {
            Self::Matrix(r) => r.wear(),
            _ => None,
        }
    }

    /// `None` unless this is a split-flap board.
    pub fn split_flap_complete(&self) -> Option<bool> {
        match self {
            Self::SplitFlap(r) => Some(r.split_flap_complete()),
            _ => None,
        }
    }

    pub fn rasterize(&self) -> RgbaImage {
        match self {
            Self::Text(r) => r.rasterize(),
            Self::Matrix(r) => r.rasterize(),
            Self::SplitFlap(r) => r.rasterize(),
        }
    }

    pub fn ascii(&self) -> String {
        match self {
            Self::Text(r) => r.ascii(),
            Self::Matrix(r) => r.ascii(),
            Self::SplitFlap(r) => r.ascii(),
        }
    }
}

impl Renderer for Surface {
    fn render(&mut self, state: &RenderState, now: f64) {
        self.inner_mut().render(state, now);
    }

    fn pump(&mut self, now: f64) {
        self.inner_mut().pump(now);
    }

    fn container_width(&self) -> f64 {
        self.inner().container_width()
    }

    fn measure_text(&self, text: &str) -> f64 {
        self.inner().measure_text(text)
    }

    fn is_settled(&self) -> bool {
        self.inner().is_settled()
    }

    fn cancel_pending(&mut self) {
        self.inner_mut().cancel_pending();
    }

    fn destroy(&mut self) {
        self.inner_mut().destroy();
    }
}
