use kurbo::{Affine, Vec2};

use crate::{color::DEFAULT_COLOR, phase::RenderState};

use super::{Renderer, config::RenderConfig, styles::ensure_styles_installed};

#[derive(Clone, Debug, PartialEq)]
pub struct CharElement {
    pub ch: char,
    pub color: String,
    pub hidden: bool,
}

/// The positioned block holding one element per character.
#[derive(Clone, Debug)]
pub struct TextBlock {
    pub transform: Affine,
    pub opacity: f64,
    pub visible: bool,
    pub background: Option<String>,
    pub chars: Vec<CharElement>,
}

impl Default for TextBlock {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            opacity: 1.0,
            visible: true,
            background: None,
            chars: Vec::new(),
        }
    }
}

/// Element writes since construction, for callers that track paint cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextPaintStats {
    pub rebuilds: u64,
    pub color_writes: u64,
}

/// Continuous-position text surface.
pub struct TextRenderer {
    config: RenderConfig,
    block: TextBlock,
    text: Option<String>,
    stats: TextPaintStats,
}

impl TextRenderer {
    pub fn new(config: RenderConfig) -> Self {
        ensure_styles_installed();
        Self {
            config,
            block: TextBlock::default(),
            text: None,
            stats: TextPaintStats::default(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn block(&self) -> &TextBlock {
        &self.block
    }

    pub fn stats(&self) -> TextPaintStats {
        self.stats
    }

    /// Block translation in pixels.
    pub fn offset(&self) -> Vec2 {
        self.block.transform.translation()
    }

    fn rebuild(&mut self, text: &str) {
        self.block.chars = text
            .chars()
            .map(|ch| CharElement {
                ch,
                color: String::new(),
                hidden: false,
            })
            .collect();
        self.text = Some(text.to_owned());
        self.stats.rebuilds += 1;
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, state: &RenderState, _now: f64) {
        if self.text.as_deref() != Some(state.text.as_str()) {
            self.rebuild(&state.text);
        }

        self.block.transform = Affine::translate((state.offset_x, state.offset_y));
        self.block.opacity = state.opacity;
        self.block.visible = state.visible;
        self.block.background = state.background.clone();

        let revealed = state.revealed_chars();
        for (i, el) in self.block.chars.iter_mut().enumerate() {
            let color = state
                .colors
                .get(i)
                .map(String::as_str)
                .unwrap_or(DEFAULT_COLOR);
            if el.color != color {
                el.color = color.to_owned();
                self.stats.color_writes += 1;
            }
            el.hidden = i >= revealed;
        }
    }

    fn container_width(&self) -> f64 {
        self.config.width
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.config.char_width
    }

    fn destroy(&mut self) {
        self.block = TextBlock::default();
        self.text = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
