use std::collections::BTreeMap;

use crate::{
    color::{DEFAULT_COLOR, parse::parse_rgb},
    foundation::core::{StripeDirection, clamp01},
    phase::RenderState,
};

use super::{
    Renderer,
    config::RenderConfig,
    flip::{DotValue, FlipQueue},
    glyphs::{ADVANCE, GLYPH_COLS, GLYPH_ROWS, glyph, lit},
    styles::ensure_styles_installed,
};

/// Forced state of a stuck dot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StuckState {
    On,
    Off,
}

/// A painted dot.
#[derive(Clone, Debug, PartialEq)]
pub struct DotElement {
    pub on: bool,
    /// Displayed color: the lit color, or the configured off color.
    pub color: String,
    pub glow: Option<String>,
    /// Timestamp of the last change, for warm-up/cool-down.
    pub changed_at: f64,
}

/// Dot-matrix surface: LED panels, flip-dot boards and bulb signs.
pub struct MatrixRenderer {
    config: RenderConfig,
    /// What the current frame asks for.
    target: Vec<DotValue>,
    /// Last target handed to the flip cascade.
    scheduled: Option<Vec<DotValue>>,
    /// Flip hardware: what the mechanics currently show.
    visible: Vec<DotValue>,
    /// What the elements were last painted with.
    painted: Vec<DotValue>,
    elements: Vec<DotElement>,
    wear: Vec<u32>,
    queue: FlipQueue,
    stuck: BTreeMap<usize, StuckState>,
    last_state: Option<RenderState>,
    last_now: f64,
    paints: u64,
}

impl MatrixRenderer {
    pub fn new(config: RenderConfig) -> Self {
        ensure_styles_installed();
        let n = config.rows * config.cols;
        let off = DotElement {
            on: false,
            color: config.off_color.clone(),
            glow: None,
            changed_at: 0.0,
        };
        tracing::debug!(
            rows = config.rows,
            cols = config.cols,
            flip = config.flip_animation,
            "matrix renderer built"
        );
        Self {
            target: vec![DotValue::default(); n],
            scheduled: None,
            visible: vec![DotValue::default(); n],
            painted: vec![DotValue::default(); n],
            elements: vec![off; n],
            wear: vec![0; n],
            queue: FlipQueue::default(),
            stuck: BTreeMap::new(),
            last_state: None,
            last_now: 0.0,
            paints: 0,
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn elements(&self) -> &[DotElement] {
        &self.elements
    }

    pub fn dot(&self, row: usize, col: usize) -> Option<&DotElement> {
        if row >= self.config.rows || col >= self.config.cols {
            return None;
        }
        self.elements.get(row * self.config.cols + col)
    }

    /// Element updates since construction.
    pub fn paint_count(&self) -> u64 {
        self.paints
    }

    pub fn pending_flips(&self) -> &FlipQueue {
        &self.queue
    }

    /// Per-dot count of applied flips; `None` unless the flip cascade is enabled.
    pub fn wear(&self) -> Option<&[u32]> {
        self.config.flip_animation.then_some(self.wear.as_slice())
    }

    pub fn stuck_tiles(&self) -> &BTreeMap<usize, StuckState> {
        &self.stuck
    }

    /// Replace the stuck-tile overrides and repaint the last frame with them.
    ///
    /// Indices outside the grid are dropped.
    pub fn set_stuck_tiles(&mut self, tiles: BTreeMap<usize, StuckState>) {
        let n = self.target.len();
        let (kept, dropped): (BTreeMap<_, _>, BTreeMap<_, _>) =
            tiles.into_iter().partition(|(i, _)| *i < n);
        if !dropped.is_empty() {
            tracing::warn!(
                dropped = dropped.len(),
                dots = n,
                "ignoring stuck tiles outside the grid"
            );
        }
        self.stuck = kept;
        if let Some(state) = self.last_state.take() {
            let now = self.last_now;
            self.render(&state, now);
        }
    }

    /// Light level of a dot at `now` in `[0, 1]`, following the configured
    /// warm-up/cool-down time.
    pub fn level(&self, index: usize, now: f64) -> f64 {
        let Some(el) = self.elements.get(index) else {
            return 0.0;
        };
        let ramp = if self.config.dot_transition > 0.0 {
            clamp01((now - el.changed_at) / self.config.dot_transition)
        } else {
            1.0
        };
        if el.on { ramp } else { 1.0 - ramp }
    }

    fn project(&self, state: &RenderState) -> Vec<DotValue> {
        let rows = self.config.rows as i64;
        let cols = self.config.cols as i64;
        let mut buf = vec![DotValue::default(); self.target.len()];

        if state.visible && state.opacity > 0.0 {
            let pitch = self.config.dot_pitch;
            let col0 = (state.offset_x / pitch).round() as i64;
            let row0 = (rows - GLYPH_ROWS as i64).div_euclid(2)
                + (state.offset_y / pitch).round() as i64;
            let text_cols = (state.char_count() * ADVANCE) as f64;
            let cutoff = state
                .wipe_progress
                .map(|w| col0 + (text_cols * clamp01(w)).floor() as i64);
            let striped = state.stripe_direction == Some(StripeDirection::Horizontal);

            for (i, ch) in state.text.chars().enumerate() {
                let base = col0 + (i * ADVANCE) as i64;
                if base + GLYPH_COLS as i64 <= 0 || base >= cols {
                    continue;
                }
                let g = glyph(ch);
                for gr in 0..GLYPH_ROWS {
                    let r = row0 + gr as i64;
                    if r < 0 || r >= rows {
                        continue;
                    }
                    for gc in 0..GLYPH_COLS {
                        let c = base + gc as i64;
                        if c < 0 || c >= cols || !lit(&g, gr, gc) {
                            continue;
                        }
                        if cutoff.is_some_and(|k| c >= k) {
                            continue;
                        }
                        let pick = if striped { gr } else { i };
                        let color = pick_color(&state.colors, pick, striped);
                        buf[(r * cols + c) as usize] = DotValue {
                            on: true,
                            color: dim(color, state.opacity),
                        };
                    }
                }
            }
        }

        let stuck_color = state
            .colors
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_COLOR);
        for (&i, s) in &self.stuck {
            let Some(dot) = buf.get_mut(i) else { continue };
            match s {
                StuckState::On => {
                    if !dot.on {
                        *dot = DotValue {
                            on: true,
                            color: stuck_color.to_owned(),
                        };
                    }
                }
                StuckState::Off => *dot = DotValue::default(),
            }
        }
        buf
    }

    fn paint(&mut self, now: f64) {
        let source = if self.config.flip_animation {
            &self.visible
        } else {
            &self.target
        };
        for (i, value) in source.iter().enumerate() {
            let (Some(prev), Some(el)) = (self.painted.get_mut(i), self.elements.get_mut(i)) else {
                break;
            };
            if *prev == *value {
                continue;
            }
            *prev = value.clone();
            el.on = value.on;
            el.color = if value.on {
                value.color.clone()
            } else {
                self.config.off_color.clone()
            };
            el.glow = (self.config.glow && value.on).then(|| value.color.clone());
            el.changed_at = now;
            self.paints += 1;
        }
    }

    fn drain_flips(&mut self, now: f64) {
        self.queue.drain_due(now, &mut self.visible, &mut self.wear);
    }
}

fn pick_color(colors: &[String], index: usize, cyclic: bool) -> &str {
    let c = if cyclic && !colors.is_empty() {
        colors.get(index % colors.len())
    } else {
        colors.get(index)
    };
    c.map(String::as_str).unwrap_or(DEFAULT_COLOR)
}

fn dim(color: &str, opacity: f64) -> String {
    if opacity >= 1.0 {
        return color.to_owned();
    }
    match parse_rgb(color) {
        Ok(rgb) => rgb.scaled(opacity).to_hex(),
        Err(_) => color.to_owned(),
    }
}

impl Renderer for MatrixRenderer {
    fn render(&mut self, state: &RenderState, now: f64) {
        self.target = self.project(state);
        if self.config.flip_animation {
            if self.scheduled.as_ref() != Some(&self.target) {
                self.queue.schedule(
                    &self.target,
                    &self.visible,
                    self.config.cols,
                    now,
                    self.config.flip_speed,
                );
                self.scheduled = Some(self.target.clone());
            }
            self.drain_flips(now);
        }
        self.paint(now);
        self.last_state = Some(state.clone());
        self.last_now = now;
    }

    fn pump(&mut self, now: f64) {
        if self.config.flip_animation && !self.queue.is_empty() {
            self.drain_flips(now);
            self.paint(now);
        }
        self.last_now = now;
    }

    fn container_width(&self) -> f64 {
        self.config.cols as f64 * self.config.dot_pitch
    }

    fn measure_text(&self, text: &str) -> f64 {
        (text.chars().count() * ADVANCE) as f64 * self.config.dot_pitch
    }

    fn is_settled(&self) -> bool {
        self.queue.is_empty()
    }

    fn cancel_pending(&mut self) {
        if !self.queue.is_empty() {
            tracing::debug!(dropped = self.queue.len(), "flip cascade cancelled");
        }
        self.queue.clear();
        self.scheduled = None;
    }

    fn destroy(&mut self) {
        self.cancel_pending();
        self.elements.clear();
        self.last_state = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/matrix.rs"]
mod tests;
