use crate::{color::DEFAULT_COLOR, phase::RenderState};

use super::{Renderer, config::RenderConfig, styles::ensure_styles_installed};

/// Where a cell is in its flip chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellMotion {
    Settled,
    /// Next single-position step happens at `next_at`.
    Stepping { next_at: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlapCell {
    pub current: char,
    pub target: char,
    pub color: String,
    pub motion: CellMotion,
    /// Single-position flips since construction.
    pub flips: u64,
}

impl FlapCell {
    fn blank() -> Self {
        Self {
            current: ' ',
            target: ' ',
            color: DEFAULT_COLOR.to_owned(),
            motion: CellMotion::Settled,
            flips: 0,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

/// Split-flap board: a fixed row of character cells that reach their targets by
/// flipping through a wheel one position at a time.
pub struct SplitFlapRenderer {
    config: RenderConfig,
    wheel: Vec<char>,
    cells: Vec<FlapCell>,
    visible: bool,
    text: Option<String>,
    complete: bool,
}

impl SplitFlapRenderer {
    pub fn new(config: RenderConfig) -> Self {
        ensure_styles_installed();
        let wheel = config.wheel.chars();
        let cells = vec![FlapCell::blank(); config.cells];
        Self {
            config,
            wheel,
            cells,
            visible: true,
            text: None,
            complete: true,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn cells(&self) -> &[FlapCell] {
        &self.cells
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// What the board currently shows.
    pub fn current_text(&self) -> String {
        self.cells.iter().map(|c| c.current).collect()
    }

    pub fn target_text(&self) -> String {
        self.cells.iter().map(|c| c.target).collect()
    }

    /// True once every cell shows its target.
    pub fn split_flap_complete(&self) -> bool {
        self.complete
    }

    fn on_wheel(&self, c: char) -> bool {
        self.wheel.contains(&c)
    }

    /// Prefer the wheel's own spelling of `c` when only its case differs.
    fn fold(&self, c: char) -> char {
        if self.on_wheel(c) {
            return c;
        }
        let upper = c.to_ascii_uppercase();
        if self.on_wheel(upper) { upper } else { c }
    }

    fn next_on_wheel(&self, c: char) -> char {
        match self.wheel.iter().position(|w| *w == c) {
            Some(i) => self.wheel[(i + 1) % self.wheel.len()],
            None => c,
        }
    }

    fn set_targets(&mut self, state: &RenderState, now: f64) {
        let n = self.cells.len();
        let chars: Vec<char> = state.text.chars().take(n).collect();
        let left = (n - chars.len()) / 2;

        for i in 0..n {
            let target = match i.checked_sub(left).and_then(|k| chars.get(k)) {
                Some(&c) => self.fold(c),
                None => ' ',
            };
            let color = i
                .checked_sub(left)
                .filter(|k| *k < chars.len())
                .and_then(|k| state.colors.get(k));
            let stepping = self.on_wheel(target) && self.on_wheel(self.cells[i].current);
            let stagger = self.config.stagger.max(0.0);

            let cell = &mut self.cells[i];
            if let Some(color) = color {
                cell.color.clone_from(color);
            }
            if cell.target == target {
                continue;
            }
            cell.target = target;
            self.complete = false;
            if !stepping {
                cell.current = target;
                cell.motion = CellMotion::Settled;
            } else if cell.motion == CellMotion::Settled {
                cell.motion = CellMotion::Stepping {
                    next_at: now + i as f64 * stagger,
                };
            }
        }
    }

    fn step_cells(&mut self, now: f64) {
        let duration = self.config.flip_duration;
        for i in 0..self.cells.len() {
            loop {
                let cell = &self.cells[i];
                let CellMotion::Stepping { next_at } = cell.motion else {
                    break;
                };
                if cell.is_settled() {
                    self.cells[i].motion = CellMotion::Settled;
                    break;
                }
                if now < next_at {
                    break;
                }
                let next = if duration > 0.0 {
                    self.next_on_wheel(cell.current)
                } else {
                    cell.target
                };
                let cell = &mut self.cells[i];
                cell.current = next;
                cell.flips += 1;
                cell.motion = if cell.is_settled() {
                    CellMotion::Settled
                } else {
                    CellMotion::Stepping {
                        next_at: next_at + duration,
                    }
                };
            }
        }
        self.complete = self.cells.iter().all(FlapCell::is_settled);
    }
}

impl Renderer for SplitFlapRenderer {
    fn render(&mut self, state: &RenderState, now: f64) {
        self.visible = state.visible && state.opacity > 0.0;
        if self.text.as_deref() != Some(state.text.as_str()) {
            tracing::debug!(text = %state.text, "split-flap targets changed");
            self.text = Some(state.text.clone());
        }
        self.set_targets(state, now);
        self.step_cells(now);
    }

    fn pump(&mut self, now: f64) {
        if !self.complete {
            self.step_cells(now);
        }
    }

    fn container_width(&self) -> f64 {
        self.cells.len() as f64 * self.config.char_width
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count().min(self.cells.len()) as f64 * self.config.char_width
    }

    fn is_settled(&self) -> bool {
        self.complete
    }

    fn cancel_pending(&mut self) {
        for cell in &mut self.cells {
            cell.motion = CellMotion::Settled;
            cell.target = cell.current;
        }
        self.complete = true;
    }

    fn destroy(&mut self) {
        self.cancel_pending();
        self.text = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/split_flap.rs"]
mod tests;
