/// Frame-rate cap for the tick driver.
///
/// A tick is admitted once at least `0.8 × 1000 / max_fps` ms have passed since the
/// last admitted tick. Rejected ticks leave the reference time untouched, so the next
/// admitted tick's delta covers the skipped interval and no motion time is lost.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGate {
    max_fps: Option<f64>,
    last: Option<f64>,
}

impl FrameGate {
    pub fn new(max_fps: Option<f64>) -> Self {
        Self {
            max_fps: max_fps.filter(|f| f.is_finite() && *f > 0.0),
            last: None,
        }
    }

    pub fn max_fps(&self) -> Option<f64> {
        self.max_fps
    }

    pub fn set_max_fps(&mut self, max_fps: Option<f64>) {
        self.max_fps = max_fps.filter(|f| f.is_finite() && *f > 0.0);
    }

    /// Restart timing at `now`; the next admitted delta is measured from here.
    pub fn reset(&mut self, now: f64) {
        self.last = Some(now);
    }

    /// Elapsed ms since the last admitted tick, or `None` when throttled.
    pub fn admit(&mut self, now: f64) -> Option<f64> {
        let Some(last) = self.last else {
            self.last = Some(now);
            return Some(0.0);
        };
        let elapsed = now - last;
        if let Some(fps) = self.max_fps {
            if elapsed < 0.8 * (1000.0 / fps) {
                return None;
            }
        }
        self.last = Some(now);
        Some(elapsed.max(0.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/gate.rs"]
mod tests;
