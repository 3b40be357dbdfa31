//! Column-by-column flip cascade for mechanical dot hardware.

/// One dot's on/off and color.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DotValue {
    pub on: bool,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlipEvent {
    pub dot: usize,
    pub value: DotValue,
    pub due: f64,
}

/// Pending flips ordered by due time; events sharing a due time keep insertion order.
#[derive(Debug, Default)]
pub struct FlipQueue {
    events: Vec<FlipEvent>,
}

impl FlipQueue {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[FlipEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Queue every dot of each column where `target` differs from `visible`.
    ///
    /// Changed columns are ranked left to right; the column of rank `k` is due at
    /// `now + k × flip_speed`. Events already pending are retargeted to `target` and
    /// keep their due time, so their columns are not queued twice. Returns the changed
    /// columns in rank order.
    pub fn schedule(
        &mut self,
        target: &[DotValue],
        visible: &[DotValue],
        cols: usize,
        now: f64,
        flip_speed: f64,
    ) -> Vec<usize> {
        if cols == 0 {
            return Vec::new();
        }
        let mut in_flight = vec![false; cols];
        for event in &mut self.events {
            if let Some(value) = target.get(event.dot) {
                event.value.clone_from(value);
            }
            in_flight[event.dot % cols] = true;
        }

        let mut changed: Vec<usize> = target
            .iter()
            .zip(visible)
            .enumerate()
            .filter(|(_, (t, v))| t != v)
            .map(|(i, _)| i % cols)
            .collect();
        changed.sort_unstable();
        changed.dedup();

        let rows = target.len() / cols;
        let step = flip_speed.max(0.0);
        for (rank, &col) in changed.iter().enumerate() {
            if in_flight[col] {
                continue;
            }
            let due = now + rank as f64 * step;
            for row in 0..rows {
                let dot = row * cols + col;
                self.push(FlipEvent {
                    dot,
                    value: target[dot].clone(),
                    due,
                });
            }
        }
        tracing::trace!(columns = changed.len(), queued = self.events.len(), "flip cascade scheduled");
        changed
    }

    fn push(&mut self, event: FlipEvent) {
        let at = self.events.partition_point(|e| e.due <= event.due);
        self.events.insert(at, event);
    }

    /// Apply every event due at `now` to `visible`, bumping `wear` on actual changes.
    ///
    /// Returns whether any visible dot changed.
    pub fn drain_due(&mut self, now: f64, visible: &mut [DotValue], wear: &mut [u32]) -> bool {
        let n = self.events.partition_point(|e| e.due <= now);
        let mut changed = false;
        for event in self.events.drain(..n) {
            let Some(slot) = visible.get_mut(event.dot) else {
                continue;
            };
            if *slot != event.value {
                *slot = event.value;
                if let Some(w) = wear.get_mut(event.dot) {
                    *w += 1;
                }
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/flip.rs"]
mod tests;
