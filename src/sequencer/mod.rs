//! Timeline driver: owns the step list, builds phases lazily and feeds their frames to a
//! [`Renderer`].
//!
//! The sequencer never reads a clock. The host calls [`Sequencer::tick`] once per frame
//! with a monotonic timestamp in ms.

use crate::{
    color::{
        palette::Palette,
        resolve::{ColorSpec, warn_unparseable},
    },
    foundation::error::SignResult,
    phase::{
        Phase, PhaseCtx, PhaseRegistry, RenderState, StepDescription,
        effective_text,
    },
    render::Renderer,
};

pub mod events;
pub mod gate;

pub use events::{SequenceEvent, StopHandle, SubscriptionId};
pub use gate::FrameGate;

use events::EventBus;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// What a call to [`Sequencer::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened.
    Inactive,
    /// Rejected by the frame cap.
    Throttled,
    /// A frame reached the renderer.
    Rendered,
}

struct Running {
    phase: Box<dyn Phase>,
    /// Completed, waiting for the renderer to settle.
    finished: bool,
}

pub struct Sequencer {
    steps: Vec<StepDescription>,
    registry: PhaseRegistry,
    play_state: PlayState,
    cursor: usize,
    current: Option<Running>,
    /// Last frame forwarded to the renderer; the next phase's predecessor.
    last_frame: Option<RenderState>,
    inherited_color: Option<ColorSpec>,
    inherited_background: Option<String>,
    default_color: Option<ColorSpec>,
    palette: Option<Palette>,
    looping: bool,
    gate: FrameGate,
    events: EventBus,
    stop_request: StopHandle,
    destroyed: bool,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(PhaseRegistry::default())
    }
}

impl Sequencer {
    pub fn new(registry: PhaseRegistry) -> Self {
        Self {
            steps: Vec::new(),
            registry,
            play_state: PlayState::Idle,
            cursor: 0,
            current: None,
            last_frame: None,
            inherited_color: None,
            inherited_background: None,
            default_color: None,
            palette: None,
            looping: false,
            gate: FrameGate::default(),
            events: EventBus::default(),
            stop_request: StopHandle::default(),
            destroyed: false,
        }
    }

    /// Replace the step list. Stops playback first.
    ///
    /// Every step's phase type is checked up front; on failure the sequencer is left
    /// idle with an empty step list.
    pub fn set_sequence(&mut self, steps: Vec<StepDescription>) -> SignResult<()> {
        self.stop();
        self.steps.clear();
        self.registry.check(&steps)?;
        tracing::debug!(steps = steps.len(), "sequence set");
        self.steps = steps;
        Ok(())
    }

    /// Swap step contents without interrupting playback.
    ///
    /// The running phase keeps its parameters; the new descriptions apply the next time
    /// each step is built.
    pub fn refresh_steps(&mut self, steps: Vec<StepDescription>) -> SignResult<()> {
        self.registry.check(&steps)?;
        self.steps = steps;
        if self.cursor >= self.steps.len() && self.play_state != PlayState::Idle {
            self.stop();
        }
        Ok(())
    }

    pub fn steps(&self) -> &[StepDescription] {
        &self.steps
    }

    pub fn play(&mut self, now: f64, renderer: &mut dyn Renderer) -> SignResult<()> {
        if self.destroyed {
            tracing::warn!("play on a destroyed sequencer ignored");
            return Ok(());
        }
        match self.play_state {
            PlayState::Playing => Ok(()),
            PlayState::Paused => {
                tracing::debug!(index = self.cursor, "resume");
                self.gate.reset(now);
                self.play_state = PlayState::Playing;
                Ok(())
            }
            PlayState::Idle => {
                if self.steps.is_empty() {
                    return Ok(());
                }
                self.stop_request.clear();
                self.cursor = 0;
                self.last_frame = None;
                self.inherited_color = self.default_color.clone();
                self.inherited_background = None;
                self.begin_current(renderer)?;
                self.gate.reset(now);
                self.play_state = PlayState::Playing;
                tracing::debug!(steps = self.steps.len(), "play");
                self.announce_start(renderer);
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) {
        if self.play_state == PlayState::Playing {
            tracing::debug!(index = self.cursor, "pause");
            self.play_state = PlayState::Paused;
        }
    }

    /// Back to idle; discards the running phase. Safe to call at any time.
    pub fn stop(&mut self) {
        if self.play_state != PlayState::Idle {
            tracing::debug!(index = self.cursor, "stop");
        }
        self.play_state = PlayState::Idle;
        self.current = None;
        self.cursor = 0;
        self.last_frame = None;
        self.stop_request.clear();
    }

    /// Stop for good and drop every subscriber.
    pub fn destroy(&mut self) {
        self.stop();
        self.events.clear();
        self.destroyed = true;
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SequenceEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// A handle listeners can capture to stop playback from inside a notification.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop_request.clone()
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_max_fps(&mut self, max_fps: Option<f64>) {
        self.gate.set_max_fps(max_fps);
    }

    pub fn max_fps(&self) -> Option<f64> {
        self.gate.max_fps()
    }

    pub fn set_palette(&mut self, palette: Option<Palette>) {
        self.palette = palette;
    }

    /// Color used by steps that set none and have no colored predecessor.
    pub fn set_default_color(&mut self, color: Option<ColorSpec>) {
        if let Some(color) = &color {
            warn_unparseable(color);
        }
        self.default_color = color;
    }

    pub fn state(&self) -> PlayState {
        self.play_state
    }

    /// Index of the running step; `None` when idle.
    pub fn current_index(&self) -> Option<usize> {
        self.current.as_ref().map(|_| self.cursor)
    }

    /// The frame most recently forwarded to the renderer.
    pub fn last_frame(&self) -> Option<&RenderState> {
        self.last_frame.as_ref()
    }

    pub fn register_phase_type<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&StepDescription, &PhaseCtx<'_>) -> SignResult<Box<dyn Phase>>
            + Send
            + Sync
            + 'static,
    {
        self.registry.register(name, factory);
    }

    pub fn registry(&self) -> &PhaseRegistry {
        &self.registry
    }

    /// Reseed the generator behind `random` steps.
    pub fn reseed(&mut self, seed: u64) {
        self.registry.reseed(seed);
    }

    /// Per-frame driver.
    ///
    /// Advances the running phase by the time since the last executed tick, forwards
    /// its frame, then handles completion: builds the next step, loops, or finishes.
    /// An error from a phase stops playback and is returned.
    pub fn tick(&mut self, now: f64, renderer: &mut dyn Renderer) -> SignResult<TickOutcome> {
        if self.play_state != PlayState::Playing || self.honor_stop_request(renderer) {
            return Ok(TickOutcome::Inactive);
        }
        let Some(delta) = self.gate.admit(now) else {
            return Ok(TickOutcome::Throttled);
        };
        let Some(running) = self.current.as_mut() else {
            self.stop();
            return Ok(TickOutcome::Inactive);
        };

        let completed = match running.phase.advance(delta) {
            Ok(done) => done || running.finished,
            Err(err) => {
                tracing::warn!(index = self.cursor, error = %err, "phase failed; stopping");
                self.stop();
                return Err(err);
            }
        };
        let frame = running.phase.state();
        renderer.render(&frame, now);
        self.last_frame = Some(frame);

        if completed {
            if running.phase.awaits_renderer() && !renderer.is_settled() {
                running.finished = true;
                return Ok(TickOutcome::Rendered);
            }
            self.finish_current(renderer)?;
        }
        Ok(TickOutcome::Rendered)
    }

    fn finish_current(&mut self, renderer: &mut dyn Renderer) -> SignResult<()> {
        let index = self.cursor;
        self.current = None;
        self.emit(SequenceEvent::PhaseEnd { index });
        if let Some(hook) = self.steps.get(index).and_then(|s| s.on_end.clone()) {
            hook.call(index);
        }
        if self.honor_stop_request(renderer) {
            return Ok(());
        }

        self.cursor += 1;
        if self.cursor >= self.steps.len() {
            self.emit(SequenceEvent::SequenceEnd);
            if self.honor_stop_request(renderer) {
                return Ok(());
            }
            if !self.looping {
                tracing::debug!("sequence finished");
                self.stop();
                return Ok(());
            }
            tracing::debug!("sequence loops");
            self.cursor = 0;
            self.last_frame = None;
            self.inherited_color = self.default_color.clone();
            self.inherited_background = None;
        }

        if let Err(err) = self.begin_current(renderer) {
            self.stop();
            return Err(err);
        }
        self.announce_start(renderer);
        Ok(())
    }

    fn begin_current(&mut self, renderer: &mut dyn Renderer) -> SignResult<()> {
        let Some(step) = self.steps.get(self.cursor) else {
            return Ok(());
        };
        let text = effective_text(step, self.last_frame.as_ref());
        let ctx = PhaseCtx::new(renderer.container_width(), renderer.measure_text(&text))
            .with_prev(self.last_frame.as_ref())
            .with_palette(self.palette.as_ref())
            .with_inherited_color(self.inherited_color.as_ref())
            .with_inherited_background(self.inherited_background.as_deref());
        let mut phase = self.registry.build(step, &ctx)?;
        phase.start();

        if let Some(color) = &step.color {
            warn_unparseable(color);
            self.inherited_color = Some(color.clone());
        }
        if let Some(bg) = &step.background {
            self.inherited_background = Some(bg.clone());
        }
        self.current = Some(Running {
            phase,
            finished: false,
        });
        Ok(())
    }

    fn announce_start(&mut self, renderer: &mut dyn Renderer) {
        let index = self.cursor;
        self.emit(SequenceEvent::PhaseStart { index });
        if let Some(hook) = self.steps.get(index).and_then(|s| s.on_start.clone()) {
            hook.call(index);
        }
        self.honor_stop_request(renderer);
    }

    fn emit(&mut self, event: SequenceEvent) {
        self.events.emit(&event);
    }

    /// A stop requested from a listener also cancels the renderer's pending motion.
    fn honor_stop_request(&mut self, renderer: &mut dyn Renderer) -> bool {
        if self.stop_request.take() {
            self.stop();
            renderer.cancel_pending();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/mod.rs"]
mod tests;
