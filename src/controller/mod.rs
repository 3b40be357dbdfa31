//! Facade tying options, sequencer and surface together.

use std::collections::BTreeMap;

use image::RgbaImage;

use crate::{
    color::resolve::ColorSpec,
    config::{ResolvedOptions, SequenceDocument, SignOptions},
    foundation::error::{SignError, SignResult},
    phase::{Phase, PhaseCtx, PhaseRegistry, StepDescription},
    render::{DisplayMode, Renderer, StuckState, Surface},
    sequencer::{PlayState, SequenceEvent, Sequencer, StopHandle, SubscriptionId, TickOutcome},
};

pub mod protocol;

pub use protocol::{ControlMessage, ControlReply, TokenResolver};

/// Snapshot returned by `getStatus`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub state: PlayState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub steps: usize,
    pub mode: DisplayMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(rename = "loop")]
    pub looping: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_flap_complete: Option<bool>,
    /// Total applied flips across all dots, on flip hardware.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wear: Option<u64>,
}

pub struct Controller {
    options: SignOptions,
    resolved: ResolvedOptions,
    surface: Surface,
    sequencer: Sequencer,
    /// Steps as authored, before token substitution.
    steps: Vec<StepDescription>,
    tokens: BTreeMap<String, String>,
    resolver: Option<Box<dyn TokenResolver>>,
    stuck: BTreeMap<usize, StuckState>,
    last_now: f64,
}

impl Controller {
    pub fn new(options: SignOptions) -> SignResult<Self> {
        let resolved = options.resolve()?;
        let surface = Surface::new(resolved.render.clone());
        let mut sequencer = Sequencer::new(PhaseRegistry::default());
        configure_sequencer(&mut sequencer, &resolved);
        tracing::debug!(mode = ?resolved.render.mode, "controller ready");
        Ok(Self {
            options,
            resolved,
            surface,
            sequencer,
            steps: Vec::new(),
            tokens: BTreeMap::new(),
            resolver: None,
            stuck: BTreeMap::new(),
            last_now: 0.0,
        })
    }

    /// Build from a persisted document; does not start playback.
    pub fn from_document(doc: &SequenceDocument) -> SignResult<Self> {
        let mut controller = Self::new(doc.options())?;
        controller.set_sequence(doc.sequence.clone())?;
        Ok(controller)
    }

    pub fn options(&self) -> &SignOptions {
        &self.options
    }

    pub fn resolved(&self) -> &ResolvedOptions {
        &self.resolved
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Replace the sequence. A rejected sequence leaves the controller with no steps.
    pub fn set_sequence(&mut self, steps: Vec<StepDescription>) -> SignResult<()> {
        let resolved = self.substitute(&steps);
        if let Err(err) = self.sequencer.set_sequence(resolved) {
            self.steps.clear();
            return Err(err);
        }
        self.steps = steps;
        Ok(())
    }

    /// Replace the sequence with a single step showing `text`.
    ///
    /// Without `phase`, split-flap boards flip to the text and other displays hold it
    /// indefinitely.
    pub fn set_text(&mut self, text: &str, phase: Option<&str>, now: f64) -> SignResult<()> {
        let step = match phase {
            Some(p) => StepDescription::new(p).with_text(text),
            None if self.surface.mode() == DisplayMode::SplitFlap => {
                StepDescription::new("split-flap").with_text(text)
            }
            None => StepDescription::new("pause")
                .with_text(text)
                .with_duration(f64::INFINITY),
        };
        self.set_sequence(vec![step])?;
        self.play(now)
    }

    pub fn play(&mut self, now: f64) -> SignResult<()> {
        self.last_now = now;
        self.sequencer.play(now, &mut self.surface)
    }

    pub fn pause(&mut self) {
        self.sequencer.pause();
    }

    /// Back to idle. Pending flips and flap steps are cancelled, so the display stays
    /// as it was at the moment of the call.
    pub fn stop(&mut self) {
        self.sequencer.stop();
        self.surface.cancel_pending();
    }

    /// Per-frame entry point. Renderer timers keep running while paused or after the
    /// sequence ends on its own.
    pub fn tick(&mut self, now: f64) -> SignResult<TickOutcome> {
        self.last_now = now;
        let outcome = self.sequencer.tick(now, &mut self.surface)?;
        if outcome != TickOutcome::Rendered {
            self.surface.pump(now);
        }
        Ok(outcome)
    }

    /// Layer `options` over the current ones and rebuild the display.
    ///
    /// Playback restarts from the first step if it was playing or paused.
    pub fn set_theme(&mut self, options: &SignOptions) -> SignResult<()> {
        let merged = self.options.overlay(options);
        let resolved = merged.resolve()?;
        self.rebuild(merged, resolved)
    }

    /// Layer `options` over the current ones; the display is rebuilt only when its
    /// configuration changed.
    pub fn configure(&mut self, options: &SignOptions) -> SignResult<()> {
        let merged = self.options.overlay(options);
        let resolved = merged.resolve()?;
        if resolved.render != self.resolved.render {
            return self.rebuild(merged, resolved);
        }
        configure_sequencer(&mut self.sequencer, &resolved);
        self.options = merged;
        self.resolved = resolved;
        Ok(())
    }

    fn rebuild(&mut self, options: SignOptions, resolved: ResolvedOptions) -> SignResult<()> {
        tracing::debug!(mode = ?resolved.render.mode, "rebuilding display");
        let prior = self.sequencer.state();
        self.sequencer.stop();
        self.surface.destroy();
        self.surface = Surface::new(resolved.render.clone());
        if !self.stuck.is_empty() {
            self.surface.set_stuck_tiles(self.stuck.clone());
        }
        configure_sequencer(&mut self.sequencer, &resolved);
        self.options = options;
        self.resolved = resolved;
        self.restart(prior)
    }

    /// Start again from the first step when `prior` was not idle; a paused sign stays
    /// paused at that step.
    fn restart(&mut self, prior: PlayState) -> SignResult<()> {
        if prior == PlayState::Idle {
            return Ok(());
        }
        self.play(self.last_now)?;
        if prior == PlayState::Paused {
            self.sequencer.pause();
        }
        Ok(())
    }

    /// New default color for steps without their own; restarts an active sequence so
    /// it takes effect immediately.
    pub fn set_color(&mut self, color: ColorSpec) -> SignResult<()> {
        self.options.color = Some(color.clone());
        self.resolved.color = Some(color.clone());
        self.sequencer.set_default_color(Some(color));
        let prior = self.sequencer.state();
        if prior != PlayState::Idle {
            self.sequencer.stop();
        }
        self.restart(prior)
    }

    pub fn set_stuck_tiles(&mut self, tiles: BTreeMap<usize, StuckState>) -> SignResult<()> {
        if !self.surface.set_stuck_tiles(tiles.clone()) {
            return Err(SignError::config("stuck tiles need a dot-matrix display"));
        }
        self.stuck = tiles;
        Ok(())
    }

    pub fn set_token_resolver(&mut self, resolver: impl TokenResolver + 'static) {
        self.resolver = Some(Box::new(resolver));
    }

    /// Merge token values and re-resolve `liveTokens` steps without interrupting
    /// playback.
    pub fn update_tokens(&mut self, tokens: BTreeMap<String, String>) -> SignResult<()> {
        self.tokens.extend(tokens);
        if !self.steps.iter().any(|s| s.live_tokens) {
            return Ok(());
        }
        let resolved = self.substitute(&self.steps);
        self.sequencer.refresh_steps(resolved)
    }

    pub fn tokens(&self) -> &BTreeMap<String, String> {
        &self.tokens
    }

    fn substitute(&self, steps: &[StepDescription]) -> Vec<StepDescription> {
        let Some(resolver) = self.resolver.as_deref() else {
            return steps.to_vec();
        };
        steps
            .iter()
            .map(|step| {
                let mut step = step.clone();
                if step.live_tokens {
                    step.text = step
                        .text
                        .as_deref()
                        .map(|t| resolver.resolve(t, &self.tokens));
                }
                step
            })
            .collect()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SequenceEvent) + 'static) -> SubscriptionId {
        self.sequencer.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.sequencer.unsubscribe(id)
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.sequencer.stop_handle()
    }

    pub fn register_phase_type<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&StepDescription, &PhaseCtx<'_>) -> SignResult<Box<dyn Phase>>
            + Send
            + Sync
            + 'static,
    {
        self.sequencer.register_phase_type(name, factory);
    }

    pub fn wear(&self) -> Option<&[u32]> {
        self.surface.wear()
    }

    pub fn split_flap_complete(&self) -> Option<bool> {
        self.surface.split_flap_complete()
    }

    pub fn rasterize(&self) -> RgbaImage {
        self.surface.rasterize()
    }

    pub fn ascii(&self) -> String {
        self.surface.ascii()
    }

    pub fn status(&self) -> Status {
        Status {
            state: self.sequencer.state(),
            index: self.sequencer.current_index(),
            steps: self.steps.len(),
            mode: self.surface.mode(),
            preset: self.options.preset.clone(),
            looping: self.sequencer.is_looping(),
            max_fps: self.sequencer.max_fps(),
            text: self.sequencer.last_frame().map(|f| f.text.clone()),
            split_flap_complete: self.surface.split_flap_complete(),
            wear: self
                .surface
                .wear()
                .map(|w| w.iter().map(|n| u64::from(*n)).sum()),
        }
    }

    /// Map one live-control message onto the operations above.
    #[tracing::instrument(skip(self, msg), fields(action = msg.action()))]
    pub fn apply(&mut self, msg: ControlMessage, now: f64) -> SignResult<ControlReply> {
        self.last_now = now;
        match msg {
            ControlMessage::Sequence { sequence, options } => {
                // Both halves are validated before the display is touched.
                let theme = options
                    .map(|o| {
                        let merged = self.options.overlay(&o);
                        merged.resolve().map(|resolved| (merged, resolved))
                    })
                    .transpose()?;
                self.set_sequence(sequence)?;
                if let Some((merged, resolved)) = theme {
                    self.rebuild(merged, resolved)?;
                }
                self.play(now)?;
            }
            ControlMessage::SetText { text, phase } => {
                self.set_text(&text, phase.as_deref(), now)?;
            }
            ControlMessage::Play => self.play(now)?,
            ControlMessage::Pause => self.pause(),
            ControlMessage::Stop => self.stop(),
            ControlMessage::SetTheme { options } => self.set_theme(&options)?,
            ControlMessage::SetColor { color } => self.set_color(color)?,
            ControlMessage::SetStuckTiles { tiles } => {
                self.set_stuck_tiles(protocol::parse_tiles(tiles)?)?;
            }
            ControlMessage::Config { options } => self.configure(&options)?,
            ControlMessage::TokenUpdate { tokens } => self.update_tokens(tokens)?,
            ControlMessage::GetStatus => return Ok(ControlReply::Status(self.status())),
        }
        Ok(ControlReply::Ok)
    }

    /// Stop playback, drop subscribers and release the display.
    pub fn destroy(&mut self) {
        self.sequencer.destroy();
        self.surface.destroy();
    }
}

fn configure_sequencer(sequencer: &mut Sequencer, resolved: &ResolvedOptions) {
    sequencer.set_loop(resolved.looping);
    sequencer.set_max_fps(resolved.max_fps);
    sequencer.set_palette(resolved.palette.clone());
    sequencer.set_default_color(resolved.color.clone());
    if let Some(seed) = resolved.seed {
        sequencer.reseed(seed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/mod.rs"]
mod tests;
