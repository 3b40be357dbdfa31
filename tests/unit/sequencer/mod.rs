use std::{
    cell::RefCell,
    rc::Rc,
    sync::{Arc, Mutex},
};

use super::*;
use crate::{
    foundation::error::SignError,
    phase::step::Until,
};

type Log = Rc<RefCell<Vec<String>>>;

struct Recorder {
    log: Log,
    frames: Vec<RenderState>,
    settled: bool,
    cancels: usize,
}

impl Recorder {
    fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            frames: Vec::new(),
            settled: true,
            cancels: 0,
        }
    }
}

impl Renderer for Recorder {
    fn render(&mut self, state: &RenderState, _now: f64) {
        self.log.borrow_mut().push(format!("render {}", state.text));
        self.frames.push(state.clone());
    }

    fn container_width(&self) -> f64 {
        500.0
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * 30.0
    }

    fn is_settled(&self) -> bool {
        self.settled
    }

    fn cancel_pending(&mut self) {
        self.cancels += 1;
    }
}

fn listen(seq: &mut Sequencer, log: &Log) {
    let log = log.clone();
    seq.subscribe(move |e| log.borrow_mut().push(format!("{e:?}")));
}

fn events(log: &Log) -> Vec<String> {
    log.borrow()
        .iter()
        .filter(|l| !l.starts_with("render"))
        .cloned()
        .collect()
}

fn pause(text: &str, ms: f64) -> StepDescription {
    StepDescription::new("pause").with_text(text).with_duration(ms)
}

/// Tick every `dt` ms over `(from, to]`.
fn drive(seq: &mut Sequencer, r: &mut Recorder, from: f64, to: f64, dt: f64) {
    let mut t = from;
    while t < to {
        t += dt;
        seq.tick(t, r).unwrap();
    }
}

#[test]
fn play_with_no_steps_stays_idle() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    seq.play(0.0, &mut r).unwrap();
    assert_eq!(seq.state(), PlayState::Idle);
    assert_eq!(seq.tick(16.0, &mut r).unwrap(), TickOutcome::Inactive);
}

#[test]
fn scroll_to_center_then_finish() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    listen(&mut seq, &log);
    seq.set_sequence(vec![
        StepDescription::new("scroll-left")
            .with_text("HI")
            .with_until(Until::Center)
            .with_speed(100.0),
    ])
    .unwrap();

    seq.play(0.0, &mut r).unwrap();
    seq.tick(0.0, &mut r).unwrap();
    assert_eq!(r.frames[0].offset_x, 500.0);

    drive(&mut seq, &mut r, 0.0, 3000.0, 16.0);
    assert_eq!(r.frames.last().map(|f| f.offset_x), Some(220.0));
    assert_eq!(seq.state(), PlayState::Idle);
    assert_eq!(
        events(&log),
        ["PhaseStart { index: 0 }", "PhaseEnd { index: 0 }", "SequenceEnd"]
    );
}

#[test]
fn notifications_bracket_frames_in_order() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    listen(&mut seq, &log);
    seq.set_sequence(vec![pause("A", 20.0), pause("B", 20.0)])
        .unwrap();
    seq.play(0.0, &mut r).unwrap();
    drive(&mut seq, &mut r, 0.0, 100.0, 10.0);

    let log = log.borrow();
    let pos = |needle: &str| log.iter().position(|l| l == needle).unwrap();
    let first_b = log.iter().position(|l| l == "render B").unwrap();
    assert!(pos("PhaseStart { index: 0 }") < pos("render A"));
    assert!(pos("PhaseEnd { index: 0 }") < pos("PhaseStart { index: 1 }"));
    assert!(pos("PhaseStart { index: 1 }") < first_b);
    assert!(pos("PhaseEnd { index: 1 }") < pos("SequenceEnd"));
    assert_eq!(log.last().map(String::as_str), Some("SequenceEnd"));
}

#[test]
fn flash_toggles_on_interval_boundaries() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    seq.set_sequence(vec![
        StepDescription::new("flash")
            .with_text("X")
            .with_flashes(3, 100.0),
    ])
    .unwrap();
    seq.play(0.0, &mut r).unwrap();
    drive(&mut seq, &mut r, 0.0, 700.0, 50.0);

    let vis: Vec<bool> = r.frames.iter().map(|f| f.visible).collect();
    // ticks at 50, 100, ..., 600
    assert_eq!(
        vis,
        [true, false, false, true, true, false, false, true, true, false, false, true]
    );
    assert_eq!(seq.state(), PlayState::Idle);
    assert_eq!(r.frames.len(), 12);
}

#[test]
fn looping_restarts_without_going_idle() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    listen(&mut seq, &log);
    seq.set_loop(true);
    seq.set_sequence(vec![pause("A", 100.0), pause("B", 100.0)])
        .unwrap();
    seq.play(0.0, &mut r).unwrap();

    let mut t = 0.0;
    while t < 450.0 {
        t += 10.0;
        seq.tick(t, &mut r).unwrap();
        assert_eq!(seq.state(), PlayState::Playing);
    }
    let ev = events(&log);
    let end = ev.iter().position(|e| e == "SequenceEnd").unwrap();
    assert_eq!(ev[end + 1], "PhaseStart { index: 0 }");
    assert_eq!(seq.current_index(), Some(0));
}

#[test]
fn paused_time_is_not_counted() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    listen(&mut seq, &log);
    seq.set_sequence(vec![pause("A", 100.0)]).unwrap();
    seq.play(0.0, &mut r).unwrap();
    seq.tick(50.0, &mut r).unwrap();
    seq.pause();
    assert_eq!(seq.state(), PlayState::Paused);
    assert_eq!(seq.tick(500.0, &mut r).unwrap(), TickOutcome::Inactive);

    seq.play(1000.0, &mut r).unwrap();
    seq.tick(1040.0, &mut r).unwrap();
    assert_eq!(seq.state(), PlayState::Playing);
    seq.tick(1050.0, &mut r).unwrap();
    assert_eq!(seq.state(), PlayState::Idle);
    assert_eq!(events(&log).len(), 3);
}

#[test]
fn frame_cap_skips_but_keeps_elapsed_time() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    seq.set_max_fps(Some(10.0));
    seq.set_sequence(vec![pause("A", 100.0)]).unwrap();
    seq.play(0.0, &mut r).unwrap();

    assert_eq!(seq.tick(50.0, &mut r).unwrap(), TickOutcome::Throttled);
    assert!(r.frames.is_empty());
    assert_eq!(seq.tick(100.0, &mut r).unwrap(), TickOutcome::Rendered);
    assert_eq!(r.frames[0].progress, 1.0);
    assert_eq!(seq.state(), PlayState::Idle);
}

#[test]
fn listener_can_stop_mid_tick() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    listen(&mut seq, &log);
    let handle = seq.stop_handle();
    seq.subscribe(move |e| {
        if *e == (SequenceEvent::PhaseEnd { index: 0 }) {
            handle.request_stop();
        }
    });
    seq.set_sequence(vec![pause("A", 10.0), pause("B", 10.0)])
        .unwrap();
    seq.play(0.0, &mut r).unwrap();
    seq.tick(10.0, &mut r).unwrap();

    assert_eq!(seq.state(), PlayState::Idle);
    assert_eq!(seq.tick(20.0, &mut r).unwrap(), TickOutcome::Inactive);
    assert_eq!(r.frames.len(), 1);
    assert_eq!(r.cancels, 1);
    assert!(!events(&log).iter().any(|e| e == "PhaseStart { index: 1 }"));
}

#[test]
fn stop_request_between_ticks_is_honored_on_the_next_tick() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    seq.set_sequence(vec![pause("A", 1_000.0)]).unwrap();
    seq.play(0.0, &mut r).unwrap();
    seq.tick(16.0, &mut r).unwrap();

    seq.stop_handle().request_stop();
    assert_eq!(seq.tick(32.0, &mut r).unwrap(), TickOutcome::Inactive);
    assert_eq!(seq.state(), PlayState::Idle);
    assert_eq!(r.frames.len(), 1);
    assert_eq!(r.cancels, 1);
}

#[test]
fn phase_error_stops_and_surfaces() {
    struct Broken;
    impl Phase for Broken {
        fn advance(&mut self, _delta_ms: f64) -> SignResult<bool> {
            Err(SignError::phase("gear jammed"))
        }
        fn state(&self) -> RenderState {
            unreachable!("never rendered")
        }
    }

    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    seq.register_phase_type("broken", |_step, _ctx| {
        Ok(Box::new(Broken) as Box<dyn Phase>)
    });
    seq.set_sequence(vec![StepDescription::new("broken")]).unwrap();
    seq.play(0.0, &mut r).unwrap();
    let err = seq.tick(16.0, &mut r).unwrap_err();
    assert!(matches!(err, SignError::Phase(_)));
    assert_eq!(seq.state(), PlayState::Idle);
    assert!(r.frames.is_empty());
}

#[test]
fn unknown_phase_rejects_sequence() {
    let mut seq = Sequencer::default();
    let err = seq
        .set_sequence(vec![pause("A", 10.0), StepDescription::new("warp")])
        .unwrap_err();
    assert!(matches!(err, SignError::Config(_)));
    assert!(seq.steps().is_empty());
    assert_eq!(seq.state(), PlayState::Idle);
}

#[test]
fn step_hooks_fire_with_index() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (a, b) = (calls.clone(), calls.clone());
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    seq.set_sequence(vec![
        pause("A", 10.0),
        pause("B", 10.0)
            .on_start(move |i| a.lock().unwrap().push(format!("start {i}")))
            .on_end(move |i| b.lock().unwrap().push(format!("end {i}"))),
    ])
    .unwrap();
    seq.play(0.0, &mut r).unwrap();
    drive(&mut seq, &mut r, 0.0, 50.0, 10.0);
    assert_eq!(*calls.lock().unwrap(), ["start 1", "end 1"]);
}

#[test]
fn split_flap_waits_for_renderer_to_settle() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    r.settled = false;
    let mut seq = Sequencer::default();
    listen(&mut seq, &log);
    seq.set_sequence(vec![
        StepDescription::new("split-flap")
            .with_text("AB")
            .with_duration(100.0),
    ])
    .unwrap();
    seq.play(0.0, &mut r).unwrap();
    drive(&mut seq, &mut r, 0.0, 300.0, 50.0);
    assert_eq!(seq.current_index(), Some(0));
    assert!(!events(&log).iter().any(|e| e.starts_with("PhaseEnd")));

    r.settled = true;
    seq.tick(350.0, &mut r).unwrap();
    assert_eq!(seq.state(), PlayState::Idle);
    assert!(events(&log).iter().any(|e| e == "PhaseEnd { index: 0 }"));
}

#[test]
fn color_carries_to_later_steps() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    seq.set_default_color(Some(ColorSpec::solid("#0000ff")));
    seq.set_sequence(vec![
        pause("A", 10.0),
        pause("B", 10.0).with_color(ColorSpec::solid("#00ff00")),
        StepDescription::new("pause").with_duration(10.0),
    ])
    .unwrap();
    seq.play(0.0, &mut r).unwrap();
    drive(&mut seq, &mut r, 0.0, 40.0, 10.0);

    let colors: Vec<&str> = r.frames.iter().map(|f| f.colors[0].as_str()).collect();
    assert_eq!(colors, ["#0000ff", "#00ff00", "#00ff00"]);
    assert_eq!(r.frames[2].text, "B");
}

#[test]
fn unsubscribe_and_destroy() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    let id = {
        let log = log.clone();
        seq.subscribe(move |e| log.borrow_mut().push(format!("{e:?}")))
    };
    assert!(seq.unsubscribe(id));
    assert!(!seq.unsubscribe(id));

    seq.set_sequence(vec![pause("A", 10.0)]).unwrap();
    seq.play(0.0, &mut r).unwrap();
    seq.tick(10.0, &mut r).unwrap();
    assert!(events(&log).is_empty());

    listen(&mut seq, &log);
    seq.destroy();
    seq.play(20.0, &mut r).unwrap();
    assert_eq!(seq.state(), PlayState::Idle);
    assert!(events(&log).is_empty());
}

#[test]
fn refresh_keeps_playing() {
    let log = Log::default();
    let mut r = Recorder::new(&log);
    let mut seq = Sequencer::default();
    seq.set_sequence(vec![pause("A", 10.0), pause("B", 10.0)])
        .unwrap();
    seq.play(0.0, &mut r).unwrap();
    seq.refresh_steps(vec![pause("A", 10.0), pause("C", 10.0)])
        .unwrap();
    assert_eq!(seq.state(), PlayState::Playing);
    drive(&mut seq, &mut r, 0.0, 30.0, 10.0);
    assert_eq!(r.frames.last().map(|f| f.text.as_str()), Some("C"));
}
