use super::*;
use crate::phase::state::RenderState;

struct Sparkle {
    elapsed: f64,
}

impl Phase for Sparkle {
    fn advance(&mut self, delta_ms: f64) -> SignResult<bool> {
        let before = self.elapsed;
        self.elapsed += delta_ms;
        Ok(before < 100.0 && self.elapsed >= 100.0)
    }

    fn state(&self) -> RenderState {
        RenderState {
            text: "*".to_owned(),
            offset_x: 0.0,
            offset_y: 0.0,
            opacity: 1.0,
            visible: true,
            colors: vec!["#ffffff".to_owned()],
            progress: (self.elapsed / 100.0).min(1.0),
            stripe_direction: None,
            wipe_progress: None,
            background: None,
        }
    }
}

#[test]
fn unknown_phase_is_a_config_error() {
    let mut reg = PhaseRegistry::default();
    let step = StepDescription::new("teleport");
    let err = reg.build(&step, &PhaseCtx::new(100.0, 10.0)).err().unwrap();
    assert!(matches!(err, SignError::Config(_)));
    assert!(err.to_string().contains("teleport"));
}

#[test]
fn check_reports_offending_step_index() {
    let reg = PhaseRegistry::default();
    let steps = vec![
        StepDescription::new("pause"),
        StepDescription::new("random"),
        StepDescription::new("nope"),
    ];
    let err = reg.check(&steps).unwrap_err();
    assert!(err.to_string().contains("step 2"));
}

#[test]
fn third_party_types_can_be_registered_at_runtime() {
    let mut reg = PhaseRegistry::default();
    assert!(!reg.contains("sparkle"));
    reg.register("sparkle", |_step, _ctx| {
        Ok(Box::new(Sparkle { elapsed: 0.0 }) as Box<dyn Phase>)
    });
    assert!(reg.contains("sparkle"));
    assert!(reg.names().contains(&"sparkle"));

    let mut phase = reg
        .build(&StepDescription::new("sparkle"), &PhaseCtx::new(100.0, 10.0))
        .unwrap();
    assert!(!phase.advance(50.0).unwrap());
    assert!(phase.advance(50.0).unwrap());
    assert_eq!(phase.state().text, "*");
}

#[test]
fn random_only_picks_animated_types() {
    let mut reg = PhaseRegistry::with_builtins(11);
    // Replace every animated type with a marker so the pick is observable.
    for name in builtin::ANIMATED {
        let marker = name.to_string();
        reg.register(*name, move |_step, _ctx| {
            let m = marker.clone();
            Ok(Box::new(Marker(m)) as Box<dyn Phase>)
        });
    }

    let mut picked = std::collections::HashSet::new();
    for _ in 0..300 {
        let phase = reg
            .build(&StepDescription::new(RANDOM), &PhaseCtx::new(100.0, 10.0))
            .unwrap();
        picked.insert(phase.state().text);
    }
    assert!(picked.len() > 5);
    for p in &picked {
        assert!(builtin::ANIMATED.contains(&p.as_str()), "{p}");
    }
}

#[test]
fn random_is_deterministic_per_seed() {
    let pick = |seed| {
        let mut reg = PhaseRegistry::with_builtins(seed);
        (0..10)
            .map(|_| {
                let step = StepDescription::new(RANDOM).with_text("ABC");
                reg.build(&step, &PhaseCtx::new(100.0, 30.0))
                    .unwrap()
                    .state()
                    .offset_x
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(pick(5), pick(5));
}

#[test]
fn random_without_animated_types_fails() {
    let mut reg = PhaseRegistry::empty(1);
    assert!(
        reg.build(&StepDescription::new(RANDOM), &PhaseCtx::new(1.0, 1.0))
            .is_err()
    );
}

struct Marker(String);

impl Phase for Marker {
    fn advance(&mut self, _delta_ms: f64) -> SignResult<bool> {
        Ok(true)
    }

    fn state(&self) -> RenderState {
        RenderState {
            text: self.0.clone(),
            offset_x: 0.0,
            offset_y: 0.0,
            opacity: 1.0,
            visible: true,
            colors: vec!["#ffffff".to_owned(); self.0.chars().count()],
            progress: 1.0,
            stripe_direction: None,
            wipe_progress: None,
            background: None,
        }
    }
}
