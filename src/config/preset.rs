use crate::render::{DisplayMode, Wheel};

use super::options::SignOptions;

/// Built-in hardware profile: defaults plus an optional forced display mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HardwarePreset {
    pub name: &'static str,
    pub forced_mode: Option<DisplayMode>,
}

pub const PRESETS: &[HardwarePreset] = &[
    HardwarePreset {
        name: "led",
        forced_mode: Some(DisplayMode::Matrix),
    },
    HardwarePreset {
        name: "flipdot",
        forced_mode: Some(DisplayMode::Matrix),
    },
    HardwarePreset {
        name: "bulb",
        forced_mode: Some(DisplayMode::Matrix),
    },
    HardwarePreset {
        name: "splitflap",
        forced_mode: Some(DisplayMode::SplitFlap),
    },
    HardwarePreset {
        name: "splitflap-clock",
        forced_mode: Some(DisplayMode::SplitFlap),
    },
];

pub fn preset(name: &str) -> Option<HardwarePreset> {
    let name = name.trim().to_ascii_lowercase();
    let name = match name.as_str() {
        "flip-dot" => "flipdot",
        "split-flap" => "splitflap",
        "split-flap-clock" => "splitflap-clock",
        other => other,
    };
    PRESETS.iter().copied().find(|p| p.name == name)
}

fn strings(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| (*s).to_owned()).collect())
}

impl HardwarePreset {
    /// Option values this hardware implies; user options are layered on top.
    pub fn defaults(&self) -> SignOptions {
        match self.name {
            "led" => SignOptions {
                rows: Some(7),
                cols: Some(80),
                dot_pitch: Some(6.0),
                glow: Some(true),
                background: Some("#050505".to_owned()),
                off_color: Some("#1c0a05".to_owned()),
                ..SignOptions::default()
            },
            "flipdot" => SignOptions {
                rows: Some(7),
                cols: Some(56),
                dot_pitch: Some(8.0),
                flip_animation: Some(true),
                flip_speed: Some(30.0),
                palette: strings(&["#f2d600", "#ffffff"]),
                background: Some("#0d0d0d".to_owned()),
                off_color: Some("#161616".to_owned()),
                ..SignOptions::default()
            },
            "bulb" => SignOptions {
                rows: Some(7),
                cols: Some(40),
                dot_pitch: Some(12.0),
                glow: Some(true),
                dot_transition: Some(150.0),
                palette: strings(&["#ffd27f", "#ff9933", "#ffffff"]),
                background: Some("#120c06".to_owned()),
                off_color: Some("#2a2118".to_owned()),
                ..SignOptions::default()
            },
            "splitflap" => SignOptions {
                cells: Some(12),
                char_width: Some(30.0),
                stagger: Some(40.0),
                flip_duration: Some(60.0),
                wheel: Some(Wheel::Full),
                palette: strings(&["#f5f5f5", "#ffcc00"]),
                background: Some("#111111".to_owned()),
                ..SignOptions::default()
            },
            "splitflap-clock" => SignOptions {
                cells: Some(5),
                char_width: Some(30.0),
                stagger: Some(60.0),
                flip_duration: Some(80.0),
                wheel: Some(Wheel::Clock),
                palette: strings(&["#f5f5f5"]),
                background: Some("#111111".to_owned()),
                ..SignOptions::default()
            },
            _ => SignOptions::default(),
        }
    }
}
