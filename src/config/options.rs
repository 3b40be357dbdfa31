use crate::{
    color::{palette::Palette, resolve::ColorSpec},
    foundation::error::{SignError, SignResult},
    render::{DisplayMode, RenderConfig, Wheel},
};

use super::preset::{HardwarePreset, preset};

/// User-facing theme and behavior bag. Every field is optional; unset fields fall back
/// to the preset, then to built-in defaults.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DisplayMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cols: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_animation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_transition: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheel: Option<Wheel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_color: Option<String>,
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    pub looping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

macro_rules! overlay {
    ($base:expr, $top:expr; $($field:ident),+ $(,)?) => {
        SignOptions {
            $($field: $top.$field.clone().or_else(|| $base.$field.clone()),)+
        }
    };
}

impl SignOptions {
    /// Field-wise overlay: values set in `top` win.
    pub fn overlay(&self, top: &SignOptions) -> SignOptions {
        overlay!(self, top;
            preset, mode, width, char_width, rows, cols, dot_pitch, glow, flip_animation,
            flip_speed, dot_transition, cells, stagger, flip_duration, wheel, palette,
            color, background, off_color, looping, max_fps, seed,
        )
    }

    /// Merge these options under their preset and produce the runtime settings.
    ///
    /// A preset's forced mode overrides `mode`.
    #[tracing::instrument(skip(self), fields(preset = ?self.preset))]
    pub fn resolve(&self) -> SignResult<ResolvedOptions> {
        let hw: Option<HardwarePreset> = match self.preset.as_deref() {
            None => None,
            Some(name) => Some(preset(name).ok_or_else(|| {
                SignError::config(format!("unknown hardware preset '{name}'"))
            })?),
        };
        let merged = match &hw {
            Some(p) => p.defaults().overlay(self),
            None => self.clone(),
        };

        let mut mode = merged.mode.unwrap_or_default();
        if let Some(forced) = hw.as_ref().and_then(|p| p.forced_mode) {
            if merged.mode.is_some_and(|m| m != forced) {
                tracing::debug!(?forced, requested = ?merged.mode, "preset forces display mode");
            }
            mode = forced;
        }

        let d = RenderConfig::default();
        let render = RenderConfig {
            mode,
            width: merged.width.unwrap_or(d.width),
            char_width: merged.char_width.unwrap_or(d.char_width),
            rows: merged.rows.unwrap_or(d.rows),
            cols: merged.cols.unwrap_or(d.cols),
            dot_pitch: merged.dot_pitch.unwrap_or(d.dot_pitch),
            glow: merged.glow.unwrap_or(d.glow),
            flip_animation: merged.flip_animation.unwrap_or(d.flip_animation),
            flip_speed: merged.flip_speed.unwrap_or(d.flip_speed),
            dot_transition: merged.dot_transition.unwrap_or(d.dot_transition),
            cells: merged.cells.unwrap_or(d.cells),
            stagger: merged.stagger.unwrap_or(d.stagger),
            flip_duration: merged.flip_duration.unwrap_or(d.flip_duration),
            wheel: merged.wheel.clone().unwrap_or(d.wheel),
            background: merged.background.clone().unwrap_or(d.background),
            off_color: merged.off_color.clone().unwrap_or(d.off_color),
        };
        render.validate()?;

        let palette = merged
            .palette
            .as_ref()
            .map(|p| Palette::new(p.iter().map(String::as_str)))
            .filter(|p| !p.is_empty());

        Ok(ResolvedOptions {
            render,
            palette,
            color: merged.color.clone(),
            looping: merged.looping.unwrap_or(false),
            max_fps: merged.max_fps,
            seed: merged.seed,
        })
    }
}

/// Options after preset merging and defaulting.
#[derive(Clone, Debug)]
pub struct ResolvedOptions {
    pub render: RenderConfig,
    pub palette: Option<Palette>,
    pub color: Option<ColorSpec>,
    pub looping: bool,
    pub max_fps: Option<f64>,
    pub seed: Option<u64>,
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
