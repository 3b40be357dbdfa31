//! Live-control messages.
//!
//! Transports (sockets, polling) are outside this crate; they decode a
//! [`ControlMessage`] and hand it to [`Controller::apply`](super::Controller::apply).

use std::collections::BTreeMap;

use crate::{
    color::resolve::ColorSpec,
    config::SignOptions,
    foundation::error::{SignError, SignResult},
    phase::StepDescription,
    render::StuckState,
};

use super::Status;

/// Inbound control action, tagged by `action`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ControlMessage {
    /// Replace the sequence (and optionally the theme), then play.
    Sequence {
        sequence: Vec<StepDescription>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<SignOptions>,
    },
    /// Show static text, replacing the sequence.
    SetText {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phase: Option<String>,
    },
    Play,
    Pause,
    Stop,
    /// Rebuild the display with these options layered over the current ones.
    SetTheme {
        #[serde(flatten)]
        options: SignOptions,
    },
    SetColor {
        color: ColorSpec,
    },
    /// Dot index (as a string key) to forced state.
    SetStuckTiles {
        tiles: BTreeMap<String, StuckState>,
    },
    /// Update options in place; rebuilds the display only if its geometry changed.
    Config {
        #[serde(flatten)]
        options: SignOptions,
    },
    TokenUpdate {
        tokens: BTreeMap<String, String>,
    },
    GetStatus,
}

impl ControlMessage {
    pub fn from_json(s: &str) -> SignResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::Sequence { .. } => "sequence",
            Self::SetText { .. } => "setText",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::SetTheme { .. } => "setTheme",
            Self::SetColor { .. } => "setColor",
            Self::SetStuckTiles { .. } => "setStuckTiles",
            Self::Config { .. } => "config",
            Self::TokenUpdate { .. } => "tokenUpdate",
            Self::GetStatus => "getStatus",
        }
    }
}

/// Outcome of an applied [`ControlMessage`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "reply", rename_all = "camelCase")]
pub enum ControlReply {
    Ok,
    Status(Status),
}

pub(crate) fn parse_tiles(
    tiles: BTreeMap<String, StuckState>,
) -> SignResult<BTreeMap<usize, StuckState>> {
    tiles
        .into_iter()
        .map(|(k, v)| {
            k.trim()
                .parse::<usize>()
                .map(|i| (i, v))
                .map_err(|_| SignError::config(format!("stuck tile index '{k}' is not a dot index")))
        })
        .collect()
}

/// Substitutes token values into step text.
///
/// Token syntax is up to the implementation; the controller only decides when to call
/// it (steps marked `liveTokens`, whenever token values change).
pub trait TokenResolver {
    fn resolve(&self, text: &str, tokens: &BTreeMap<String, String>) -> String;
}

impl<F> TokenResolver for F
where
    F: Fn(&str, &BTreeMap<String, String>) -> String,
{
    fn resolve(&self, text: &str, tokens: &BTreeMap<String, String>) -> String {
        self(text, tokens)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/protocol.rs"]
mod tests;
