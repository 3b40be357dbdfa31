use std::io::Read;

use crate::{foundation::error::SignResult, phase::StepDescription};

use super::options::SignOptions;

/// Persisted sequence file: `{ "options"?: {...}, "sequence": [...] }`.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SequenceDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<SignOptions>,
    pub sequence: Vec<StepDescription>,
}

impl SequenceDocument {
    pub fn from_json(s: &str) -> SignResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_reader(reader: impl Read) -> SignResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_pretty(&self) -> SignResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn options(&self) -> SignOptions {
        self.options.clone().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/document.rs"]
mod tests;
