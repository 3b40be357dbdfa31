//! Options, hardware presets and the persisted sequence document.

pub mod document;
pub mod options;
pub mod preset;

pub use document::SequenceDocument;
pub use options::{ResolvedOptions, SignOptions};
pub use preset::{HardwarePreset, PRESETS, preset};
