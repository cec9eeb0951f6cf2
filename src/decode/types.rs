//! Decoder types
//!
//! Defines the decoder configuration.

use serde::{Deserialize, Serialize};

/// Configuration for decoding gateway responses
///
/// Both switches default to off, which drops untranslatable values and
/// unknown keys entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Keep the raw text of enumerated values missing from their table
    pub retain_untranslated_values: bool,
    /// Keep pairs whose key is not a known gateway field
    pub retain_unknown_fields: bool,
}

impl DecoderConfig {
    /// Create a decoder config with both switches off
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether untranslated raw values are kept
    #[must_use]
    pub fn with_retain_untranslated_values(mut self, retain: bool) -> Self {
        self.retain_untranslated_values = retain;
        self
    }

    /// Set whether unknown keys are kept
    #[must_use]
    pub fn with_retain_unknown_fields(mut self, retain: bool) -> Self {
        self.retain_unknown_fields = retain;
        self
    }
}
