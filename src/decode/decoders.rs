//! Response body decoder
//!
//! Turns a `KEY=value` line body into a [`Response`].

use super::tables::{self, Translation};
use super::types::DecoderConfig;
use crate::response::{Attributes, Response};
use tracing::{debug, trace};

/// Decoder for the gateway's line-oriented reply format
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseDecoder {
    config: DecoderConfig,
}

impl ResponseDecoder {
    /// Create a decoder with default (strict) behaviour
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with custom settings
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a full response body
    ///
    /// Never fails: lines without `=` and unknown keys are skipped, and a
    /// body with no recognised pairs yields an empty response.
    pub fn decode(&self, body: &str) -> Response {
        Response::new(self.decode_attributes(body))
    }

    /// Decode a body into the attribute map a response is built from
    pub fn decode_attributes(&self, body: &str) -> Attributes {
        let mut attributes = Attributes::new();

        for (line_num, line) in body.split_inclusive('\n').enumerate() {
            let line = chomp(line);
            let Some((key, value)) = line.split_once('=') else {
                trace!(line = line_num + 1, "Skipping line without '='");
                continue;
            };

            let Some(field) = tables::field_for(key) else {
                if self.config.retain_unknown_fields {
                    trace!(line = line_num + 1, key, "Keeping unrecognised key as extension");
                    attributes.insert_extension(key, value);
                } else {
                    trace!(line = line_num + 1, key, "Skipping unrecognised key");
                }
                continue;
            };

            match tables::translate(field, value) {
                Translation::Raw(v) | Translation::Mapped(v) => attributes.insert(field, Some(v)),
                Translation::Unmapped => {
                    debug!(field = %field, value, "No translation for value, field left absent");
                    attributes.insert(field, None);
                    if self.config.retain_untranslated_values {
                        attributes.insert_untranslated(field, value);
                    }
                }
            }
        }

        debug!(fields = attributes.len(), "Decoded gateway response");
        attributes
    }
}

/// Strip one trailing `\r\n`, `\n` or `\r`
fn chomp(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

/// Decode a body with the default decoder
pub fn decode(body: &str) -> Response {
    ResponseDecoder::new().decode(body)
}
