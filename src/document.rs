use std::path::Path;

use crate::errors::CodecError;
use crate::style::StyleRecord;

// @module: Structured subtitle document and codec seam

/// Name of the style every event falls back to
pub const DEFAULT_STYLE_NAME: &str = "Default";

// @struct: Single timed subtitle line
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEvent {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Name of the style applied
    pub style: String,

    // @field: Text with inline override tags
    pub text: String,
}

/// Decoded subtitle document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleDocument {
    /// Script info key/value pairs in file order
    pub info: Vec<(String, String)>,

    /// Named styles in file order
    pub styles: Vec<(String, StyleRecord)>,

    pub events: Vec<SubtitleEvent>,
}

impl SubtitleDocument {
    /// Look up a style by name
    pub fn style(&self, name: &str) -> Option<&StyleRecord> {
        self.styles
            .iter()
            .find(|(style_name, _)| style_name == name)
            .map(|(_, record)| record)
    }

    /// The `Default` style, if the document has one
    pub fn default_style(&self) -> Option<&StyleRecord> {
        self.style(DEFAULT_STYLE_NAME)
    }

    /// Replace the `Default` style wholesale, appending it if missing.
    /// Other styles are left untouched.
    pub fn set_default_style(&mut self, record: StyleRecord) {
        match self.styles.iter_mut().find(|(name, _)| name == DEFAULT_STYLE_NAME) {
            Some((_, existing)) => *existing = record,
            None => self.styles.push((DEFAULT_STYLE_NAME.to_string(), record)),
        }
    }
}

/// Subtitle parser/serializer supplied by the embedding application
pub trait SubtitleCodec {
    /// Read and parse `path` using `encoding`
    fn decode(&self, path: &Path, encoding: &str, frames_per_second: f64) -> Result<SubtitleDocument, CodecError>;

    /// Serialize `document` to `path`; `header_notice` must be written as the
    /// first comment line of the output
    fn encode(
        &self,
        document: &SubtitleDocument,
        path: &Path,
        encoding: &str,
        frames_per_second: f64,
        header_notice: &str,
    ) -> Result<(), CodecError>;
}
