use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::app_config::StyleConfiguration;
use crate::document::SubtitleCodec;
use crate::encoding::EncodingResolver;
use crate::errors::{AppError, CodecError};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::locator::{DirectoryEntry, PlaybackContext, SubtitleLocator};
use crate::provenance::{self, DERIVATIVE_EXTENSION, LineReader, LossyFileReader, ProvenanceMarker, ToolIdentity};
use crate::style::StyleMapper;

// @module: Locate, retarget, restyle and re-emit a subtitle

/// Produces restyled derivatives of the playing video's subtitle
pub struct ConversionPipeline<'a> {
    tool: ToolIdentity,
    output_dir: PathBuf,
    codec: &'a dyn SubtitleCodec,
    reader: Box<dyn LineReader + 'a>,
    encodings: EncodingResolver,
}

impl<'a> ConversionPipeline<'a> {
    /// Create a pipeline writing derivatives into `output_dir`
    pub fn new(tool: ToolIdentity, output_dir: PathBuf, codec: &'a dyn SubtitleCodec) -> Self {
        Self {
            tool,
            output_dir,
            codec,
            reader: Box::new(LossyFileReader),
            encodings: EncodingResolver::new(),
        }
    }

    /// Replace the reader used to scan for provenance markers
    pub fn with_reader(mut self, reader: Box<dyn LineReader + 'a>) -> Self {
        self.reader = reader;
        self
    }

    /// Replace the encoding resolver
    pub fn with_encodings(mut self, encodings: EncodingResolver) -> Self {
        self.encodings = encodings;
        self
    }

    pub fn tool(&self) -> &ToolIdentity {
        &self.tool
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the derivative of `original` is written
    pub fn derivative_path(&self, original: &Path) -> PathBuf {
        FileManager::derivative_path(original, &self.output_dir, self.tool.name(), DERIVATIVE_EXTENSION)
    }

    /// Original behind `path`, following this tool's provenance marker
    pub fn resolve_original(&self, path: &Path) -> PathBuf {
        provenance::resolve_original(path, &self.tool, self.reader.as_ref())
    }

    /// Encoding for subtitles in the given language
    pub fn encoding_for(&self, language_code: &str) -> String {
        self.encodings.resolve(&language_utils::to_part1(language_code))
    }

    /// Locate the playing video's subtitle in `listing` and convert it
    pub fn convert(
        &self,
        context: &PlaybackContext,
        listing: &[DirectoryEntry],
        config: &StyleConfiguration,
    ) -> Result<PathBuf, AppError> {
        let resolved = SubtitleLocator::locate(context, listing)?;
        debug!("Current subtitle path is: {:?}", resolved.path);

        let original = self.resolve_original(&resolved.path);
        self.convert_original(&original, &context.language_code, context.frames_per_second, config)
    }

    /// Convert an explicit subtitle file, retargeting it first if it is a derivative
    pub fn convert_file(
        &self,
        path: &Path,
        language_code: &str,
        frames_per_second: f64,
        config: &StyleConfiguration,
    ) -> Result<PathBuf, AppError> {
        let original = self.resolve_original(path);
        self.convert_original(&original, language_code, frames_per_second, config)
    }

    fn convert_original(
        &self,
        original: &Path,
        language_code: &str,
        frames_per_second: f64,
        config: &StyleConfiguration,
    ) -> Result<PathBuf, AppError> {
        let marker = ProvenanceMarker::new(&self.tool, original)?;
        let encoding = self.encoding_for(language_code);
        debug!("Decoding {:?} as {} at {} fps", original, encoding, frames_per_second);

        let mut document = self.codec.decode(original, &encoding, frames_per_second)?;
        document.set_default_style(StyleMapper::apply(config));

        let derivative = self.derivative_path(original);
        let temp = FileManager::temp_file_in(&self.output_dir, &format!(".{}", DERIVATIVE_EXTENSION))
            .map_err(|e| AppError::File(format!("{:#}", e)))?;

        // The temporary file is deleted on drop if encoding fails
        self.codec
            .encode(&document, temp.path(), &encoding, frames_per_second, &marker.format())?;

        FileManager::persist(temp, &derivative).map_err(|e| CodecError::Encode {
            path: derivative.clone(),
            message: format!("{:#}", e),
        })?;

        info!("Converted subtitle written to {:?}", derivative);
        Ok(derivative)
    }
}
