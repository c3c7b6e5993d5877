/*!
 * Error types for the subcustomizer library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the host media-player environment
#[derive(Error, Debug)]
pub enum HostError {
    /// The requested setting does not exist
    #[error("Unable to get setting {0}")]
    SettingNotFound(String),

    /// The setting exists but its value cannot be coerced to the expected type
    #[error("Invalid value for setting {name}: {value}")]
    InvalidSetting {
        /// Setting name
        name: String,
        /// Raw value as reported by the host
        value: String,
    },

    /// The host could not answer the query at all
    #[error("Host query failed: {0}")]
    Unavailable(String),
}

/// Recoverable outcomes of subtitle resolution
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubtitleError {
    /// No video is playing or subtitles are switched off
    #[error("No video is playing or subtitles are disabled")]
    NotPlayingOrDisabled,

    /// No file in the listing matches the playing video and language
    #[error("No subtitle found for '{base}' (language: '{language}')")]
    NotFound {
        /// Video file name without extension
        base: String,
        /// Requested language code, possibly empty
        language: String,
    },
}

/// Errors while building or embedding a provenance marker
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProvenanceError {
    /// Tool identity is empty or spans several lines
    #[error("Invalid tool identity: {0:?}")]
    InvalidToolIdentity(String),

    /// Original path cannot be embedded on a single marker line
    #[error("Invalid original path for marker: {0:?}")]
    InvalidOriginalPath(String),
}

/// Errors reported by the subtitle codec
#[derive(Error, Debug)]
pub enum CodecError {
    /// Source could not be read or parsed
    #[error("Failed to decode {path:?}: {message}")]
    Decode {
        path: PathBuf,
        message: String,
    },

    /// Document could not be serialized or written
    #[error("Failed to encode {path:?}: {message}")]
    Encode {
        path: PathBuf,
        message: String,
    },
}

/// Main library error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the host environment
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Error from subtitle resolution
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from provenance handling
    #[error("Provenance error: {0}")]
    Provenance(#[from] ProvenanceError),

    /// Error from the codec
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Whether the error only means "nothing to show" rather than a failure
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Subtitle(_))
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
