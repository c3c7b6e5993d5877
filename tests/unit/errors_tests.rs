/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use subcustomizer::errors::{AppError, CodecError, HostError, ProvenanceError, SubtitleError};

#[test]
fn test_subtitle_error_display_shouldNameBaseAndLanguage() {
    let error = SubtitleError::NotFound {
        base: "Movie".to_string(),
        language: "eng".to_string(),
    };
    assert_eq!(error.to_string(), "No subtitle found for 'Movie' (language: 'eng')");
}

#[test]
fn test_app_error_from_wrappedErrors_shouldPrefixCategory() {
    let host: AppError = HostError::SettingNotFound("font_size".to_string()).into();
    assert_eq!(host.to_string(), "Host error: Unable to get setting font_size");

    let codec: AppError = CodecError::Decode {
        path: PathBuf::from("a.srt"),
        message: "bad timing".to_string(),
    }
    .into();
    assert_eq!(codec.to_string(), "Codec error: Failed to decode \"a.srt\": bad timing");

    let provenance: AppError = ProvenanceError::InvalidToolIdentity(String::new()).into();
    assert!(provenance.to_string().starts_with("Provenance error:"));
}

#[test]
fn test_app_error_from_anyhow_shouldKeepContextChain() {
    let error = anyhow::anyhow!("root cause").context("outer");
    let app: AppError = error.into();

    assert_eq!(app.to_string(), "Unknown error: outer: root cause");
}

#[test]
fn test_app_error_from_io_shouldBeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let app: AppError = io.into();

    assert!(matches!(app, AppError::File(ref message) if message == "gone"));
}

#[test]
fn test_is_recoverable_withSubtitleErrorsOnly_shouldReturnTrue() {
    assert!(AppError::from(SubtitleError::NotPlayingOrDisabled).is_recoverable());
    assert!(!AppError::from(HostError::Unavailable("down".to_string())).is_recoverable());
    assert!(!AppError::File("disk full".to_string()).is_recoverable());
}
