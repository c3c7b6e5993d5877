use chrono::{DateTime, Utc};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::errors::SubtitleError;
use crate::language_utils;

// @module: Subtitle file lookup for the playing video

/// Subtitle extensions the codec family can read
pub const SUBTITLE_EXTENSIONS: &[&str] = &[".srt", ".ass", ".ssa", ".sub", ".json", ".txt", ".vtt"];

// @const: Language-tagged suffix, e.g. ".eng.srt", "-fre.forced.ass"
static TAGGED_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[.-]([^.-]*)([.-]forced)?\.([^.]+)$").unwrap()
});

// @const: Bare suffix, only a subtitle extension
static BARE_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    let alternatives = SUBTITLE_EXTENSIONS
        .iter()
        .map(|ext| regex::escape(ext))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^(?:{})$", alternatives)).unwrap()
});

/// Snapshot of the player state for one resolution request
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackContext {
    pub is_playing_video: bool,
    pub subtitles_enabled: bool,
    /// ISO 639-2/B code of the active subtitle, empty when unknown
    pub language_code: String,
    pub folder_path: PathBuf,
    pub file_name: String,
    pub frames_per_second: f64,
}

/// One file of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub modified_at: DateTime<Utc>,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, modified_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            modified_at,
        }
    }
}

/// Subtitle file chosen for the playing video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSubtitle {
    pub path: PathBuf,
    pub language_code: String,
}

/// Classification of the part of a file name that follows the video's base name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuffixKind {
    /// Carries a language tag and optionally a forced flag
    Tagged {
        language_tag: String,
        forced: bool,
        extension: String,
    },
    /// Only a recognized subtitle extension
    Bare,
}

/// Classify a file name suffix, `None` when it is neither tagged nor bare
pub fn classify_suffix(suffix: &str) -> Option<SuffixKind> {
    if let Some(caps) = TAGGED_SUFFIX_REGEX.captures(suffix) {
        return Some(SuffixKind::Tagged {
            language_tag: caps[1].to_string(),
            forced: caps.get(2).is_some(),
            extension: caps[3].to_string(),
        });
    }

    if BARE_SUFFIX_REGEX.is_match(suffix) {
        return Some(SuffixKind::Bare);
    }

    None
}

/// Video file name with its extension stripped
fn base_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Whether a suffix qualifies for the requested language
fn qualifies(kind: &SuffixKind, language_code: &str) -> bool {
    match kind {
        // The forced flag never influences selection
        SuffixKind::Tagged { language_tag, .. } => {
            !language_code.is_empty()
                && language_utils::normalize_to_part2b(language_tag)
                    .is_ok_and(|normalized| normalized == language_code)
        }
        SuffixKind::Bare => language_code.is_empty(),
    }
}

/// Finds the subtitle file that belongs to the playing video
pub struct SubtitleLocator;

impl SubtitleLocator {
    /// Pick the newest qualifying entry of `listing`
    ///
    /// Entries are scanned in the order given; on equal modification times
    /// the first one wins, so the result is only as stable as that order.
    pub fn locate(context: &PlaybackContext, listing: &[DirectoryEntry]) -> Result<ResolvedSubtitle, SubtitleError> {
        if !context.is_playing_video || !context.subtitles_enabled {
            return Err(SubtitleError::NotPlayingOrDisabled);
        }

        let base = base_name(&context.file_name);
        let language_code = context.language_code.as_str();

        let mut best: Option<&DirectoryEntry> = None;
        for entry in listing {
            let Some(suffix) = entry.name.strip_prefix(base.as_str()) else {
                continue;
            };

            let Some(kind) = classify_suffix(suffix) else {
                continue;
            };

            if !qualifies(&kind, language_code) {
                continue;
            }

            debug!("Subtitle candidate: {} ({})", entry.name, entry.modified_at);
            match best {
                Some(current) if entry.modified_at <= current.modified_at => {}
                _ => best = Some(entry),
            }
        }

        let chosen = best.ok_or_else(|| SubtitleError::NotFound {
            base: base.clone(),
            language: language_code.to_string(),
        })?;

        Ok(ResolvedSubtitle {
            path: context.folder_path.join(&chosen.name),
            language_code: context.language_code.clone(),
        })
    }
}
