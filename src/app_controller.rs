use anyhow::Context;
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use url::form_urlencoded;

use crate::app_config::{Config, StyleConfiguration};
use crate::document::SubtitleCodec;
use crate::errors::{AppError, HostError};
use crate::file_utils::FileManager;
use crate::host::{self, PlaybackContextProvider, SettingsProvider};
use crate::language_utils;
use crate::locator::{PlaybackContext, SubtitleLocator};
use crate::pipeline::ConversionPipeline;

// @module: Add-on shell around the conversion pipeline

/// Host setting selecting where the player stores subtitles
pub const STORAGE_MODE_SETTING: &str = "subtitles.storagemode";

/// Host setting with the custom subtitle folder
pub const CUSTOM_PATH_SETTING: &str = "subtitles.custompath";

/// Host setting forcing the player's own fonts over ASS styles
pub const OVERRIDE_ASS_FONTS_SETTING: &str = "subtitles.overrideassfonts";

/// Storage mode value meaning "use the custom folder"
const STORAGE_MODE_CUSTOM: i64 = 1;

/// What selecting a listed subtitle does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Hand the file to the player unchanged
    Download,
    /// Restyle the file and hand over the derivative
    Convert,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Download => "Download",
            Self::Convert => "Convert",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Download => write!(f, "download"),
            Self::Convert => write!(f, "convert"),
        }
    }
}

/// Selectable entry offered to the host UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleAction {
    pub kind: ActionKind,
    pub path: PathBuf,
    pub language_code: String,
    /// English language name, falls back to the code
    pub language_name: String,
    pub label: String,
}

impl SubtitleAction {
    /// `plugin://<id>/?action=..&path=..&language=..` URL invoking this action
    pub fn plugin_url(&self, addon_id: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("action", &self.kind.to_string())
            .append_pair("path", &self.path.to_string_lossy())
            .append_pair("language", &self.language_code)
            .finish();
        format!("plugin://{}/?{}", addon_id, query)
    }
}

/// Main controller answering the add-on's search and convert requests
pub struct Controller<'a> {
    // @field: Library configuration
    config: Config,

    // @field: Pipeline writing into the private subtitles directory
    pipeline: ConversionPipeline<'a>,
}

impl<'a> Controller<'a> {
    /// Create a controller, creating the private subtitles directory if needed
    pub fn with_config(config: Config, codec: &'a dyn SubtitleCodec) -> Result<Self, AppError> {
        let tool = config.tool_identity()?;
        let subtitles_dir = config.subtitles_dir();
        FileManager::ensure_dir(&subtitles_dir).map_err(|e| AppError::File(format!("{:#}", e)))?;

        Ok(Self {
            pipeline: ConversionPipeline::new(tool, subtitles_dir, codec),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pipeline(&self) -> &ConversionPipeline<'a> {
        &self.pipeline
    }

    /// Folder the player keeps the current video's subtitles in
    pub fn subtitle_folder(
        &self,
        player: &dyn PlaybackContextProvider,
        settings: &dyn SettingsProvider,
        context: &PlaybackContext,
    ) -> Result<PathBuf, HostError> {
        let mode_value = settings.get_setting(STORAGE_MODE_SETTING)?;
        let mode = host::value_as_i64(STORAGE_MODE_SETTING, &mode_value)?;

        let folder = if mode == STORAGE_MODE_CUSTOM {
            PathBuf::from(host::value_as_string(&settings.get_setting(CUSTOM_PATH_SETTING)?))
        } else {
            context.folder_path.clone()
        };

        if FileManager::dir_exists(&folder) {
            Ok(folder)
        } else {
            debug!("Subtitle folder {:?} does not exist, using temp dir", folder);
            Ok(player.temp_dir())
        }
    }

    fn warn_if_fonts_overridden(&self, settings: &dyn SettingsProvider) -> Result<(), HostError> {
        let value = settings.get_setting(OVERRIDE_ASS_FONTS_SETTING)?;
        if host::value_as_bool(OVERRIDE_ASS_FONTS_SETTING, &value)? {
            warn!("The player overrides ASS fonts; converted styles will not be visible");
        }
        Ok(())
    }

    /// List the download and convert actions for the playing video's subtitle
    ///
    /// Returns an empty list when nothing is playing or no subtitle matches.
    pub fn search(
        &self,
        player: &dyn PlaybackContextProvider,
        settings: &dyn SettingsProvider,
    ) -> Result<Vec<SubtitleAction>, AppError> {
        self.warn_if_fonts_overridden(settings)?;

        let mut context = player.playback_context()?;
        if !context.is_playing_video || !context.subtitles_enabled {
            debug!("No video playing with subtitles enabled");
            return Ok(Vec::new());
        }
        context.folder_path = self.subtitle_folder(player, settings, &context)?;

        let listing = FileManager::list_directory(&context.folder_path)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;

        let resolved = match SubtitleLocator::locate(&context, &listing) {
            Ok(resolved) => resolved,
            Err(e) => {
                info!("{}", e);
                return Ok(Vec::new());
            }
        };
        debug!("Current subtitle path is: {:?}", resolved.path);

        let original = self.pipeline.resolve_original(&resolved.path);
        let copy = self.copy_to_private_dir(&original)?;

        let title = player.player_title()?;
        let language_name = language_utils::get_language_name(&resolved.language_code)
            .unwrap_or_else(|_| resolved.language_code.clone());

        Ok([ActionKind::Download, ActionKind::Convert]
            .into_iter()
            .map(|kind| SubtitleAction {
                kind,
                path: copy.clone(),
                language_code: resolved.language_code.clone(),
                language_name: language_name.clone(),
                label: format!("{} - {}", title, kind.label()),
            })
            .collect())
    }

    fn copy_to_private_dir(&self, original: &Path) -> Result<PathBuf, AppError> {
        let file_name = original
            .file_name()
            .ok_or_else(|| AppError::File(format!("Not a file path: {:?}", original)))?;
        let copy = self.pipeline.output_dir().join(file_name);

        if copy != original {
            FileManager::copy_file(original, &copy)
                .context("Failed to copy subtitle into the add-on profile")
                .map_err(|e| AppError::File(format!("{:#}", e)))?;
        }

        Ok(copy)
    }

    /// Style from the host's add-on settings; every style setting must exist
    pub fn style_configuration(&self, settings: &dyn SettingsProvider) -> Result<StyleConfiguration, HostError> {
        StyleConfiguration::from_settings(settings)
    }

    /// Convert `path` with the current language, frame rate and style settings
    pub fn convert(
        &self,
        player: &dyn PlaybackContextProvider,
        settings: &dyn SettingsProvider,
        path: &Path,
    ) -> Result<PathBuf, AppError> {
        let context = player.playback_context()?;
        let style = self.style_configuration(settings)?;

        self.pipeline
            .convert_file(path, &context.language_code, context.frames_per_second, &style)
    }
}
