use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::{HostError, ProvenanceError};
use crate::file_utils::FileManager;
use crate::host::{self, SettingsProvider};
use crate::provenance::ToolIdentity;

/// Application configuration module
/// This module handles the library configuration including loading,
/// validating and saving configuration settings, and reading the user's
/// style options from the host's settings store.
/// Represents the library configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Add-on identity and storage
    #[serde(default)]
    pub addon: AddonConfig,

    /// Default style, the base for `StyleConfiguration::merged_with_settings`
    #[serde(default)]
    pub style: StyleConfiguration,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Add-on identity and private storage location
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AddonConfig {
    /// Display name, embedded in markers and derivative file names
    #[serde(default = "default_addon_name")]
    pub name: String,

    /// Add-on id, used for plugin URLs
    #[serde(default = "default_addon_id")]
    pub id: String,

    /// Profile directory; derivatives go to its `subtitles` subdirectory
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            name: default_addon_name(),
            id: default_addon_id(),
            profile_dir: None,
        }
    }
}

/// Font face selection
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontChoice {
    #[default]
    Default,
    Alternate,
}

impl FontChoice {
    /// Parse the host's raw option value, "1" selects the alternate face
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "1" => Self::Alternate,
            _ => Self::Default,
        }
    }
}

/// Border rendering selection
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyleChoice {
    #[default]
    Outline,
    Box,
}

impl BorderStyleChoice {
    /// Parse the host's raw option value, anything but "0" is a box
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "0" => Self::Outline,
            _ => Self::Box,
        }
    }
}

/// Vertical placement of subtitle text
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    #[default]
    Bottom = 0,
    Middle = 1,
    Top = 2,
}

impl TryFrom<i64> for VerticalAlignment {
    type Error = i64;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Bottom),
            1 => Ok(Self::Middle),
            2 => Ok(Self::Top),
            other => Err(other),
        }
    }
}

/// Horizontal placement of subtitle text
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    Left = 0,
    #[default]
    Center = 1,
    Right = 2,
}

impl TryFrom<i64> for HorizontalAlignment {
    type Error = i64;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Left),
            1 => Ok(Self::Center),
            2 => Ok(Self::Right),
            other => Err(other),
        }
    }
}

/// User-chosen style options applied to converted subtitles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StyleConfiguration {
    #[serde(default)]
    pub font: FontChoice,

    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Palette indices (0-4) for the five colour channels
    #[serde(default = "default_primary_color")]
    pub primary_color: u8,
    #[serde(default = "default_primary_color")]
    pub secondary_color: u8,
    #[serde(default)]
    pub tertiary_color: u8,
    #[serde(default)]
    pub outline_color: u8,
    #[serde(default)]
    pub back_color: u8,

    #[serde(default)]
    pub border_style: BorderStyleChoice,

    #[serde(default = "default_outline_width")]
    pub outline_width: f64,

    #[serde(default)]
    pub shadow_width: f64,

    #[serde(default)]
    pub vertical_alignment: VerticalAlignment,

    #[serde(default)]
    pub horizontal_alignment: HorizontalAlignment,

    #[serde(default = "default_margin")]
    pub margin_left: i32,
    #[serde(default = "default_margin")]
    pub margin_right: i32,
    #[serde(default = "default_margin")]
    pub margin_vertical: i32,
}

impl Default for StyleConfiguration {
    fn default() -> Self {
        Self {
            font: FontChoice::default(),
            font_size: default_font_size(),
            primary_color: default_primary_color(),
            secondary_color: default_primary_color(),
            tertiary_color: 0,
            outline_color: 0,
            back_color: 0,
            border_style: BorderStyleChoice::default(),
            outline_width: default_outline_width(),
            shadow_width: 0.0,
            vertical_alignment: VerticalAlignment::default(),
            horizontal_alignment: HorizontalAlignment::default(),
            margin_left: default_margin(),
            margin_right: default_margin(),
            margin_vertical: default_margin(),
        }
    }
}

/// Read a setting; a missing one is `None` unless it is required
fn lookup(settings: &dyn SettingsProvider, required: bool, name: &str) -> std::result::Result<Option<Value>, HostError> {
    match settings.get_setting(name) {
        Ok(value) => Ok(Some(value)),
        Err(HostError::SettingNotFound(_)) if !required => Ok(None),
        Err(e) => Err(e),
    }
}

/// Palette index of a colour setting
///
/// Anything that is not an index (empty, text, negative, too large) maps to
/// an index outside the palette, i.e. the fallback colour.
fn palette_index(name: &str, value: &Value) -> u8 {
    host::value_as_i64(name, value)
        .ok()
        .and_then(|index| u8::try_from(index).ok())
        .unwrap_or(u8::MAX)
}

impl StyleConfiguration {
    /// Read the style from the host's add-on settings
    ///
    /// Every style setting must exist: a missing one is `SettingNotFound` and
    /// a malformed number is `InvalidSetting`. Colour settings never fail.
    pub fn from_settings(settings: &dyn SettingsProvider) -> std::result::Result<Self, HostError> {
        Self::read_settings(settings, &StyleConfiguration::default(), true)
    }

    /// Read the style from the host's add-on settings, keeping the value from
    /// `defaults` for every setting the host does not know
    pub fn merged_with_settings(settings: &dyn SettingsProvider, defaults: &StyleConfiguration) -> std::result::Result<Self, HostError> {
        Self::read_settings(settings, defaults, false)
    }

    fn read_settings(settings: &dyn SettingsProvider, defaults: &StyleConfiguration, required: bool) -> std::result::Result<Self, HostError> {
        let mut style = defaults.clone();

        if let Some(v) = lookup(settings, required, "font_name")? {
            style.font = FontChoice::from_raw(&host::value_as_string(&v));
        }
        if let Some(v) = lookup(settings, required, "font_size")? {
            style.font_size = host::value_as_f64("font_size", &v)?;
        }
        if let Some(v) = lookup(settings, required, "primary_color")? {
            style.primary_color = palette_index("primary_color", &v);
        }
        if let Some(v) = lookup(settings, required, "secondary_color")? {
            style.secondary_color = palette_index("secondary_color", &v);
        }
        if let Some(v) = lookup(settings, required, "tertiary_color")? {
            style.tertiary_color = palette_index("tertiary_color", &v);
        }
        if let Some(v) = lookup(settings, required, "outline_color")? {
            style.outline_color = palette_index("outline_color", &v);
        }
        if let Some(v) = lookup(settings, required, "back_color")? {
            style.back_color = palette_index("back_color", &v);
        }
        if let Some(v) = lookup(settings, required, "border_style")? {
            style.border_style = BorderStyleChoice::from_raw(&host::value_as_string(&v));
        }
        if let Some(v) = lookup(settings, required, "outline_px")? {
            style.outline_width = host::value_as_f64("outline_px", &v)?;
        }
        if let Some(v) = lookup(settings, required, "shadow_px")? {
            style.shadow_width = host::value_as_f64("shadow_px", &v)?;
        }
        if let Some(v) = lookup(settings, required, "vertical_alignment")? {
            let raw = host::value_as_i64("vertical_alignment", &v)?;
            style.vertical_alignment = VerticalAlignment::try_from(raw).map_err(|_| HostError::InvalidSetting {
                name: "vertical_alignment".to_string(),
                value: raw.to_string(),
            })?;
        }
        if let Some(v) = lookup(settings, required, "horizontal_alignment")? {
            let raw = host::value_as_i64("horizontal_alignment", &v)?;
            style.horizontal_alignment = HorizontalAlignment::try_from(raw).map_err(|_| HostError::InvalidSetting {
                name: "horizontal_alignment".to_string(),
                value: raw.to_string(),
            })?;
        }
        if let Some(v) = lookup(settings, required, "margin_l")? {
            style.margin_left = host::value_as_i32("margin_l", &v)?;
        }
        if let Some(v) = lookup(settings, required, "margin_r")? {
            style.margin_right = host::value_as_i32("margin_r", &v)?;
        }
        if let Some(v) = lookup(settings, required, "margin_v")? {
            style.margin_vertical = host::value_as_i32("margin_v", &v)?;
        }

        Ok(style)
    }

    /// Validate value ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.font_size > 0.0) {
            return Err(anyhow!("Font size must be positive, got {}", self.font_size));
        }
        if !(self.outline_width >= 0.0) {
            return Err(anyhow!("Outline width must not be negative, got {}", self.outline_width));
        }
        if !(self.shadow_width >= 0.0) {
            return Err(anyhow!("Shadow width must not be negative, got {}", self.shadow_width));
        }

        let colors = [
            ("primary", self.primary_color),
            ("secondary", self.secondary_color),
            ("tertiary", self.tertiary_color),
            ("outline", self.outline_color),
            ("back", self.back_color),
        ];
        for (channel, index) in colors {
            if usize::from(index) >= crate::style::PALETTE.len() {
                return Err(anyhow!("Unknown {} colour index: {}", channel, index));
            }
        }

        Ok(())
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_addon_name() -> String {
    "Subtitles Customizer".to_string()
}

fn default_addon_id() -> String {
    "service.subtitles.customizer".to_string()
}

fn default_font_size() -> f64 {
    28.0
}

fn default_primary_color() -> u8 {
    1 // white
}

fn default_outline_width() -> f64 {
    2.0
}

fn default_margin() -> i32 {
    20
}

impl Config {
    /// Load the configuration from a JSON file, writing defaults if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        FileManager::write_atomically(path, &config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.tool_identity()?;
        self.style.validate().context("Invalid default style")?;
        Ok(())
    }

    /// Identity used for markers and plugin URLs
    pub fn tool_identity(&self) -> std::result::Result<ToolIdentity, ProvenanceError> {
        ToolIdentity::new(&self.addon.name, &self.addon.id)
    }

    /// Profile directory, the platform data directory when not configured
    pub fn profile_dir(&self) -> PathBuf {
        match &self.addon.profile_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(&self.addon.id),
        }
    }

    /// Private directory holding copies and derivatives
    pub fn subtitles_dir(&self) -> PathBuf {
        self.profile_dir().join("subtitles")
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            addon: AddonConfig::default(),
            style: StyleConfiguration::default(),
            log_level: LogLevel::default(),
        }
    }
}
