/*!
 * Host media-player environment.
 *
 * The library never talks to the player directly. Everything it needs is
 * asked through two narrow capabilities: the playback snapshot and the
 * settings store. `JsonSettings` backs the settings with a JSON file and
 * `InMemoryHost` answers both from fixed values.
 */

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::HostError;
use crate::locator::PlaybackContext;

/// Answers questions about the current playback
pub trait PlaybackContextProvider {
    /// Snapshot of the player state
    fn playback_context(&self) -> Result<PlaybackContext, HostError>;

    /// Title of the playing item, used for labels
    fn player_title(&self) -> Result<String, HostError>;

    /// Scratch directory used when no subtitle folder exists
    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }
}

/// Key/value settings store of the host
pub trait SettingsProvider {
    /// Value of a setting, `SettingNotFound` when the host has none
    fn get_setting(&self, name: &str) -> Result<Value, HostError>;
}

/// String form of a setting value; hosts often store numbers as strings
pub fn value_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn invalid(name: &str, value: &Value) -> HostError {
    HostError::InvalidSetting {
        name: name.to_string(),
        value: value_as_string(value),
    }
}

/// Coerce a setting value to a float
pub fn value_as_f64(name: &str, value: &Value) -> Result<f64, HostError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(name, value)),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid(name, value)),
        _ => Err(invalid(name, value)),
    }
}

/// Coerce a setting value to an integer
pub fn value_as_i64(name: &str, value: &Value) -> Result<i64, HostError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| invalid(name, value)),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid(name, value)),
        Value::Bool(b) => Ok(i64::from(*b)),
        _ => Err(invalid(name, value)),
    }
}

/// Coerce a setting value to a 32-bit integer
pub fn value_as_i32(name: &str, value: &Value) -> Result<i32, HostError> {
    let wide = value_as_i64(name, value)?;
    i32::try_from(wide).map_err(|_| invalid(name, value))
}

/// Coerce a setting value to a boolean
pub fn value_as_bool(name: &str, value: &Value) -> Result<bool, HostError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_i64().is_some_and(|n| n != 0)),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            _ => Err(invalid(name, value)),
        },
        _ => Err(invalid(name, value)),
    }
}

/// Settings backed by a flat JSON object
#[derive(Debug, Clone, Default)]
pub struct JsonSettings {
    values: Map<String, Value>,
}

impl JsonSettings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let values: Map<String, Value> = serde_json::from_str(json)
            .context("Settings must be a JSON object")?;
        Ok(Self { values })
    }

    /// Load settings from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        Self::from_json(&content)
    }
}

impl SettingsProvider for JsonSettings {
    fn get_setting(&self, name: &str) -> Result<Value, HostError> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::SettingNotFound(name.to_string()))
    }
}

/// Host answering every query from fixed values
#[derive(Debug, Clone)]
pub struct InMemoryHost {
    pub context: PlaybackContext,
    pub title: String,
    pub settings: HashMap<String, Value>,
    pub temp_dir: PathBuf,
}

impl InMemoryHost {
    pub fn new(context: PlaybackContext) -> Self {
        Self {
            context,
            title: String::new(),
            settings: HashMap::new(),
            temp_dir: std::env::temp_dir(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_setting(mut self, name: &str, value: Value) -> Self {
        self.settings.insert(name.to_string(), value);
        self
    }

    pub fn with_temp_dir(mut self, dir: PathBuf) -> Self {
        self.temp_dir = dir;
        self
    }
}

impl PlaybackContextProvider for InMemoryHost {
    fn playback_context(&self) -> Result<PlaybackContext, HostError> {
        Ok(self.context.clone())
    }

    fn player_title(&self) -> Result<String, HostError> {
        Ok(self.title.clone())
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone()
    }
}

impl SettingsProvider for InMemoryHost {
    fn get_setting(&self, name: &str) -> Result<Value, HostError> {
        self.settings
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::SettingNotFound(name.to_string()))
    }
}
