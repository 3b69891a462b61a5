/// Application settings
///
/// Read from `settings.json` in the user's config directory:
/// - Linux: ~/.config/feedback-form/settings.json
/// - macOS: ~/Library/Application Support/feedback-form/settings.json
/// - Windows: %APPDATA%\feedback-form\settings.json
///
/// A missing file means defaults. `"form": null` turns the form off.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::form::{FormLayout, UploadLimits};
use crate::media::thumbnail::DEFAULT_THUMBNAIL_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Layout of the form; `None` means the page has no form
    pub form: Option<FormLayout>,
    /// Size cap for a single photo, in bytes
    pub max_file_size: u64,
    /// Accepted media types
    pub allowed_types: Vec<String>,
    /// Edge length of preview thumbnails
    pub thumbnail_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let limits = UploadLimits::default();
        Self {
            form: Some(FormLayout::default()),
            max_file_size: limits.max_file_size,
            allowed_types: limits.allowed_types,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl Settings {
    /// Load settings from the default location
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings = Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("⚙️  Settings loaded from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Where the settings file is expected
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("feedback-form");
        path.push("settings.json");
        Some(path)
    }

    /// Upload limits derived from these settings
    pub fn upload_limits(&self) -> UploadLimits {
        UploadLimits {
            max_file_size: self.max_file_size,
            allowed_types: self.allowed_types.clone(),
        }
    }
}
