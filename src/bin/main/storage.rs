use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flashquote_core::settings::{PersistedSettings, SettingsStore, is_valid_wpm};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const SETTINGS_DIR: &str = "flashquote";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("settings io: {0}")]
    Io(#[from] io::Error),
    #[error("settings format: {0}")]
    Format(#[from] serde_json::Error),
}

/// On-disk settings document. The rate is stored as a string-encoded integer
/// for compatibility with earlier versions of the reader.
#[derive(Debug, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(rename = "wpmValue")]
    wpm_value: String,
}

pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_location() -> Option<Self> {
        let dir = dirs::config_dir()?;
        Some(Self::new(dir.join(SETTINGS_DIR).join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    type Error = StorageError;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let file: SettingsFile = serde_json::from_str(&raw)?;
        let Ok(wpm) = file.wpm_value.parse::<i64>() else {
            debug!(value = %file.wpm_value, "ignoring unparseable stored rate");
            return Ok(None);
        };

        if !is_valid_wpm(wpm) {
            debug!(value = wpm, "ignoring out-of-range stored rate");
            return Ok(None);
        }

        Ok(Some(PersistedSettings::new(wpm as u16)))
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = SettingsFile {
            wpm_value: settings.wpm.to_string(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}
