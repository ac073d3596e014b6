pub mod models;

pub use models::*;

use crate::services::fs_utils::file_utils::atomic_write;
use crate::types::errors::AnalysisError;
use chrono_tz::Tz;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const CONFIG_FILE: &str = "config.json";

/// Settings persisted as `config.json` inside the data directory.
pub struct ConfigService {
    data_dir: PathBuf,
    config_path: PathBuf,
    status: ConfigStatus,
    settings: Mutex<AppSettings>,
}

impl ConfigService {
    /// Load settings from `data_dir`. Never fails: a missing or unreadable
    /// file yields defaults and the matching [`ConfigStatus`].
    pub fn load(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let config_path = data_dir.join(CONFIG_FILE);
        let (settings, status) = Self::read_settings(&config_path);

        Self {
            data_dir,
            config_path,
            status,
            settings: Mutex::new(settings),
        }
    }

    fn read_settings(path: &Path) -> (AppSettings, ConfigStatus) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return (AppSettings::default(), ConfigStatus::FreshInstall);
            }
            Err(e) => {
                log::error!("Failed to read config {}: {e}", path.display());
                return (AppSettings::default(), ConfigStatus::CorruptConfig);
            }
        };

        match serde_json::from_str::<AppSettings>(&text) {
            Ok(settings) => (settings, ConfigStatus::HasConfig),
            Err(e) => {
                log::warn!("Config {} is corrupt, using defaults: {e}", path.display());
                (AppSettings::default(), ConfigStatus::CorruptConfig)
            }
        }
    }

    pub fn status(&self) -> ConfigStatus {
        self.status
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn get_settings(&self) -> AppSettings {
        self.settings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn save_settings(&self, new_settings: AppSettings) -> Result<(), AnalysisError> {
        parse_timezone(&new_settings.timezone)?;

        let json = serde_json::to_string_pretty(&new_settings)
            .map_err(|e| AnalysisError::Config(e.to_string()))?;
        atomic_write(&self.config_path, &json)?;

        *self
            .settings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = new_settings;
        Ok(())
    }

    /// Configured timezone, or `Europe/Rome` when the stored name is unknown.
    pub fn timezone(&self) -> Tz {
        let name = self.get_settings().timezone;
        parse_timezone(&name).unwrap_or_else(|e| {
            log::warn!("{e}; using {DEFAULT_TIMEZONE}");
            chrono_tz::Europe::Rome
        })
    }

    /// Where the history lives: the configured override, else the data directory.
    pub fn history_dir(&self) -> PathBuf {
        self.get_settings()
            .history_dir
            .unwrap_or_else(|| self.data_dir.clone())
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, AnalysisError> {
    name.parse::<Tz>()
        .map_err(|_| AnalysisError::Config(format!("Unknown timezone: {name}")))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
