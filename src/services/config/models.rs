use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TIMEZONE: &str = "Europe/Rome";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Overrides where `statistics.json` and `RawData/` live.
    pub history_dir: Option<PathBuf>,
    /// IANA name used to stamp new snapshots.
    pub timezone: String,
    /// When false, an already recorded export is analyzed again.
    pub skip_duplicates: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            history_dir: None,
            timezone: DEFAULT_TIMEZONE.into(),
            skip_duplicates: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfigStatus {
    FreshInstall,
    HasConfig,
    CorruptConfig,
}
