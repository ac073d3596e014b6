//! Append-only history of analysis runs.
//!
//! Layout under the base directory:
//! - `statistics.json`: `{ "analyses": [..] }`, rewritten atomically on every change
//! - `RawData/followers_<stamp>.txt`, `RawData/following_<stamp>.txt`: one username per line
//!
//! A log that cannot be read or parsed is treated as empty. Before the next
//! write replaces it, the unreadable file is copied to `statistics.json.bak`.

pub mod models;
pub mod stats;

pub use models::{format_timestamp, parse_timestamp, AnalysisSnapshot, HistoryLog};
pub use stats::{HistorySummary, TrendPoint};

use crate::services::fs_utils::file_utils::{atomic_write, backup_file, remove_file_if_exists};
use crate::types::errors::AnalysisError;
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const STATISTICS_FILE: &str = "statistics.json";
pub const RAW_DATA_DIR: &str = "RawData";
const FILE_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Everything needed to record one run, besides its timestamp.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotInput<'a> {
    pub followers: &'a [String],
    pub following: &'a [String],
    pub followers_hash: &'a str,
    pub following_hash: &'a str,
    pub followers_modified: NaiveDateTime,
    pub following_modified: NaiveDateTime,
}

struct LoadedLog {
    log: HistoryLog,
    corrupt: bool,
}

pub struct HistoryStore {
    base_dir: PathBuf,
    raw_dir: PathBuf,
    statistics_path: PathBuf,
    timezone: Tz,
}

impl HistoryStore {
    /// Open (creating if needed) a history rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>, timezone: Tz) -> Result<Self, AnalysisError> {
        let base_dir = base_dir.into();
        let raw_dir = base_dir.join(RAW_DATA_DIR);
        fs::create_dir_all(&raw_dir)?;

        Ok(Self {
            statistics_path: base_dir.join(STATISTICS_FILE),
            base_dir,
            raw_dir,
            timezone,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn raw_data_dir(&self) -> &Path {
        &self.raw_dir
    }

    pub fn statistics_path(&self) -> &Path {
        &self.statistics_path
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Current time in the store's timezone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.timezone).fixed_offset()
    }

    fn read_log(&self) -> LoadedLog {
        let text = match fs::read_to_string(&self.statistics_path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return LoadedLog {
                    log: HistoryLog::default(),
                    corrupt: false,
                };
            }
            Err(e) => {
                log::warn!(
                    "Failed to read {}: {e}. Treating history as empty.",
                    self.statistics_path.display()
                );
                return LoadedLog {
                    log: HistoryLog::default(),
                    corrupt: true,
                };
            }
        };

        match serde_json::from_str::<HistoryLog>(&text) {
            Ok(log) => LoadedLog { log, corrupt: false },
            Err(e) => {
                log::warn!(
                    "History log {} is corrupt: {e}. Treating history as empty.",
                    self.statistics_path.display()
                );
                LoadedLog {
                    log: HistoryLog::default(),
                    corrupt: true,
                }
            }
        }
    }

    fn write_log(&self, loaded: &LoadedLog) -> Result<(), AnalysisError> {
        if loaded.corrupt && self.statistics_path.exists() {
            let backup = backup_file(&self.statistics_path)?;
            log::warn!("Backed up unreadable history log to {}", backup.display());
        }

        let json = serde_json::to_string_pretty(&loaded.log)
            .map_err(|e| AnalysisError::Io(io::Error::other(e)))?;
        atomic_write(&self.statistics_path, &json)?;
        Ok(())
    }

    /// All snapshots, newest first.
    pub fn load_all(&self) -> Vec<AnalysisSnapshot> {
        let mut analyses = self.read_log().log.analyses;
        analyses.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        analyses
    }

    pub fn find_by_hash(
        &self,
        followers_hash: &str,
        following_hash: &str,
    ) -> Option<AnalysisSnapshot> {
        self.read_log()
            .log
            .analyses
            .into_iter()
            .find(|s| s.matches_hashes(followers_hash, following_hash))
    }

    pub fn is_duplicate(&self, followers_hash: &str, following_hash: &str) -> bool {
        self.find_by_hash(followers_hash, following_hash).is_some()
    }

    /// Record a run stamped with the current time.
    ///
    /// Raw files are named to the second, so the stamp moves forward until
    /// it names files no other snapshot owns.
    pub fn save(&self, input: SnapshotInput<'_>) -> Result<AnalysisSnapshot, AnalysisError> {
        let mut timestamp = self.now();
        while self.raw_files_taken(&timestamp) {
            log::debug!(
                "Raw files for {} already exist, trying the next second",
                format_timestamp(&timestamp)
            );
            timestamp += Duration::seconds(1);
        }
        self.save_at(timestamp, input)
    }

    /// Record a run with an explicit timestamp.
    ///
    /// Raw files are written first; the log is only rewritten once both exist.
    /// Fails with `Io` (`AlreadyExists`) when another snapshot owns the raw
    /// file names for this second.
    pub fn save_at(
        &self,
        timestamp: DateTime<FixedOffset>,
        input: SnapshotInput<'_>,
    ) -> Result<AnalysisSnapshot, AnalysisError> {
        let (followers_file, following_file) = raw_file_names(&timestamp);
        let followers_path = self.raw_dir.join(&followers_file);

        write_new_lines(&followers_path, input.followers)?;
        if let Err(e) = write_new_lines(&self.raw_dir.join(&following_file), input.following) {
            if let Err(cleanup) = remove_file_if_exists(&followers_path) {
                log::warn!(
                    "Failed to remove raw data file {}: {cleanup}",
                    followers_path.display()
                );
            }
            return Err(e.into());
        }

        let snapshot = AnalysisSnapshot {
            timestamp,
            followers_count: input.followers.len(),
            following_count: input.following.len(),
            followers_file,
            following_file,
            followers_file_hash: input.followers_hash.to_string(),
            following_file_hash: input.following_hash.to_string(),
            followers_file_last_modified: input.followers_modified,
            following_file_last_modified: input.following_modified,
        };

        let mut loaded = self.read_log();
        loaded.log.analyses.push(snapshot.clone());
        if let Err(e) = self.write_log(&loaded) {
            self.remove_raw_files(&snapshot);
            return Err(e);
        }

        log::info!(
            "Saved analysis {} ({} followers, {} following)",
            format_timestamp(&snapshot.timestamp),
            snapshot.followers_count,
            snapshot.following_count
        );
        Ok(snapshot)
    }

    /// Remove the snapshot with exactly this timestamp. Returns `false` when none matched.
    pub fn delete(&self, timestamp: &DateTime<FixedOffset>) -> Result<bool, AnalysisError> {
        Ok(self.delete_many(std::slice::from_ref(timestamp))? > 0)
    }

    /// Remove every snapshot whose timestamp is listed; one log rewrite for the batch.
    pub fn delete_many(
        &self,
        timestamps: &[DateTime<FixedOffset>],
    ) -> Result<usize, AnalysisError> {
        let mut loaded = self.read_log();
        let (removed, kept): (Vec<_>, Vec<_>) = loaded
            .log
            .analyses
            .into_iter()
            .partition(|s| timestamps.contains(&s.timestamp));

        loaded.log.analyses = kept;
        if removed.is_empty() {
            log::debug!("No analyses matched {} timestamp(s)", timestamps.len());
            return Ok(0);
        }

        self.write_log(&loaded)?;
        for snapshot in &removed {
            self.remove_raw_files(snapshot);
        }

        log::info!("Deleted {} analysis snapshot(s)", removed.len());
        Ok(removed.len())
    }

    /// Username lists stored for a snapshot. Missing files read as empty.
    pub fn load_raw_data(&self, snapshot: &AnalysisSnapshot) -> (Vec<String>, Vec<String>) {
        (
            read_lines(&self.raw_dir.join(&snapshot.followers_file)),
            read_lines(&self.raw_dir.join(&snapshot.following_file)),
        )
    }

    pub fn count(&self) -> usize {
        self.read_log().log.analyses.len()
    }

    /// Oldest and newest snapshot timestamps, if any.
    pub fn date_range(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let analyses = self.read_log().log.analyses;
        let oldest = analyses.iter().map(|s| s.timestamp).min()?;
        let newest = analyses.iter().map(|s| s.timestamp).max()?;
        Some((oldest, newest))
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary::from_snapshots(&self.load_all())
    }

    fn raw_files_taken(&self, timestamp: &DateTime<FixedOffset>) -> bool {
        let (followers_file, following_file) = raw_file_names(timestamp);
        self.raw_dir.join(followers_file).exists() || self.raw_dir.join(following_file).exists()
    }

    fn remove_raw_files(&self, snapshot: &AnalysisSnapshot) {
        for name in [&snapshot.followers_file, &snapshot.following_file] {
            let path = self.raw_dir.join(name);
            if let Err(e) = remove_file_if_exists(&path) {
                log::warn!("Failed to remove raw data file {}: {e}", path.display());
            }
        }
    }
}

fn raw_file_names(timestamp: &DateTime<FixedOffset>) -> (String, String) {
    let stamp = timestamp.format(FILE_STAMP_FORMAT);
    (format!("followers_{stamp}.txt"), format!("following_{stamp}.txt"))
}

/// Write one name per line into a file that must not exist yet.
fn write_new_lines(path: &Path, names: &[String]) -> io::Result<()> {
    let mut body = String::with_capacity(names.iter().map(|n| n.len() + 1).sum());
    for name in names {
        body.push_str(name);
        body.push('\n');
    }

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
    file.write_all(body.as_bytes())
}

fn read_lines(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(text) => text.lines().map(str::to_string).collect(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("Raw data file {} is missing", path.display());
            Vec::new()
        }
        Err(e) => {
            log::warn!("Failed to read raw data file {}: {e}", path.display());
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
