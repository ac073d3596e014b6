use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, TimeZone};
use chrono_tz::Europe::Rome;
use serde::{Deserialize, Serialize};

/// One persisted analysis run.
///
/// Two snapshots describe the same export when both content hashes match;
/// the timestamp only identifies the entry for deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSnapshot {
    #[serde(with = "snapshot_time")]
    pub timestamp: DateTime<FixedOffset>,
    pub followers_count: usize,
    pub following_count: usize,
    /// Raw-data file name (inside `RawData/`) holding the follower usernames.
    pub followers_file: String,
    pub following_file: String,
    pub followers_file_hash: String,
    pub following_file_hash: String,
    /// Archive entry timestamps, kept as metadata only.
    pub followers_file_last_modified: NaiveDateTime,
    pub following_file_last_modified: NaiveDateTime,
}

impl AnalysisSnapshot {
    /// Followers per followed account; `0.0` when nobody is followed.
    pub fn ratio(&self) -> f64 {
        if self.following_count == 0 {
            0.0
        } else {
            self.followers_count as f64 / self.following_count as f64
        }
    }

    pub fn matches_hashes(&self, followers_hash: &str, following_hash: &str) -> bool {
        self.followers_file_hash == followers_hash && self.following_file_hash == following_hash
    }
}

/// On-disk shape of `statistics.json`. Entries stay in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    #[serde(default)]
    pub analyses: Vec<AnalysisSnapshot>,
}

/// Render a snapshot timestamp the way it is written to disk.
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Parse a timestamp as written by [`format_timestamp`]. Offset-less values
/// (older logs) are read as Rome wall-clock time.
pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(text) {
        return Some(zoned);
    }
    let naive = text.parse::<NaiveDateTime>().ok()?;
    let local = Rome
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Rome.from_utc_datetime(&naive));
    Some(local.fixed_offset())
}

mod snapshot_time {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

#[cfg(test)]
#[path = "tests/models_tests.rs"]
mod tests;
