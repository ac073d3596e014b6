//! Structured-record (JSON) extraction.
//!
//! Followers: `[{"title": "", "string_list_data": [{"value": "name", "timestamp": 1700000000}]}]`
//! Following: `{"relationships_following": [{"title": "name", "string_list_data": [{"timestamp": ..}]}]}`

use super::types::CanonicalUser;
use super::UserExtractor;
use crate::types::errors::AnalysisError;
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StringListItem {
    value: Option<String>,
    timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RelationshipEntry {
    title: Option<String>,
    string_list_data: Option<Vec<StringListItem>>,
}

#[derive(Debug, Deserialize)]
struct FollowingDocument {
    relationships_following: Option<Vec<RelationshipEntry>>,
}

/// Unix seconds rendered as UTC wall-clock time.
fn from_unix_seconds(seconds: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

pub struct JsonFollowersExtractor;

impl UserExtractor for JsonFollowersExtractor {
    fn extract(&self, raw: &str) -> Result<Vec<CanonicalUser>, AnalysisError> {
        let entries: Vec<RelationshipEntry> = serde_json::from_str(raw).map_err(|e| {
            AnalysisError::MalformedInput(format!("Invalid JSON format in followers file: {e}"))
        })?;

        let users = entries
            .iter()
            .filter_map(|entry| entry.string_list_data.as_ref())
            .flatten()
            .filter_map(|item| {
                let username = non_empty(item.value.as_ref())?;
                let followed_at = item.timestamp.and_then(from_unix_seconds);
                Some(CanonicalUser::new(username, followed_at))
            })
            .collect();

        Ok(users)
    }
}

pub struct JsonFollowingExtractor;

impl UserExtractor for JsonFollowingExtractor {
    fn extract(&self, raw: &str) -> Result<Vec<CanonicalUser>, AnalysisError> {
        let document: FollowingDocument = serde_json::from_str(raw).map_err(|e| {
            AnalysisError::MalformedInput(format!("Invalid JSON format in following file: {e}"))
        })?;

        let users = document
            .relationships_following
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| {
                let username = non_empty(entry.title.as_ref())?;
                // Only the first item carries the follow time.
                let followed_at = entry
                    .string_list_data
                    .as_ref()
                    .and_then(|items| items.first())
                    .and_then(|item| item.timestamp)
                    .and_then(from_unix_seconds);
                Some(CanonicalUser::new(username, followed_at))
            })
            .collect();

        Ok(users)
    }
}

#[cfg(test)]
#[path = "tests/json_tests.rs"]
mod tests;
