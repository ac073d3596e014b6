//! The analyze workflow: archive → text → users → relationships → history.

pub mod models;

pub use models::{AnalysisOutcome, AnalysisResult, ExportInspection};

use crate::services::export::{ExportArchive, ExportFormat, RELATIONSHIPS_DIR};
use crate::services::extract::{extractor_for, pattern_report, CanonicalUser, RelationSide};
use crate::services::hashing::hash_pair;
use crate::services::history::{HistoryStore, SnapshotInput};
use crate::services::relations::compute_relationships;
use crate::types::errors::AnalysisError;
use std::path::Path;

/// Analyze one export and record it.
///
/// Unless `reanalyze` is set, an export whose followers and following hashes
/// are both already recorded is not saved again; the matching snapshot is
/// returned as [`AnalysisOutcome::AlreadyAnalyzed`].
pub fn analyze_export(
    archive_path: &Path,
    store: &HistoryStore,
    reanalyze: bool,
) -> Result<AnalysisOutcome, AnalysisError> {
    log::info!("Analyzing export {}", archive_path.display());

    // The archive is closed at the end of this block, before any history write.
    let (format, followers_raw, following_raw) = {
        let mut archive = ExportArchive::open(archive_path)?;
        let format = archive.detect_format()?;
        let followers = archive.extract_followers(format)?;
        let following = archive.extract_following(format)?;
        (format, followers, following)
    };

    let (followers_hash, following_hash) =
        hash_pair(&followers_raw.content, &following_raw.content);

    let duplicate_of = match store.find_by_hash(&followers_hash, &following_hash) {
        Some(existing) if !reanalyze => {
            log::info!("Export already analyzed at {}, skipping", existing.timestamp);
            return Ok(AnalysisOutcome::AlreadyAnalyzed(existing));
        }
        Some(existing) => {
            log::info!("Re-analyzing export first recorded at {}", existing.timestamp);
            Some(existing.timestamp)
        }
        None => None,
    };

    let followers =
        extractor_for(format, RelationSide::Followers).extract(&followers_raw.content)?;
    let following =
        extractor_for(format, RelationSide::Following).extract(&following_raw.content)?;

    if followers.is_empty() || following.is_empty() {
        log::warn!(
            "Extracted {} followers and {} following from {} export",
            followers.len(),
            following.len(),
            format.label()
        );
    }

    let relationships = compute_relationships(&followers, &following);

    let follower_names = usernames(&followers);
    let following_names = usernames(&following);
    let snapshot = store.save(SnapshotInput {
        followers: &follower_names,
        following: &following_names,
        followers_hash: &followers_hash,
        following_hash: &following_hash,
        followers_modified: followers_raw.last_modified,
        following_modified: following_raw.last_modified,
    })?;

    log::info!(
        "Analysis complete: {} followers, {} following, {} not following back",
        followers.len(),
        following.len(),
        relationships.not_following_back.len()
    );

    Ok(AnalysisOutcome::Completed(Box::new(AnalysisResult {
        format,
        followers_count: followers.len(),
        following_count: following.len(),
        relationships,
        snapshot,
        duplicate_of,
    })))
}

fn usernames(users: &[CanonicalUser]) -> Vec<String> {
    users.iter().map(|u| u.username().to_string()).collect()
}

/// Describe what an export contains without extracting or recording anything.
pub fn inspect_export(archive_path: &Path) -> Result<ExportInspection, AnalysisError> {
    let mut archive = ExportArchive::open(archive_path)?;
    let relationship_entries = archive.list_entries(RELATIONSHIPS_DIR);

    let format = match archive.detect_format() {
        Ok(format) => Some(format),
        Err(AnalysisError::InvalidStructure(msg)) => {
            log::debug!("{msg}");
            None
        }
        Err(e) => return Err(e),
    };

    let mut inspection = ExportInspection {
        format,
        followers_parts: format
            .map(|f| archive.followers_parts(f))
            .unwrap_or_default(),
        relationship_entries,
        followers_patterns: None,
        following_patterns: None,
    };

    if format == Some(ExportFormat::Html) {
        let followers = archive.extract_followers(ExportFormat::Html)?;
        let following = archive.extract_following(ExportFormat::Html)?;
        inspection.followers_patterns = Some(pattern_report(&followers.content));
        inspection.following_patterns = Some(pattern_report(&following.content));
    }

    Ok(inspection)
}

#[cfg(test)]
#[path = "tests/analysis_tests.rs"]
mod tests;
