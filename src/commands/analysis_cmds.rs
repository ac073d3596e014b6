//! Async entry points for the presentation layer.
//!
//! File work runs on the blocking pool. Commands that change the history
//! hold the [`OperationLock`] for their whole duration.

use crate::services::analysis::{self, AnalysisOutcome, ExportInspection};
use crate::services::config::ConfigService;
use crate::services::core::operation_lock::OperationLock;
use crate::services::history::{parse_timestamp, AnalysisSnapshot, HistoryStore, HistorySummary};
use crate::types::errors::{AnalysisError, CommandError, CommandResult};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

pub struct AppState {
    pub store: Arc<HistoryStore>,
    pub config: Arc<ConfigService>,
    pub lock: OperationLock,
}

impl AppState {
    /// Open the history where `config` points it.
    pub fn new(config: ConfigService) -> Result<Self, AnalysisError> {
        let store = HistoryStore::new(config.history_dir(), config.timezone())?;
        log::info!("History directory: {}", store.base_dir().display());
        Ok(Self {
            store: Arc::new(store),
            config: Arc::new(config),
            lock: OperationLock::new(),
        })
    }
}

/// Usernames stored alongside one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawData {
    pub followers: Vec<String>,
    pub following: Vec<String>,
}

async fn run_blocking<T, F>(task: F) -> CommandResult<T>
where
    F: FnOnce() -> Result<T, AnalysisError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| CommandError::Internal(format!("Background task failed: {e}")))?
        .map_err(CommandError::from)
}

fn parse_snapshot_time(text: &str) -> CommandResult<DateTime<FixedOffset>> {
    parse_timestamp(text.trim()).ok_or_else(|| {
        CommandError::Analysis(AnalysisError::MalformedInput(format!(
            "Invalid timestamp: {text}"
        )))
    })
}

pub async fn analyze_cmd(
    state: &AppState,
    archive_path: String,
    reanalyze: bool,
) -> CommandResult<AnalysisOutcome> {
    let _lock = state.lock.acquire().await?;
    let reanalyze = reanalyze || !state.config.get_settings().skip_duplicates;
    let store = Arc::clone(&state.store);
    let path = PathBuf::from(archive_path);

    run_blocking(move || analysis::analyze_export(&path, &store, reanalyze)).await
}

/// Newest first.
pub async fn load_history_cmd(state: &AppState) -> CommandResult<Vec<AnalysisSnapshot>> {
    let store = Arc::clone(&state.store);
    run_blocking(move || Ok(store.load_all())).await
}

/// Returns whether a snapshot was removed; an unknown timestamp is not an error.
pub async fn delete_snapshot_cmd(state: &AppState, timestamp: String) -> CommandResult<bool> {
    let timestamp = parse_snapshot_time(&timestamp)?;
    let _lock = state.lock.acquire().await?;
    let store = Arc::clone(&state.store);

    run_blocking(move || store.delete(&timestamp)).await
}

pub async fn delete_snapshots_cmd(
    state: &AppState,
    timestamps: Vec<String>,
) -> CommandResult<usize> {
    let timestamps = timestamps
        .iter()
        .map(|t| parse_snapshot_time(t))
        .collect::<CommandResult<Vec<_>>>()?;
    let _lock = state.lock.acquire().await?;
    let store = Arc::clone(&state.store);

    run_blocking(move || store.delete_many(&timestamps)).await
}

pub async fn history_summary_cmd(state: &AppState) -> CommandResult<HistorySummary> {
    let store = Arc::clone(&state.store);
    run_blocking(move || Ok(store.summary())).await
}

pub async fn load_raw_data_cmd(state: &AppState, timestamp: String) -> CommandResult<RawData> {
    let wanted = parse_snapshot_time(&timestamp)?;
    let store = Arc::clone(&state.store);

    let found = run_blocking(move || {
        Ok(store
            .load_all()
            .into_iter()
            .find(|s| s.timestamp == wanted)
            .map(|snapshot| store.load_raw_data(&snapshot)))
    })
    .await?;

    let (followers, following) =
        found.ok_or_else(|| CommandError::NotFound(format!("No analysis at {timestamp}")))?;
    Ok(RawData {
        followers,
        following,
    })
}

pub async fn inspect_export_cmd(archive_path: String) -> CommandResult<ExportInspection> {
    let path = PathBuf::from(archive_path);
    run_blocking(move || analysis::inspect_export(&path)).await
}

#[cfg(test)]
#[path = "tests/analysis_cmds_tests.rs"]
mod tests;
