use crate::services::export::ExportFormat;
use crate::services::extract::{CanonicalUser, PatternReport};
use crate::services::history::AnalysisSnapshot;
use crate::services::relations::RelationshipReport;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub format: ExportFormat,
    pub followers_count: usize,
    pub following_count: usize,
    #[serde(flatten)]
    pub relationships: RelationshipReport,
    /// The snapshot recorded for this run.
    pub snapshot: AnalysisSnapshot,
    /// Set when the same export had already been recorded and was analyzed again.
    pub duplicate_of: Option<DateTime<FixedOffset>>,
}

impl AnalysisResult {
    pub fn not_following_back(&self) -> &[CanonicalUser] {
        &self.relationships.not_following_back
    }

    pub fn not_following(&self) -> &[CanonicalUser] {
        &self.relationships.not_following
    }

    pub fn mutual(&self) -> &[CanonicalUser] {
        &self.relationships.mutual
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Completed(Box<AnalysisResult>),
    /// The export matches a recorded snapshot and nothing was saved.
    AlreadyAnalyzed(AnalysisSnapshot),
}

/// Read-only diagnostics for an export archive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportInspection {
    /// `None` when neither format's entries are present.
    pub format: Option<ExportFormat>,
    pub followers_parts: Vec<String>,
    pub relationship_entries: Vec<String>,
    /// Markup pattern counts; only filled for HTML exports.
    pub followers_patterns: Option<PatternReport>,
    pub following_patterns: Option<PatternReport>,
}
