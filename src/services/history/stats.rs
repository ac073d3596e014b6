use super::models::AnalysisSnapshot;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One point of the follower/following series, for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<FixedOffset>,
    pub followers: usize,
    pub following: usize,
    pub ratio: f64,
}

/// Aggregate view over the whole history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub total_analyses: usize,
    pub oldest: Option<DateTime<FixedOffset>>,
    pub newest: Option<DateTime<FixedOffset>>,
    pub current_followers: usize,
    pub current_following: usize,
    pub current_ratio: f64,
    /// Percent change in followers from the oldest to the newest snapshot.
    pub growth_trend_value: f64,
    /// `"+12.5%"`, `"-3.0%"` or `"N/A"` with fewer than two snapshots.
    pub growth_trend: String,
    /// Oldest first.
    pub series: Vec<TrendPoint>,
}

impl HistorySummary {
    pub fn from_snapshots(snapshots: &[AnalysisSnapshot]) -> Self {
        let mut ordered: Vec<&AnalysisSnapshot> = snapshots.iter().collect();
        ordered.sort_by_key(|s| s.timestamp);

        let oldest = ordered.first().copied();
        let newest = ordered.last().copied();

        let growth_trend_value = match (oldest, newest) {
            (Some(first), Some(last)) if ordered.len() >= 2 => {
                growth_percent(first.followers_count, last.followers_count)
            }
            _ => 0.0,
        };
        let growth_trend = if ordered.len() < 2 {
            "N/A".to_string()
        } else if growth_trend_value >= 0.0 {
            format!("+{growth_trend_value:.1}%")
        } else {
            format!("{growth_trend_value:.1}%")
        };

        Self {
            total_analyses: ordered.len(),
            oldest: oldest.map(|s| s.timestamp),
            newest: newest.map(|s| s.timestamp),
            current_followers: newest.map_or(0, |s| s.followers_count),
            current_following: newest.map_or(0, |s| s.following_count),
            current_ratio: newest.map_or(0.0, AnalysisSnapshot::ratio),
            growth_trend_value,
            growth_trend,
            series: ordered
                .iter()
                .map(|s| TrendPoint {
                    timestamp: s.timestamp,
                    followers: s.followers_count,
                    following: s.following_count,
                    ratio: s.ratio(),
                })
                .collect(),
        }
    }
}

fn growth_percent(first: usize, last: usize) -> f64 {
    if first == 0 {
        return 0.0;
    }
    (last as f64 - first as f64) / first as f64 * 100.0
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
