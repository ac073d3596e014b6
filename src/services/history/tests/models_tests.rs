use super::*;
use chrono::NaiveDate;

fn naive(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn snapshot(followers: usize, following: usize) -> AnalysisSnapshot {
    AnalysisSnapshot {
        timestamp: DateTime::parse_from_rfc3339("2025-11-27T01:12:00+01:00").unwrap(),
        followers_count: followers,
        following_count: following,
        followers_file: "followers_20251127011200.txt".to_string(),
        following_file: "following_20251127011200.txt".to_string(),
        followers_file_hash: "aa".to_string(),
        following_file_hash: "bb".to_string(),
        followers_file_last_modified: naive(2025, 11, 26),
        following_file_last_modified: naive(2025, 11, 26),
    }
}

#[test]
fn test_ratio() {
    assert_eq!(snapshot(10, 4).ratio(), 2.5);
    assert_eq!(snapshot(10, 0).ratio(), 0.0);
    assert_eq!(snapshot(0, 0).ratio(), 0.0);
}

#[test]
fn test_serializes_camel_case_fields() {
    let json = serde_json::to_value(snapshot(3, 2)).unwrap();

    assert_eq!(json["timestamp"], "2025-11-27T01:12:00+01:00");
    assert_eq!(json["followersCount"], 3);
    assert_eq!(json["followingFileHash"], "bb");
    assert_eq!(json["followersFileLastModified"], "2025-11-26T10:00:00");
}

#[test]
fn test_log_round_trip_keeps_order() {
    let mut second = snapshot(5, 5);
    second.timestamp = DateTime::parse_from_rfc3339("2025-11-20T08:00:00.250+01:00").unwrap();
    let log = HistoryLog {
        analyses: vec![snapshot(3, 2), second],
    };

    let text = serde_json::to_string_pretty(&log).unwrap();
    let parsed: HistoryLog = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, log);
}

#[test]
fn test_naive_timestamp_reads_as_rome_time() {
    // Winter: Rome is UTC+1.
    let winter = parse_timestamp("2025-01-15T12:00:00").unwrap();
    assert_eq!(winter.offset().local_minus_utc(), 3600);
    // Summer: UTC+2, fractional seconds tolerated.
    let summer = parse_timestamp("2025-07-15T12:00:00.1234567").unwrap();
    assert_eq!(summer.offset().local_minus_utc(), 7200);
    assert_eq!(summer.naive_local(), "2025-07-15T12:00:00.1234567".parse().unwrap());
}

#[test]
fn test_invalid_timestamp_is_rejected() {
    assert!(parse_timestamp("last tuesday").is_none());
    let err = serde_json::from_str::<HistoryLog>(r#"{"analyses":[{"timestamp":"nope"}]}"#);
    assert!(err.is_err());
}

#[test]
fn test_missing_analyses_field_is_empty_log() {
    let log: HistoryLog = serde_json::from_str("{}").unwrap();
    assert!(log.analyses.is_empty());
}
