mod common;

use common::{entry, init_test_context, json_followers, json_following};
use instanalytics_lib::services::analysis::{analyze_export, AnalysisOutcome};
use instanalytics_lib::services::config::{AppSettings, ConfigService};
use instanalytics_lib::services::history::HistoryLog;
use std::fs;

#[test]
fn log_is_rewritten_in_place_without_leftovers() {
    let ctx = init_test_context();

    for (i, extra) in ["bob", "carol", "dave"].iter().enumerate() {
        let zip = ctx.zip(
            &format!("export_{i}.zip"),
            &[
                (entry("followers_1.json"), json_followers(&["alice", extra])),
                (entry("following.json"), json_following(&["alice"])),
            ],
        );
        let outcome = analyze_export(&zip, &ctx.store, false).expect("analysis");
        assert!(matches!(outcome, AnalysisOutcome::Completed(_)));
    }

    let path = ctx.store.statistics_path();
    let text = fs::read_to_string(path).expect("log exists");
    let log: HistoryLog = serde_json::from_str(&text).expect("log is valid JSON");
    assert_eq!(log.analyses.len(), 3);
    // Insertion order on disk, oldest first.
    assert!(log.analyses[0].timestamp <= log.analyses[2].timestamp);
    assert!(text.contains("\n  \"analyses\""));
    assert!(text.contains("\"followersFileHash\""));

    assert!(!path.with_file_name("statistics.json.tmp").exists());
    assert!(!path.with_file_name("statistics.json.bak").exists());
}

#[test]
fn config_save_can_overwrite_existing_file() {
    let ctx = init_test_context();
    let service = ConfigService::load(ctx.dir.path());

    service
        .save_settings(AppSettings::default())
        .expect("first save should create config file");
    let second = AppSettings {
        skip_duplicates: false,
        ..AppSettings::default()
    };
    service
        .save_settings(second.clone())
        .expect("second save should replace the config file");

    let saved: AppSettings =
        serde_json::from_str(&fs::read_to_string(service.config_path()).expect("config exists"))
            .expect("config is valid JSON");
    assert_eq!(saved, second);
}
