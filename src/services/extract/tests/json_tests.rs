use super::*;
use crate::test_utils::{json_followers_part, json_following};
use chrono::NaiveDate;

fn names(users: &[CanonicalUser]) -> Vec<&str> {
    users.iter().map(CanonicalUser::username).collect()
}

#[test]
fn test_followers_value_and_timestamp() {
    let raw = json_followers_part(&[("alice", Some(1_700_000_000)), ("Bob", None)]);
    let users = JsonFollowersExtractor.extract(&raw).unwrap();

    assert_eq!(names(&users), vec!["alice", "Bob"]);
    let expected = NaiveDate::from_ymd_opt(2023, 11, 14)
        .unwrap()
        .and_hms_opt(22, 13, 20)
        .unwrap();
    assert_eq!(users[0].followed_at(), Some(expected));
    assert_eq!(users[1].followed_at(), None);
}

#[test]
fn test_followers_skips_empty_and_missing_values() {
    let raw = r#"[
        {"title": "", "string_list_data": [{"value": ""}, {"value": "kept"}]},
        {"title": "ignored", "media_list_data": []},
        {"string_list_data": [{"href": "https://www.instagram.com/nobody", "timestamp": 5}]}
    ]"#;
    let users = JsonFollowersExtractor.extract(raw).unwrap();
    assert_eq!(names(&users), vec!["kept"]);
}

#[test]
fn test_followers_every_nested_item_is_a_user() {
    let raw = r#"[{"string_list_data": [{"value": "one"}, {"value": "two"}]}]"#;
    let users = JsonFollowersExtractor.extract(raw).unwrap();
    assert_eq!(names(&users), vec!["one", "two"]);
}

#[test]
fn test_followers_keeps_duplicates() {
    let raw = json_followers_part(&[("alice", None), ("alice", None)]);
    let users = JsonFollowersExtractor.extract(&raw).unwrap();
    assert_eq!(users.len(), 2);
}

#[test]
fn test_followers_rejects_object_root() {
    let err = JsonFollowersExtractor
        .extract(r#"{"relationships_followers": []}"#)
        .unwrap_err();
    match err {
        AnalysisError::MalformedInput(msg) => assert!(msg.contains("followers")),
        other => panic!("Expected MalformedInput, got {other:?}"),
    }
}

#[test]
fn test_following_title_and_first_timestamp() {
    let raw = r#"{"relationships_following": [
        {"title": "carol", "string_list_data": [{"timestamp": 0}, {"timestamp": 1700000000}]},
        {"title": "dave", "string_list_data": []},
        {"title": "", "string_list_data": [{"value": "not-used"}]}
    ]}"#;
    let users = JsonFollowingExtractor.extract(raw).unwrap();

    assert_eq!(names(&users), vec!["carol", "dave"]);
    assert_eq!(
        users[0].followed_at(),
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(0, 0, 0)
    );
    assert_eq!(users[1].followed_at(), None);
}

#[test]
fn test_following_fixture_document() {
    let raw = json_following(&[("bob", Some(1_700_000_000)), ("carol", None)]);
    let users = JsonFollowingExtractor.extract(&raw).unwrap();
    assert_eq!(names(&users), vec!["bob", "carol"]);
    assert!(users[0].followed_at().is_some());
}

#[test]
fn test_following_missing_field_is_empty() {
    let users = JsonFollowingExtractor.extract("{}").unwrap();
    assert!(users.is_empty());
}

#[test]
fn test_following_rejects_array_root() {
    let err = JsonFollowingExtractor.extract("[]").unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedInput(_)));
}

#[test]
fn test_following_rejects_garbage() {
    let err = JsonFollowingExtractor.extract("<html>").unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedInput(_)));
}
