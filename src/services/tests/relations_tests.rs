use super::*;

fn users(names: &[&str]) -> Vec<CanonicalUser> {
    names.iter().map(|n| CanonicalUser::new(*n, None)).collect()
}

fn names(users: &[CanonicalUser]) -> Vec<&str> {
    users.iter().map(CanonicalUser::username).collect()
}

#[test]
fn test_basic_relationships() {
    let followers = users(&["alice", "bob"]);
    let following = users(&["bob", "carol"]);

    let report = compute_relationships(&followers, &following);
    assert_eq!(names(&report.not_following_back), vec!["carol"]);
    assert_eq!(names(&report.not_following), vec!["alice"]);
    assert_eq!(names(&report.mutual), vec!["bob"]);
}

#[test]
fn test_case_insensitive_match_keeps_original_case() {
    let followers = users(&["User"]);
    let following = users(&["user"]);

    let report = compute_relationships(&followers, &following);
    assert_eq!(names(&report.mutual), vec!["User"]);
    assert!(report.not_following.is_empty());
    assert!(report.not_following_back.is_empty());
}

#[test]
fn test_mutual_and_not_following_partition_followers() {
    let followers = users(&["d", "a", "B", "c", "a"]);
    let following = users(&["b", "a", "z"]);

    let report = compute_relationships(&followers, &following);
    assert_eq!(
        report.mutual.len() + report.not_following.len(),
        followers.len()
    );
    for user in &report.mutual {
        assert!(!report.not_following.contains(user));
    }
    // Source order survives
    assert_eq!(names(&report.mutual), vec!["a", "B", "a"]);
    assert_eq!(names(&report.not_following), vec!["d", "c"]);
    assert_eq!(names(&report.not_following_back), vec!["z"]);
}

#[test]
fn test_duplicates_are_not_collapsed() {
    let followers = users(&["x", "x"]);
    let following = users(&["y", "y"]);

    let report = compute_relationships(&followers, &following);
    assert_eq!(names(&report.not_following), vec!["x", "x"]);
    assert_eq!(names(&report.not_following_back), vec!["y", "y"]);
}

#[test]
fn test_empty_sides() {
    let followers = users(&["alice"]);
    let report = compute_relationships(&followers, &[]);
    assert_eq!(names(&report.not_following), vec!["alice"]);
    assert!(report.mutual.is_empty());

    let report = compute_relationships(&[], &followers);
    assert_eq!(names(&report.not_following_back), vec!["alice"]);
}
