//! Follower / following set relationships.

use crate::services::extract::CanonicalUser;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelationshipReport {
    /// Accounts you follow that do not follow you (following order).
    pub not_following_back: Vec<CanonicalUser>,
    /// Accounts following you that you do not follow (followers order).
    pub not_following: Vec<CanonicalUser>,
    /// Followers you also follow (followers order).
    pub mutual: Vec<CanonicalUser>,
}

fn key_set(users: &[CanonicalUser]) -> HashSet<String> {
    users.iter().map(CanonicalUser::match_key).collect()
}

/// Usernames are compared case-insensitively. Duplicates within one list are
/// tested one by one and kept in the output.
pub fn compute_relationships(
    followers: &[CanonicalUser],
    following: &[CanonicalUser],
) -> RelationshipReport {
    let follower_keys = key_set(followers);
    let following_keys = key_set(following);

    let not_following_back = following
        .iter()
        .filter(|user| !follower_keys.contains(&user.match_key()))
        .cloned()
        .collect();

    let (mutual, not_following): (Vec<_>, Vec<_>) = followers
        .iter()
        .cloned()
        .partition(|user| following_keys.contains(&user.match_key()));

    RelationshipReport {
        not_following_back,
        not_following,
        mutual,
    }
}

#[cfg(test)]
#[path = "tests/relations_tests.rs"]
mod tests;
