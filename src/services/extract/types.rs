use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Which list of the export a piece of content belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationSide {
    Followers,
    Following,
}

impl RelationSide {
    pub fn label(self) -> &'static str {
        match self {
            Self::Followers => "followers",
            Self::Following => "following",
        }
    }
}

/// One account pulled out of an export.
///
/// The username keeps the casing found in the export; comparisons go through
/// [`CanonicalUser::match_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalUser {
    username: String,
    followed_at: Option<NaiveDateTime>,
}

impl CanonicalUser {
    pub fn new(username: impl Into<String>, followed_at: Option<NaiveDateTime>) -> Self {
        Self {
            username: username.into(),
            followed_at,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Wall-clock time the relationship started, when the export carries one.
    pub fn followed_at(&self) -> Option<NaiveDateTime> {
        self.followed_at
    }

    pub fn match_key(&self) -> String {
        self.username.to_lowercase()
    }
}
