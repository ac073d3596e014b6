use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Directory marker shared by every relationship entry in an export.
pub const RELATIONSHIPS_DIR: &str = "followers_and_following/";

pub const FOLLOWERS_PREFIX: &str = "connections/followers_and_following/followers_";
pub const ALT_FOLLOWERS_PREFIX: &str = "followers_and_following/followers_";
pub const FOLLOWING_STEM: &str = "connections/followers_and_following/following";
pub const ALT_FOLLOWING_STEM: &str = "followers_and_following/following";

/// Export flavour offered by the platform's "download your information" tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Machine-readable nested records (`.json`).
    Json,
    /// Human-readable pages (`.html`) that need pattern extraction.
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Html => "HTML",
        }
    }

    fn followers_prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Json => &[FOLLOWERS_PREFIX, ALT_FOLLOWERS_PREFIX],
            Self::Html => &[FOLLOWERS_PREFIX],
        }
    }

    /// Candidate paths for the following entry, in lookup order.
    pub fn following_paths(self) -> Vec<String> {
        let ext = self.extension();
        match self {
            Self::Json => vec![
                format!("{FOLLOWING_STEM}.{ext}"),
                format!("{ALT_FOLLOWING_STEM}.{ext}"),
            ],
            Self::Html => vec![format!("{FOLLOWING_STEM}.{ext}")],
        }
    }

    /// Case-insensitive prefix + extension match for a followers part.
    pub fn is_followers_part(self, entry_name: &str) -> bool {
        let lower = entry_name.to_lowercase();
        let has_prefix = self
            .followers_prefixes()
            .iter()
            .any(|prefix| lower.starts_with(prefix));
        has_prefix && lower.ends_with(&format!(".{}", self.extension()))
    }
}

/// Text pulled out of the archive for one side of the relationship.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Merged (followers) or verbatim (following) text.
    pub content: String,
    /// Uncompressed size of the first entry.
    pub size: u64,
    /// Last-modified stamp of the first entry.
    pub last_modified: NaiveDateTime,
    /// Path of the first entry.
    pub entry_path: String,
    /// Number of entries merged into `content`.
    pub parts: usize,
}
