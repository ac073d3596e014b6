//! Turn raw export text into canonical user lists.
//!
//! One strategy per (format, side) pair, all behind [`UserExtractor`].

mod html;
mod json;
mod types;

pub use html::{
    parse_follow_date, pattern_report, HtmlFollowersExtractor, HtmlFollowingExtractor,
    PatternReport,
};
pub use json::{JsonFollowersExtractor, JsonFollowingExtractor};
pub use types::{CanonicalUser, RelationSide};

use crate::services::export::ExportFormat;
use crate::types::errors::AnalysisError;

pub trait UserExtractor: Send + Sync {
    /// JSON strategies fail with `MalformedInput`; HTML strategies never fail.
    fn extract(&self, raw: &str) -> Result<Vec<CanonicalUser>, AnalysisError>;
}

pub fn extractor_for(format: ExportFormat, side: RelationSide) -> Box<dyn UserExtractor> {
    match (format, side) {
        (ExportFormat::Json, RelationSide::Followers) => Box::new(JsonFollowersExtractor),
        (ExportFormat::Json, RelationSide::Following) => Box::new(JsonFollowingExtractor),
        (ExportFormat::Html, RelationSide::Followers) => Box::new(HtmlFollowersExtractor),
        (ExportFormat::Html, RelationSide::Following) => Box::new(HtmlFollowingExtractor),
    }
}
