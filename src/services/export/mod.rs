//! Export archive access: format detection, entry lookup, multi-part merging.

mod archive;
mod merge;
mod types;

pub use archive::ExportArchive;
pub use merge::{merge_html_parts, merge_json_parts};
pub use types::{ExportFormat, ExtractedContent, RELATIONSHIPS_DIR};

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
