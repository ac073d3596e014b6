//! Multi-part followers merging.
//!
//! Large accounts get their followers split over `followers_1`, `followers_2`, ...
//! Both merge strategies expect the parts already sorted by entry path.

use crate::types::errors::AnalysisError;

const BODY_OPEN: &str = "<body";
const BODY_CLOSE: &str = "</body>";

/// Concatenate the top-level arrays of every part into one compact JSON array.
pub fn merge_json_parts(parts: &[(String, String)]) -> Result<String, AnalysisError> {
    let mut combined: Vec<serde_json::Value> = Vec::new();

    for (entry_path, content) in parts {
        let records: Vec<serde_json::Value> = serde_json::from_str(content).map_err(|e| {
            AnalysisError::MalformedInput(format!("{entry_path} is not a JSON array: {e}"))
        })?;
        log::debug!("{entry_path}: {} records", records.len());
        combined.extend(records);
    }

    serde_json::to_string(&combined).map_err(|e| AnalysisError::MalformedInput(e.to_string()))
}

/// Keep the first document whole and splice the `<body>` of every later one
/// in front of the combined document's closing body tag.
pub fn merge_html_parts(parts: &[(String, String)]) -> String {
    let mut iter = parts.iter();
    let Some((_, first)) = iter.next() else {
        return String::new();
    };
    let mut combined = first.clone();

    for (entry_path, content) in iter {
        let Some(inner) = body_inner(content) else {
            log::debug!("{entry_path}: no <body> markers, skipped");
            continue;
        };

        match rfind_ignore_case(&combined, BODY_CLOSE) {
            Some(at) if at > 0 => combined.insert_str(at, inner),
            _ => log::debug!("{entry_path}: combined document has no </body>, skipped"),
        }
    }

    combined
}

/// Text between the end of the opening body tag and the last closing body tag.
fn body_inner(document: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets identical to `document`.
    let lower = document.to_ascii_lowercase();
    let start = lower.find(BODY_OPEN)?;
    let end = lower.rfind(BODY_CLOSE)?;
    if end <= start {
        return None;
    }
    let open_end = start + lower[start..].find('>')?;
    if open_end >= end {
        return None;
    }
    Some(&document[open_end + 1..end])
}

fn rfind_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().rfind(needle)
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
