//! Markup (HTML) extraction.
//!
//! The HTML export has no reliable nesting between a username and its date,
//! so usernames and dates are collected as two independent match lists and
//! paired by position.

use super::types::CanonicalUser;
use super::UserExtractor;
use crate::types::errors::AnalysisError;
use chrono::NaiveDateTime;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// <a target="_blank" href="https://www.instagram.com/USERNAME">, some exports add `_u/`
static FOLLOWER_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s+target="_blank"\s+href="https://www\.instagram\.com/(?:_u/)?([^"]+)">"#)
        .expect("valid follower link regex")
});

// <h2 class="_3-95 _2pim _a6-h _a6-i">USERNAME</h2>
static FOLLOWING_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<h2\s+class="[^"]*_a6-h[^"]*">([^<]+)</h2>"#)
        .expect("valid following heading regex")
});

// <div>Nov 27, 2025 1:12 am</div>
static FOLLOW_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<div>([^<]+\d{4}\s+\d{1,2}:\d{2}\s+(?:am|pm))</div>")
        .expect("valid follow date regex")
});

const DATE_FORMATS: [&str; 2] = ["%b %d, %Y %I:%M %p", "%b %e, %Y %I:%M %p"];

/// Parse `"Nov 27, 2025 1:12 am"` (day zero-padded or not).
pub fn parse_follow_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

fn captures<'a>(re: &Regex, raw: &'a str) -> Vec<&'a str> {
    re.captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// i-th username gets the i-th date; usernames past the last date get none.
fn pair_by_position(usernames: Vec<&str>, dates: Vec<&str>) -> Vec<CanonicalUser> {
    if dates.len() < usernames.len() {
        log::debug!(
            "{} usernames but only {} dates, trailing users have no follow date",
            usernames.len(),
            dates.len()
        );
    }

    usernames
        .into_iter()
        .enumerate()
        .map(|(i, username)| {
            let followed_at = dates.get(i).and_then(|d| parse_follow_date(d));
            CanonicalUser::new(username, followed_at)
        })
        .collect()
}

pub struct HtmlFollowersExtractor;

impl UserExtractor for HtmlFollowersExtractor {
    fn extract(&self, raw: &str) -> Result<Vec<CanonicalUser>, AnalysisError> {
        let usernames = captures(&FOLLOWER_LINK_RE, raw);
        let dates = captures(&FOLLOW_DATE_RE, raw);
        Ok(pair_by_position(usernames, dates))
    }
}

pub struct HtmlFollowingExtractor;

impl UserExtractor for HtmlFollowingExtractor {
    fn extract(&self, raw: &str) -> Result<Vec<CanonicalUser>, AnalysisError> {
        let usernames = captures(&FOLLOWING_HEADING_RE, raw);
        let dates = captures(&FOLLOW_DATE_RE, raw);
        Ok(pair_by_position(usernames, dates))
    }
}

/// Match counts per pattern, for diagnosing exports that yield nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternReport {
    pub characters: usize,
    pub follower_links: usize,
    pub following_headings: usize,
    pub dates: usize,
    pub first_follower: Option<String>,
    pub first_following: Option<String>,
}

pub fn pattern_report(raw: &str) -> PatternReport {
    let followers = captures(&FOLLOWER_LINK_RE, raw);
    let following = captures(&FOLLOWING_HEADING_RE, raw);
    PatternReport {
        characters: raw.chars().count(),
        follower_links: followers.len(),
        following_headings: following.len(),
        dates: FOLLOW_DATE_RE.find_iter(raw).count(),
        first_follower: followers.first().map(|s| s.to_string()),
        first_following: following.first().map(|s| s.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/html_tests.rs"]
mod tests;
