use super::merge::{merge_html_parts, merge_json_parts};
use super::types::{ExportFormat, ExtractedContent};
use crate::types::errors::AnalysisError;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

// Declared entry sizes come from the archive header and may be forged.
const MAX_PREALLOC: u64 = 16 * 1024 * 1024;

pub(super) fn read_capacity_hint(declared_size: u64) -> usize {
    declared_size.min(MAX_PREALLOC) as usize
}

/// A data export opened for read-only random access.
///
/// The underlying file stays open for the lifetime of the value and is
/// released on drop.
pub struct ExportArchive {
    path: PathBuf,
    archive: zip::ZipArchive<fs::File>,
}

impl std::fmt::Debug for ExportArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportArchive")
            .field("path", &self.path)
            .field("entries", &self.archive.len())
            .finish()
    }
}

impl ExportArchive {
    pub fn open(archive_path: &Path) -> Result<Self, AnalysisError> {
        if !archive_path.is_file() {
            return Err(AnalysisError::NotFound(format!(
                "ZIP file not found: {}",
                archive_path.display()
            )));
        }

        let file = fs::File::open(archive_path)?;
        let archive = zip::ZipArchive::new(file).map_err(|e| {
            AnalysisError::NotAnArchive(format!("{}: {e}", archive_path.display()))
        })?;

        log::debug!(
            "Opened export {} ({} entries)",
            archive_path.display(),
            archive.len()
        );

        Ok(Self {
            path: archive_path.to_path_buf(),
            archive,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entry_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.archive.file_names()
    }

    fn has_entry(&self, name: &str) -> bool {
        self.entry_names().any(|n| n == name)
    }

    /// Entries whose path contains `path_contains` (case-insensitive).
    pub fn list_entries(&self, path_contains: &str) -> Vec<String> {
        let needle = path_contains.to_lowercase();
        self.entry_names()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(str::to_string)
            .collect()
    }

    /// Followers parts for `format`, sorted by entry path (this is the merge order).
    pub fn followers_parts(&self, format: ExportFormat) -> Vec<String> {
        let mut parts: Vec<String> = self
            .entry_names()
            .filter(|name| format.is_followers_part(name))
            .map(str::to_string)
            .collect();
        parts.sort();
        parts
    }

    pub fn count_followers_parts(&self, format: ExportFormat) -> usize {
        self.entry_names()
            .filter(|name| format.is_followers_part(name))
            .count()
    }

    fn following_entry(&self, format: ExportFormat) -> Option<String> {
        format
            .following_paths()
            .into_iter()
            .find(|path| self.has_entry(path))
    }

    /// JSON wins when both of its sides are present, then HTML.
    pub fn detect_format(&self) -> Result<ExportFormat, AnalysisError> {
        for format in [ExportFormat::Json, ExportFormat::Html] {
            let has_following = self.following_entry(format).is_some();
            let has_followers = self.count_followers_parts(format) > 0;
            if has_following && has_followers {
                log::debug!("Detected {} export", format.label());
                return Ok(format);
            }
        }

        Err(AnalysisError::InvalidStructure(format!(
            "{} contains neither JSON nor HTML followers/following files under \
             connections/followers_and_following/",
            self.path.display()
        )))
    }

    /// Read and merge every followers part.
    pub fn extract_followers(
        &mut self,
        format: ExportFormat,
    ) -> Result<ExtractedContent, AnalysisError> {
        let names = self.followers_parts(format);
        if names.is_empty() {
            return Err(AnalysisError::NotFound(format!(
                "No followers {} files found in ZIP",
                format.label()
            )));
        }

        let mut parts = Vec::with_capacity(names.len());
        let mut first_meta = None;
        for name in &names {
            let (content, size, modified) = self.read_entry(name)?;
            if first_meta.is_none() {
                first_meta = Some((size, modified));
            }
            parts.push((name.clone(), content));
        }
        let (size, last_modified) = first_meta.unwrap_or_default();

        let content = match format {
            ExportFormat::Json => merge_json_parts(&parts)?,
            ExportFormat::Html => merge_html_parts(&parts),
        };

        if names.len() > 1 {
            log::info!("Merged {} followers files", names.len());
        }

        Ok(ExtractedContent {
            content,
            size,
            last_modified,
            entry_path: names[0].clone(),
            parts: names.len(),
        })
    }

    /// Read the single following entry verbatim.
    pub fn extract_following(
        &mut self,
        format: ExportFormat,
    ) -> Result<ExtractedContent, AnalysisError> {
        let name = self.following_entry(format).ok_or_else(|| {
            AnalysisError::NotFound(format!(
                "Following {} file not found in ZIP. Expected: {}",
                format.label(),
                format.following_paths().join(" or ")
            ))
        })?;

        let (content, size, last_modified) = self.read_entry(&name)?;
        Ok(ExtractedContent {
            content,
            size,
            last_modified,
            entry_path: name,
            parts: 1,
        })
    }

    fn read_entry(&mut self, name: &str) -> Result<(String, u64, NaiveDateTime), AnalysisError> {
        let mut entry = self
            .archive
            .by_name(name)
            .map_err(|e| AnalysisError::NotFound(format!("{name}: {e}")))?;

        let size = entry.size();
        let modified = zip_time_to_naive(entry.last_modified().unwrap_or_default());

        let mut bytes = Vec::with_capacity(read_capacity_hint(size));
        entry.read_to_end(&mut bytes)?;

        let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
        if had_errors {
            log::warn!("{name}: invalid UTF-8 sequences replaced");
        }

        Ok((text.into_owned(), size, modified))
    }
}

fn zip_time_to_naive(stamp: zip::DateTime) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(
        i32::from(stamp.year()),
        u32::from(stamp.month()),
        u32::from(stamp.day()),
    )
    .and_then(|date| {
        date.and_hms_opt(
            u32::from(stamp.hour()),
            u32::from(stamp.minute()),
            u32::from(stamp.second()),
        )
    })
    .unwrap_or_default()
}
