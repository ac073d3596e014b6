use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn sibling_with_suffix(file_path: &Path, suffix: &str) -> io::Result<PathBuf> {
    let file_name = file_path
        .file_name()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid file path: {}", file_path.display()),
            )
        })?
        .to_string_lossy();
    Ok(file_path.with_file_name(format!("{file_name}.{suffix}")))
}

pub fn backup_path_for(file_path: &Path) -> io::Result<PathBuf> {
    sibling_with_suffix(file_path, "bak")
}

fn temp_path_for(file_path: &Path) -> io::Result<PathBuf> {
    sibling_with_suffix(file_path, "tmp")
}

/// Write a file atomically: write to `<name>.tmp`, then rename over the target.
/// Readers always see either the old or the new complete file.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path)?;
    fs::write(&temp_path, content)?;

    match fs::rename(&temp_path, path) {
        Ok(()) => Ok(()),
        Err(first) => {
            // Some platforms refuse to rename over an existing file.
            log::debug!("rename over {} failed ({first}), retrying", path.display());
            if path.exists() {
                fs::remove_file(path)?;
            }
            fs::rename(&temp_path, path)
        }
    }
}

/// Copy `path` next to itself as `<name>.bak`. Returns the backup path.
pub fn backup_file(path: &Path) -> io::Result<PathBuf> {
    let backup = backup_path_for(path)?;
    fs::copy(path, &backup)?;
    Ok(backup)
}

/// Remove a file, treating "already gone" as success. Returns whether a file was removed.
pub fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
