//! Image directory scanning (pure, no side effects).

use std::fs;
use std::path::Path;

use crate::config::Filter;
use crate::debug;
use crate::error::PreloadError;

use super::kind::is_image;

/// Scan direct children of `dir` for image files
///
/// Keeps entries whose name passes the image extension allow-list and,
/// when given, the caller's `filter` (called with the file name and the
/// directory joined with it). Subdirectories are not descended into.
///
/// Order follows the filesystem listing and is not sorted.
///
/// # Pure Function
///
/// This function only reads the filesystem and returns data
pub fn scan_images(dir: &Path, filter: Option<&Filter>) -> Result<Vec<String>, PreloadError> {
    if !dir.is_dir() {
        return Err(PreloadError::DirectoryMissing(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| PreloadError::Io(dir.to_path_buf(), e))?;
    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| PreloadError::Io(dir.to_path_buf(), e))?;

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            debug!("scan"; "skipping non-UTF-8 file name {:?}", file_name);
            continue;
        };
        if !is_image(name) {
            continue;
        }
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }

        if let Some(filter) = filter {
            let path = dir.join(name);
            if !filter.matches(name, &path) {
                continue;
            }
        }

        files.push(name.to_string());
    }

    Ok(files)
}
