//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`
/// Returns the path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/src/pages/   ← start
/// /home/user/site/preload.toml ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

/// Derive a URL prefix from the last segment of a directory path
///
/// # Examples
/// ```ignore
/// derive_prefix("public/images")  -> "/images/"
/// derive_prefix("public/images/") -> "/images/"
/// derive_prefix("static")         -> "/static/"
/// derive_prefix("")               -> "/"
/// ```
pub fn derive_prefix(directory: &str) -> String {
    match directory.split('/').rev().find(|seg| !seg.is_empty()) {
        Some(last) => format!("/{last}/"),
        None => "/".to_string(),
    }
}

// ============================================================================
// tests
// ============================================================================
