//! Public URL resolution for scanned images.
//!
//! Without hashing, a file maps to `prefix + file_name`. With hashing and a
//! bundle manifest, the emitted (possibly content-hashed) name is looked up
//! by source base name, falling back to the plain name on a miss.

use rustc_hash::FxHashMap;

use super::kind::is_image;
use super::manifest::BundleManifest;

/// Base name of a `/`-separated key.
#[inline]
fn base_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Build `source base name → emitted fileName` lookup.
///
/// Only asset entries whose key names an image are kept. Later entries
/// sharing a base name overwrite earlier ones.
pub fn hashed_names(manifest: &BundleManifest) -> FxHashMap<&str, &str> {
    manifest
        .iter()
        .filter(|(key, entry)| entry.is_asset() && is_image(base_name(key)))
        .map(|(key, entry)| (base_name(key), entry.file_name.as_str()))
        .collect()
}

/// Resolve preload URLs for `files`, preserving order.
///
/// Never fails: a file missing from the manifest resolves unhashed.
pub fn resolve_urls(
    files: &[String],
    manifest: Option<&BundleManifest>,
    prefix: &str,
    hash: bool,
) -> Vec<String> {
    let lookup = match manifest {
        Some(manifest) if hash => hashed_names(manifest),
        _ => return files.iter().map(|file| format!("{prefix}{file}")).collect(),
    };

    files
        .iter()
        .map(|file| {
            let name = lookup.get(file.as_str()).copied().unwrap_or(file.as_str());
            format!("{prefix}{name}")
        })
        .collect()
}
