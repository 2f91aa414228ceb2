//! Bundle manifest: the host's record of emitted build outputs.
//!
//! Read-only from the plugin's side. Entries keep the order they were
//! emitted in, which makes last-write-wins lookups deterministic.
//!
//! # JSON Shape
//!
//! ```json
//! {
//!   "public/images/a.png": { "type": "asset", "fileName": "assets/a.3f2a1b.png" },
//!   "src/main.ts":         { "type": "chunk", "fileName": "assets/main.9c1e.js" }
//! }
//! ```
//!
//! Descriptor fields other than `type` and `fileName` are ignored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PreloadError;

/// Kind of bundle output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Static file copied or emitted as-is.
    Asset,
    /// Code chunk.
    Chunk,
    #[serde(other)]
    Other,
}

/// Descriptor of a single emitted output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputEntry {
    #[serde(rename = "type")]
    pub kind: OutputKind,
    /// Final emitted path, relative to the output root. May embed a hash.
    pub file_name: String,
}

impl OutputEntry {
    pub fn asset(file_name: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Asset,
            file_name: file_name.into(),
        }
    }

    pub fn chunk(file_name: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Chunk,
            file_name: file_name.into(),
        }
    }

    #[inline]
    pub fn is_asset(&self) -> bool {
        self.kind == OutputKind::Asset
    }
}

/// Ordered `key → descriptor` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleManifest {
    entries: Vec<(String, OutputEntry)>,
}

impl BundleManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; a repeated key is kept as a separate, later entry.
    pub fn insert(&mut self, key: impl Into<String>, entry: OutputEntry) {
        self.entries.push((key.into(), entry));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OutputEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse from JSON, keeping document order.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let entries = map
            .into_iter()
            .map(|(key, value)| serde_json::from_value::<OutputEntry>(value).map(|entry| (key, entry)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn from_path(path: &Path) -> Result<Self, PreloadError> {
        let json = fs::read_to_string(path).map_err(|e| PreloadError::Io(path.to_path_buf(), e))?;
        Ok(Self::from_json(&json)?)
    }
}

impl<K: Into<String>> FromIterator<(K, OutputEntry)> for BundleManifest {
    fn from_iter<I: IntoIterator<Item = (K, OutputEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_json_preserves_order() {
        let json = r#"{
            "public/images/z.png": { "type": "asset", "fileName": "assets/z.1.png" },
            "src/main.ts": { "type": "chunk", "fileName": "assets/main.2.js", "isEntry": true },
            "public/images/a.png": { "type": "asset", "fileName": "assets/a.3.png", "source": [] }
        }"#;

        let manifest = BundleManifest::from_json(json).unwrap();
        let keys: Vec<_> = manifest.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["public/images/z.png", "src/main.ts", "public/images/a.png"]
        );

        let (_, main) = manifest.iter().nth(1).unwrap();
        assert_eq!(main, &OutputEntry::chunk("assets/main.2.js"));
    }

    #[test]
    fn test_unknown_output_kind() {
        let json = r#"{ "x": { "type": "prebuilt-chunk", "fileName": "x.js" } }"#;
        let manifest = BundleManifest::from_json(json).unwrap();
        let (_, entry) = manifest.iter().next().unwrap();
        assert_eq!(entry.kind, OutputKind::Other);
        assert!(!entry.is_asset());
    }

    #[test]
    fn test_from_json_rejects_missing_file_name() {
        let json = r#"{ "a.png": { "type": "asset" } }"#;
        assert!(BundleManifest::from_json(json).is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bundle.json");
        fs::write(
            &path,
            r#"{ "public/images/a.png": { "type": "asset", "fileName": "assets/a.3f2a1b.png" } }"#,
        )
        .unwrap();

        let manifest = BundleManifest::from_path(&path).unwrap();
        assert_eq!(manifest.len(), 1);

        let err = BundleManifest::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, PreloadError::Io(..)));
    }
}
