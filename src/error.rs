//! Transform error types.
//!
//! Every variant is recovered inside [`Pipeline::transform`]; callers of the
//! plugin never see them. They surface only through
//! [`Pipeline::try_transform`] so that failure modes stay testable.
//!
//! [`Pipeline::transform`]: crate::pipeline::Pipeline::transform
//! [`Pipeline::try_transform`]: crate::pipeline::Pipeline::try_transform

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreloadError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryMissing(PathBuf),

    #[error("No images matched in: {}", .0.display())]
    NoMatches(PathBuf),

    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Bundle manifest error")]
    Manifest(#[from] serde_json::Error),

    #[error("Panicked while preloading: {0}")]
    Panicked(String),
}

impl PreloadError {
    /// Expected conditions reported as warnings rather than errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::DirectoryMissing(_) | Self::NoMatches(_))
    }
}
