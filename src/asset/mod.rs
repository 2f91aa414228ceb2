//! Image asset discovery and URL resolution.

mod kind;
pub mod manifest;
mod resolve;
mod scan;

// Types
pub use kind::{ImageExt, is_image};
pub use manifest::{BundleManifest, OutputEntry, OutputKind};

// Scanning (pure functions)
pub use scan::scan_images;

// Resolution (pure functions)
pub use resolve::{hashed_names, resolve_urls};
