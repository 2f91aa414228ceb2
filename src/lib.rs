//! img-preload - inject `<link rel="preload">` hints for image assets into generated HTML.
//!
//! The plugin scans one image directory, optionally resolves content-hashed
//! output names from the host's bundle manifest, and splices preload tags
//! right after the document's `<head>` tag.
//!
//! ```ignore
//! use img_preload::{HtmlContext, HtmlPlugin, ImgPreloadPlugin, PreloadConfig};
//!
//! let config = PreloadConfig::builder().directory("public/images").build()?;
//! let plugin = ImgPreloadPlugin::new(config);
//! let html = plugin.transform_index_html(html, &HtmlContext::serve("/index.html"));
//! ```

pub mod asset;
pub mod config;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod plugin;

pub use asset::{BundleManifest, OutputEntry, OutputKind};
pub use config::{ConfigError, Filter, PrefixStyle, PreloadConfig};
pub use error::PreloadError;
pub use pipeline::{Injection, Pipeline};
pub use plugin::{Command, HtmlContext, HtmlPlugin, ImgPreloadPlugin};
