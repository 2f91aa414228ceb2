//! Development pass: transform a single document without a bundle manifest.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use img_preload::{Command, HtmlContext, HtmlPlugin};

use img_preload::debug;

/// Transform `file` as the development server would.
///
/// Passes the document through unchanged when the plugin is inactive for `serve`.
pub fn serve_document(plugin: &dyn HtmlPlugin, file: &Path) -> Result<String> {
    let html = fs::read_to_string(file)
        .with_context(|| format!("failed to read `{}`", file.display()))?;

    if !plugin.apply(Command::Serve) {
        debug!("serve"; "{} disabled in development, passing through", plugin.name());
        return Ok(html);
    }

    let key = format!("/{}", file.file_name().unwrap_or_default().to_string_lossy());
    Ok(plugin.transform_index_html(&html, &HtmlContext::serve(&key)))
}
