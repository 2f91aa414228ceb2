//! Production pass: inject preload tags into emitted HTML files.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

use img_preload::{BundleManifest, Command, HtmlContext, HtmlPlugin};

use img_preload::log;

/// Where transformed documents go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    InPlace,
    Stdout,
}

/// Transform every file in parallel; returns `(path, html)` in input order.
pub fn transform_files(
    plugin: &dyn HtmlPlugin,
    files: &[PathBuf],
    manifest: Option<&Path>,
) -> Result<Vec<(PathBuf, String)>> {
    let bundle = manifest
        .map(|path| {
            BundleManifest::from_path(path)
                .with_context(|| format!("failed to load bundle manifest `{}`", path.display()))
        })
        .transpose()?;

    let active = plugin.apply(Command::Build);

    files
        .par_iter()
        .map(|path| -> Result<(PathBuf, String)> {
            let html = fs::read_to_string(path)
                .with_context(|| format!("failed to read `{}`", path.display()))?;
            if !active {
                return Ok((path.clone(), html));
            }
            let key = path.to_string_lossy();
            let ctx = HtmlContext::build(&key, bundle.as_ref());
            Ok((path.clone(), plugin.transform_index_html(&html, &ctx)))
        })
        .collect()
}

/// Run the `build` subcommand.
pub fn run_build(
    plugin: &dyn HtmlPlugin,
    files: &[PathBuf],
    manifest: Option<&Path>,
    output: Output,
) -> Result<()> {
    let results = transform_files(plugin, files, manifest)?;

    match output {
        Output::Stdout => {
            for (_, html) in &results {
                println!("{html}");
            }
        }
        Output::InPlace => {
            for (path, html) in &results {
                fs::write(path, html)
                    .with_context(|| format!("failed to write `{}`", path.display()))?;
            }
            log!("build"; "processed {} html file{}", results.len(),
                if results.len() == 1 { "" } else { "s" });
        }
    }

    Ok(())
}
