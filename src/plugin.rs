//! Host build tool integration.
//!
//! A host drives the plugin through two hooks: [`HtmlPlugin::apply`] decides
//! whether the plugin runs for a command, and
//! [`HtmlPlugin::transform_index_html`] is called once per HTML document.

use crate::asset::BundleManifest;
use crate::config::PreloadConfig;
use crate::debug;
use crate::pipeline::Pipeline;

pub const PLUGIN_NAME: &str = "img-preload";

/// Host command the plugin is being run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Production build; a bundle manifest is available.
    Build,
    /// Development server; no manifest.
    Serve,
}

/// Position of the plugin relative to the host's own HTML transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforce {
    Pre,
    Post,
}

/// Per-document context supplied by the host.
#[derive(Debug, Clone, Copy)]
pub struct HtmlContext<'a> {
    /// Output path of the document being transformed.
    pub path: &'a str,
    /// Emitted outputs, present only during a production build.
    pub bundle: Option<&'a BundleManifest>,
}

impl<'a> HtmlContext<'a> {
    pub fn serve(path: &'a str) -> Self {
        Self { path, bundle: None }
    }

    pub fn build(path: &'a str, bundle: Option<&'a BundleManifest>) -> Self {
        Self { path, bundle }
    }
}

/// HTML transform hooks a host build tool invokes.
pub trait HtmlPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn enforce(&self) -> Option<Enforce> {
        None
    }

    /// Whether the plugin is active for `command`.
    fn apply(&self, command: Command) -> bool;

    /// Transform one HTML document. Must not fail.
    fn transform_index_html(&self, html: &str, ctx: &HtmlContext<'_>) -> String;
}

/// Injects `<link rel="preload">` hints for every image in the configured directory.
#[derive(Debug, Clone)]
pub struct ImgPreloadPlugin {
    config: PreloadConfig,
}

impl ImgPreloadPlugin {
    pub fn new(config: PreloadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreloadConfig {
        &self.config
    }
}

impl HtmlPlugin for ImgPreloadPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn enforce(&self) -> Option<Enforce> {
        Some(Enforce::Pre)
    }

    fn apply(&self, command: Command) -> bool {
        match command {
            Command::Build => true,
            Command::Serve => self.config.enable_in_development,
        }
    }

    fn transform_index_html(&self, html: &str, ctx: &HtmlContext<'_>) -> String {
        debug!("preload"; "transforming {}", ctx.path);
        Pipeline::new(&self.config).transform(html, ctx.bundle)
    }
}
