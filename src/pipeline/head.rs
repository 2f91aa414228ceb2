//! Preload tag injector (HTML string → HTML string).
//!
//! Inserts `<link rel="preload" as="image">` elements right after the first
//! opening `<head>` tag. No parsing is done: the document is spliced at the
//! end of the matched tag, so existing head children keep their order.
//!
//! A `<head>`-like string inside an earlier comment or script literal will
//! be matched too.

use std::sync::LazyLock;

use regex::Regex;

use crate::plugin::PLUGIN_NAME;

/// Indentation placed before each injected line.
const INDENT: &str = "    ";

/// First opening `<head>` tag, with or without attributes. `<header>` is not a match.
static HEAD_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head(?:\s[^>]*)?>").unwrap());

/// Marker comment preceding the injected block.
pub fn marker() -> String {
    format!("<!-- Preload images ({PLUGIN_NAME}) -->")
}

/// Render a single preload element.
#[inline]
pub fn preload_tag(href: &str) -> String {
    format!(r#"<link rel="preload" href="{href}" as="image" />"#)
}

/// Injects preload tags for a set of resolved URLs.
pub struct HeadInjector<'a> {
    urls: &'a [String],
}

impl<'a> HeadInjector<'a> {
    pub fn new(urls: &'a [String]) -> Self {
        Self { urls }
    }

    /// Render the block inserted after `<head>`: marker comment, then one tag per URL.
    pub fn render(&self) -> String {
        let mut block = format!("\n{INDENT}{}", marker());
        for url in self.urls {
            block.push('\n');
            block.push_str(INDENT);
            block.push_str(&preload_tag(url));
        }
        block
    }

    /// Splice the rendered block into `html`.
    ///
    /// Returns `None` when the document has no opening `<head>` tag.
    pub fn inject(&self, html: &str) -> Option<String> {
        let head = HEAD_OPEN.find(html)?;
        let block = self.render();

        let mut out = String::with_capacity(html.len() + block.len());
        out.push_str(&html[..head.end()]);
        out.push_str(&block);
        out.push_str(&html[head.end()..]);
        Some(out)
    }
}
