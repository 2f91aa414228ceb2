//! Per-document preload pipeline.
//!
//! ```text
//! scan ─► filter ─► resolve ─► render ─► splice
//!  │        │
//!  │        └─ NoMatches ────────┐
//!  └─ DirectoryMissing ──────────┴─► input returned unchanged
//! ```
//!
//! Nothing is cached between calls: every document re-scans the directory.
//! [`Pipeline::transform`] never fails; a malfunctioning pipeline only means
//! the document gets no preload tags.

pub mod head;

use std::error::Error as _;
use std::panic::{self, AssertUnwindSafe};

use crate::asset::{BundleManifest, resolve_urls, scan_images};
use crate::config::PreloadConfig;
use crate::error::PreloadError;
use crate::{debug, log};

pub use head::HeadInjector;

/// Successful pipeline result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    /// Preload block spliced after `<head>`.
    Modified(String),
    /// Document has no `<head>` tag; left as is.
    NoHead,
}

pub struct Pipeline<'a> {
    config: &'a PreloadConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a PreloadConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline, reporting why a document was left untouched.
    pub fn try_transform(
        &self,
        html: &str,
        bundle: Option<&BundleManifest>,
    ) -> Result<Injection, PreloadError> {
        let config = self.config;
        let dir = config.image_dir();

        let files = scan_images(&dir, config.filter.as_ref())?;
        if files.is_empty() {
            return Err(PreloadError::NoMatches(config.directory.clone()));
        }

        let urls = resolve_urls(&files, bundle, &config.prefix, config.hash);
        debug!("preload"; "{} image(s) from {}", urls.len(), dir.display());

        Ok(match HeadInjector::new(&urls).inject(html) {
            Some(out) => Injection::Modified(out),
            None => Injection::NoHead,
        })
    }

    /// Fail-open transform: any failure is logged once and `html` is returned unchanged.
    pub fn transform(&self, html: &str, bundle: Option<&BundleManifest>) -> String {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.try_transform(html, bundle)))
            .unwrap_or_else(|payload| Err(PreloadError::Panicked(panic_message(&*payload))));

        match result {
            Ok(Injection::Modified(out)) => out,
            Ok(Injection::NoHead) => {
                debug!("preload"; "no <head> tag, skipped");
                html.to_string()
            }
            Err(e) if e.is_warning() => {
                log!("warning"; "{}", e);
                html.to_string()
            }
            Err(e) => {
                log!("error"; "{}", error_chain(&e));
                html.to_string()
            }
        }
    }
}

/// Format an error with its sources, `outer: inner: root`.
fn error_chain(err: &PreloadError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::OutputEntry;
    use crate::config::Filter;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const HTML: &str = "<html><head></head><body/></html>";

    fn site(images: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        let images_dir = dir.path().join("public/images");
        fs::create_dir_all(&images_dir).unwrap();
        for name in images {
            fs::write(images_dir.join(name), b"fake image").unwrap();
        }
        dir
    }

    fn config(root: &Path) -> PreloadConfig {
        PreloadConfig::builder().root(root).build().unwrap()
    }

    fn scan_order(root: &Path) -> Vec<String> {
        scan_images(&root.join("public/images"), None).unwrap()
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path());
        let pipeline = Pipeline::new(&config);

        let err = pipeline.try_transform(HTML, None).unwrap_err();
        assert!(matches!(err, PreloadError::DirectoryMissing(_)));
        assert!(err.is_warning());
        assert_eq!(pipeline.transform(HTML, None), HTML);
    }

    #[test]
    fn test_no_matches() {
        let dir = site(&["readme.txt", "style.css"]);
        let config = config(dir.path());
        let pipeline = Pipeline::new(&config);

        let err = pipeline.try_transform(HTML, None).unwrap_err();
        assert!(matches!(err, PreloadError::NoMatches(_)));
        assert_eq!(pipeline.transform(HTML, None), HTML);
    }

    #[test]
    fn test_filter_rejecting_everything_is_no_matches() {
        let dir = site(&["a.png"]);
        let config = PreloadConfig::builder()
            .root(dir.path())
            .filter(Filter::new(|_, _| false))
            .build()
            .unwrap();

        let err = Pipeline::new(&config).try_transform(HTML, None).unwrap_err();
        assert!(matches!(err, PreloadError::NoMatches(_)));
    }

    #[test]
    fn test_no_head_unchanged() {
        let dir = site(&["a.png"]);
        let config = config(dir.path());
        let pipeline = Pipeline::new(&config);
        let html = "<html><body>x</body></html>";

        assert_eq!(pipeline.try_transform(html, None).unwrap(), Injection::NoHead);
        assert_eq!(pipeline.transform(html, None), html);
    }

    #[test]
    fn test_end_to_end() {
        let dir = site(&["logo.png", "banner.jpg", "notes.txt"]);
        let config = config(dir.path());
        let order = scan_order(dir.path());

        let out = Pipeline::new(&config).transform(HTML, None);

        let tags: String = order
            .iter()
            .map(|f| format!("\n    <link rel=\"preload\" href=\"/images/{f}\" as=\"image\" />"))
            .collect();
        let expected = format!(
            "<html><head>\n    <!-- Preload images (img-preload) -->{tags}</head><body/></html>"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_one_tag_per_file_after_head() {
        let dir = site(&["a.png", "b.webp", "c.svg"]);
        let config = config(dir.path());
        let html = "<html><head><title>t</title></head><body>b</body></html>";

        let out = Pipeline::new(&config).transform(html, None);
        assert_eq!(out.matches("<link rel=\"preload\"").count(), 3);

        let head_end = out.find("<head>").unwrap() + "<head>".len();
        let title = out.find("<title>").unwrap();
        for name in ["a.png", "b.webp", "c.svg"] {
            let pos = out.find(&format!("/images/{name}")).unwrap();
            assert!(pos > head_end && pos < title);
        }
    }

    #[test]
    fn test_repeated_transform_is_not_idempotent() {
        let dir = site(&["a.png"]);
        let config = config(dir.path());
        let pipeline = Pipeline::new(&config);

        let first = pipeline.transform(HTML, None);
        let second = pipeline.transform(&first, None);
        assert_eq!(first.matches("<!-- Preload images").count(), 1);
        assert_eq!(second.matches("<!-- Preload images").count(), 2);
    }

    #[test]
    fn test_hashed_build() {
        let dir = site(&["a.png", "b.png"]);
        let config = PreloadConfig::builder()
            .root(dir.path())
            .hash(true)
            .build()
            .unwrap();
        let bundle: BundleManifest = [(
            "public/images/a.png",
            OutputEntry::asset("assets/a.3f2a1b.png"),
        )]
        .into_iter()
        .collect();

        let out = Pipeline::new(&config).transform(HTML, Some(&bundle));
        assert!(out.contains(r#"href="/images/assets/a.3f2a1b.png""#));
        assert!(out.contains(r#"href="/images/b.png""#));
    }

    #[test]
    fn test_filter_predicate() {
        let dir = site(&["hero1.png", "other.png"]);
        let config = PreloadConfig::builder()
            .root(dir.path())
            .filter(Filter::new(|name, _| name.starts_with("hero")))
            .build()
            .unwrap();

        let out = Pipeline::new(&config).transform(HTML, None);
        assert!(out.contains("/images/hero1.png"));
        assert!(!out.contains("other.png"));
    }

    #[test]
    fn test_panicking_filter_fails_open() {
        let dir = site(&["a.png"]);
        let config = PreloadConfig::builder()
            .root(dir.path())
            .filter(Filter::new(|_, _| panic!("filter exploded")))
            .build()
            .unwrap();

        assert_eq!(Pipeline::new(&config).transform(HTML, None), HTML);
    }

    #[test]
    fn test_error_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PreloadError::Io("public/images".into(), io);
        assert_eq!(
            error_chain(&err),
            "IO error when reading `public/images`: denied"
        );
    }

    fn payload_of(f: impl FnOnce() + panic::UnwindSafe) -> Box<dyn std::any::Any + Send> {
        panic::catch_unwind(f).unwrap_err()
    }

    #[test]
    fn test_panic_message() {
        let payload = payload_of(|| panic!("static message"));
        assert_eq!(panic_message(&*payload), "static message");

        let payload = payload_of(|| panic!("formatted {}", 42));
        assert_eq!(panic_message(&*payload), "formatted 42");
    }
}
