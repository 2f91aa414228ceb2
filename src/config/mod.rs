//! Plugin configuration for `preload.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error      # ConfigError
//! ├── util       # config file lookup, prefix derivation
//! └── mod.rs     # PreloadConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! directory = "public/images"   # relative to project root
//! prefix = "/images/"           # optional, derived from `directory` when omitted
//! prefix_style = "derived"      # or "fixed" (always "/images/")
//! hash = true                   # resolve hashed names from the build manifest
//! enable_in_development = false # also inject during `serve`
//! include = "^hero"             # optional file name regex
//! exclude = "-draft\\."         # optional file name regex
//! ```
//!
//! The resolved [`PreloadConfig`] is immutable: it is built once and shared
//! by every transform.

pub mod error;
mod util;

pub use error::ConfigError;
pub use util::{derive_prefix, find_config_file};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Default config file name searched for upward from the working directory.
pub const CONFIG_FILE: &str = "preload.toml";

/// Default image directory, relative to the project root.
pub const DEFAULT_DIRECTORY: &str = "public/images";

/// Prefix used by [`PrefixStyle::Fixed`].
pub const FIXED_PREFIX: &str = "/images/";

// ============================================================================
// Filter
// ============================================================================

type FilterFn = dyn Fn(&str, &Path) -> bool + Send + Sync;

/// Caller-supplied predicate over `(file_name, absolute_path)`.
#[derive(Clone)]
pub struct Filter(Arc<FilterFn>);

impl Filter {
    pub fn new(f: impl Fn(&str, &Path) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Build a filter from optional include/exclude regular expressions.
    ///
    /// Returns `None` when neither pattern is set.
    pub fn from_patterns(
        include: Option<&str>,
        exclude: Option<&str>,
    ) -> Result<Option<Self>, ConfigError> {
        let compile = |field: &'static str, pattern: Option<&str>| {
            pattern
                .map(Regex::new)
                .transpose()
                .map_err(|source| ConfigError::Pattern { field, source })
        };
        let include = compile("include", include)?;
        let exclude = compile("exclude", exclude)?;

        if include.is_none() && exclude.is_none() {
            return Ok(None);
        }

        Ok(Some(Self::new(move |name, _| {
            include.as_ref().is_none_or(|re| re.is_match(name))
                && !exclude.as_ref().is_some_and(|re| re.is_match(name))
        })))
    }

    #[inline]
    pub fn matches(&self, name: &str, path: &Path) -> bool {
        (self.0)(name, path)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

// ============================================================================
// Prefix style
// ============================================================================

/// How the URL prefix is chosen when none is given explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixStyle {
    /// Last segment of `directory`, wrapped in slashes.
    #[default]
    Derived,
    /// Always [`FIXED_PREFIX`].
    Fixed,
}

impl PrefixStyle {
    pub fn prefix_for(self, directory: &str) -> String {
        match self {
            Self::Derived => derive_prefix(directory),
            Self::Fixed => FIXED_PREFIX.to_string(),
        }
    }
}

// ============================================================================
// preload.toml
// ============================================================================

/// Raw contents of `preload.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreloadFile {
    pub directory: Option<String>,
    pub prefix: Option<String>,
    pub prefix_style: PrefixStyle,
    pub hash: bool,
    pub enable_in_development: bool,
    pub include: Option<String>,
    pub exclude: Option<String>,
}

impl PreloadFile {
    /// Convert into a builder rooted at `root`.
    pub fn into_builder(
        self,
        root: impl Into<PathBuf>,
    ) -> Result<PreloadConfigBuilder, ConfigError> {
        let filter = Filter::from_patterns(self.include.as_deref(), self.exclude.as_deref())?;
        let mut builder = PreloadConfig::builder()
            .root(root)
            .prefix_style(self.prefix_style)
            .hash(self.hash)
            .enable_in_development(self.enable_in_development);
        if let Some(directory) = self.directory {
            builder = builder.directory(directory);
        }
        if let Some(prefix) = self.prefix {
            builder = builder.prefix(prefix);
        }
        if let Some(filter) = filter {
            builder = builder.filter(filter);
        }
        Ok(builder)
    }
}

// ============================================================================
// resolved configuration
// ============================================================================

/// Resolved plugin configuration.
#[derive(Debug, Clone)]
pub struct PreloadConfig {
    /// Project root; `directory` is resolved against it.
    pub root: PathBuf,
    /// Image directory, relative to `root`.
    pub directory: PathBuf,
    /// URL prefix prepended to every preloaded file name.
    pub prefix: String,
    pub filter: Option<Filter>,
    /// Resolve content-hashed names from the build manifest.
    pub hash: bool,
    /// Also inject during development serving.
    pub enable_in_development: bool,
}

impl PreloadConfig {
    pub fn builder() -> PreloadConfigBuilder {
        PreloadConfigBuilder::default()
    }

    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Otherwise [`CONFIG_FILE`]
    /// is searched upward from the working directory; if none is found,
    /// defaults rooted at the working directory are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::Io(PathBuf::from("."), e))?;

        if let Some(path) = explicit {
            return Self::from_path(&cwd.join(path));
        }

        match find_config_file(&cwd, Path::new(CONFIG_FILE)) {
            Some(path) => Self::from_path(&path),
            None => Self::builder().root(cwd).build(),
        }
    }

    /// Load configuration from a file; its parent directory becomes the root.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_toml(&content, root)
    }

    pub fn from_toml(content: &str, root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let file: PreloadFile = toml::from_str(content)?;
        file.into_builder(root)?.build()
    }

    /// Absolute image directory scanned on every transform.
    pub fn image_dir(&self) -> PathBuf {
        self.root.join(&self.directory)
    }
}

/// Builder for [`PreloadConfig`], for hosts embedding the plugin directly.
#[derive(Debug, Default)]
pub struct PreloadConfigBuilder {
    root: Option<PathBuf>,
    directory: Option<String>,
    prefix: Option<String>,
    prefix_style: PrefixStyle,
    filter: Option<Filter>,
    hash: bool,
    enable_in_development: bool,
}

impl PreloadConfigBuilder {
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn prefix_style(mut self, style: PrefixStyle) -> Self {
        self.prefix_style = style;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn hash(mut self, hash: bool) -> Self {
        self.hash = hash;
        self
    }

    pub fn enable_in_development(mut self, enable: bool) -> Self {
        self.enable_in_development = enable;
        self
    }

    /// Validate and normalize. The prefix is derived here, once.
    pub fn build(self) -> Result<PreloadConfig, ConfigError> {
        let directory = self
            .directory
            .unwrap_or_else(|| DEFAULT_DIRECTORY.to_string());

        if directory.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation(
                "`directory` must not be empty".into(),
            ));
        }
        if Path::new(&directory).is_absolute() {
            return Err(ConfigError::Validation(format!(
                "`directory` must be relative to the project root, got `{directory}`"
            )));
        }

        let prefix = match self.prefix {
            Some(prefix) if prefix.is_empty() => {
                return Err(ConfigError::Validation(
                    "`prefix` must not be empty".into(),
                ));
            }
            Some(prefix) => prefix,
            None => self.prefix_style.prefix_for(&directory),
        };

        let root = match self.root {
            Some(root) => root,
            None => {
                std::env::current_dir().map_err(|e| ConfigError::Io(PathBuf::from("."), e))?
            }
        };

        Ok(PreloadConfig {
            root,
            directory: PathBuf::from(directory),
            prefix,
            filter: self.filter,
            hash: self.hash,
            enable_in_development: self.enable_in_development,
        })
    }
}

// ============================================================================
// tests
// ============================================================================
