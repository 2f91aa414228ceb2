//! Logging utilities with colored output.
//!
//! Diagnostics go to stderr so that transformed HTML can be piped from stdout.
//!
//! # Example
//!
//! ```ignore
//! log!("warning"; "Directory not found: {}", dir.display());
//! debug!("preload"; "{} image(s)", count);
//! ```

use owo_colors::{OwoColorize, Stream};
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let mut stderr = stderr().lock();
    writeln!(stderr, "{}", format_line(module, message)).ok();
    stderr.flush().ok();
}

/// Format a log line: `[plugin:module] message`
fn format_line(module: &str, message: &str) -> String {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());
    format!("{prefix} {message}")
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{}:{module}]", crate::plugin::PLUGIN_NAME);
    let out = Stream::Stderr;
    match module_lower {
        "build" => prefix.if_supports_color(out, |p| p.bright_blue().bold().to_string()).to_string(),
        "serve" => prefix.if_supports_color(out, |p| p.bright_green().bold().to_string()).to_string(),
        "error" => prefix.if_supports_color(out, |p| p.bright_red().bold().to_string()).to_string(),
        _ => prefix.if_supports_color(out, |p| p.bright_yellow().bold().to_string()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_plain() {
        owo_colors::set_override(false);
        assert_eq!(
            format_line("warning", "No images matched in: public/images"),
            "[img-preload:warning] No images matched in: public/images"
        );
    }

    #[test]
    fn test_verbose_flag() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
