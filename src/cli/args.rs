//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use img_preload::Command;

/// Inject image preload hints into generated HTML
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: search upward for preload.toml)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Inject preload tags into built HTML files (production pass)
    #[command(visible_alias = "b")]
    Build {
        /// Bundle manifest JSON used to resolve hashed file names
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        manifest: Option<PathBuf>,

        /// Print results to stdout instead of rewriting files in place
        #[arg(long)]
        stdout: bool,

        /// HTML files to transform
        #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
        files: Vec<PathBuf>,
    },

    /// Transform one HTML document as the development server would and print it
    #[command(visible_alias = "s")]
    Serve {
        /// HTML file to transform
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
}

impl Commands {
    /// Host command this subcommand stands in for.
    pub fn host_command(&self) -> Command {
        match self {
            Self::Build { .. } => Command::Build,
            Self::Serve { .. } => Command::Serve,
        }
    }
}
