//! img-preload - command-line host for the image preload plugin.

mod cli;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::Output};
use img_preload::{ImgPreloadPlugin, PreloadConfig, logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = PreloadConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let plugin = ImgPreloadPlugin::new(config);

    match &cli.command {
        Commands::Build {
            manifest,
            stdout,
            files,
        } => {
            let output = if *stdout { Output::Stdout } else { Output::InPlace };
            cli::build::run_build(&plugin, files, manifest.as_deref(), output)
        }
        Commands::Serve { file } => {
            let html = cli::serve::serve_document(&plugin, file)?;
            println!("{html}");
            Ok(())
        }
    }
}
