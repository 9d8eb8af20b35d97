//! inkmark - apply inline formatting to the selections in a scene.
//!
//! # Usage
//!
//! ```bash
//! inkmark scene.json
//! inkmark --preset bold scene.json
//! inkmark --style "background-color=#ffff00 & font-style=italic" --tag highlight scene.json
//! inkmark --report scene.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use inkmark::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use inkmark::frame::{Frame, apply_style};
use inkmark::scene::FrameSpec;
use inkmark::style::{Preset, WrapperTag};

/// Apply inline formatting to the selections in a scene
#[derive(Parser, Debug)]
#[command(name = "inkmark", version, about, long_about = None)]
struct Cli {
    /// JSON scene with frames, documents and selections
    #[arg(value_name = "SCENE")]
    scene: PathBuf,

    /// Use a style from the picker palette
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Style declarations, e.g. "font-weight=bold & color=red"
    #[arg(long, value_name = "DECLS")]
    style: Option<String>,

    /// Wrapper element to insert
    #[arg(long, value_enum)]
    tag: Option<WrapperTag>,

    /// Origin the formatting script runs as (defaults to the top frame's)
    #[arg(long, value_name = "ORIGIN")]
    viewer_origin: Option<String>,

    /// Print a JSON report instead of the formatted markup
    #[arg(long)]
    report: bool,

    /// Save current command-line flags as defaults in .inkmarkrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .inkmarkrc
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            preset: self.preset,
            style: self.style.clone(),
            tag: self.tag,
            viewer_origin: self.viewer_origin.clone(),
            report: self.report,
        }
    }
}

fn print_markup(root: &Frame) {
    let mut stack = vec![(root, 0usize)];
    while let Some((frame, depth)) = stack.pop() {
        println!(
            "{}== {} ({}) ==",
            "  ".repeat(depth),
            frame.name(),
            frame.origin()
        );
        println!("{}{}", "  ".repeat(depth), frame.document().to_markup());
        stack.extend(frame.children().iter().rev().map(|child| (child, depth + 1)));
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    let options = effective.format_options()?;

    if !cli.scene.exists() {
        anyhow::bail!("Scene not found: {}", cli.scene.display());
    }
    let source = std::fs::read_to_string(&cli.scene)
        .with_context(|| format!("Failed to read scene {}", cli.scene.display()))?;
    let mut root = FrameSpec::from_json_str(&source)
        .and_then(|spec| spec.build())
        .with_context(|| format!("Invalid scene {}", cli.scene.display()))?;

    let viewer_origin = effective
        .viewer_origin
        .clone()
        .unwrap_or_else(|| root.origin().to_string());
    let report = apply_style(&mut root, &viewer_origin, &options);
    tracing::info!(
        wrapped = report.wrapped(),
        failed = report.failures(),
        denied = report.denied.len(),
        "formatting finished"
    );

    if effective.report {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to encode report")?
        );
    } else {
        print_markup(&root);
    }
    Ok(())
}
