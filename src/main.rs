//! Twinmark - a terminal editor that toggles between rich text and markdown.
//!
//! # Usage
//!
//! ```bash
//! twinmark
//! twinmark notes.html
//! twinmark --markdown README.md
//! twinmark --no-preview --save
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use twinmark::app::{App, Seed};
use twinmark::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A terminal editor that toggles between rich text and raw markdown
#[derive(Parser, Debug)]
#[command(name = "twinmark", version, about, long_about = None)]
struct Cli {
    /// Initial content: .md/.markdown files are read as markdown, anything
    /// else as HTML
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Switch to markdown mode right after startup
    #[arg(long)]
    markdown: bool,

    /// Never show the preview pane
    #[arg(long)]
    no_preview: bool,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH", env = "TWINMARK_DEBUG_LOG")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(debug_log: Option<&Path>) -> Result<()> {
    let Some(path) = debug_log else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to open debug log {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,twinmark=debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_seed(path: &Path) -> Result<Seed> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let is_markdown = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"));
    Ok(if is_markdown {
        Seed::Markdown(content)
    } else {
        Seed::Html(content)
    })
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();

    let mut cli_flags = parse_flag_tokens(&raw_args);
    // The env var only reaches clap, not the raw tokens.
    if cli_flags.debug_log.is_none() {
        cli_flags.debug_log.clone_from(&cli.debug_log);
    }

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

    init_logging(effective.debug_log.as_deref())?;

    let seed = cli.file.as_deref().map(load_seed).transpose()?;

    let mut app = App::new()
        .with_seed(seed)
        .with_markdown_mode(effective.markdown)
        .with_preview(!effective.no_preview)
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    app.run().context("Application error")
}
