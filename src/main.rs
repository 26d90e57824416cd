//! Caretpad - a minimal terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! caretpad
//! caretpad notes.txt
//! caretpad --watch notes.txt
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use caretpad::app::App;
use caretpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use caretpad::perf;

/// A minimal terminal text editor
#[derive(Parser, Debug)]
#[command(name = "caretpad", version, about, long_about = None)]
struct Cli {
    /// Text file to edit; created on first save if missing
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Watch the file for external changes and reload
    #[arg(short, long)]
    watch: bool,

    /// Hide the line-number gutter
    #[arg(long)]
    no_gutter: bool,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write caret and frame debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
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

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

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

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("CARETPAD_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize render debug log {}: {}",
            render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    if let Some(path) = cli.file.as_deref()
        && path.is_dir()
    {
        anyhow::bail!("Not a file: {}", path.display());
    }

    let mut app = App::new(cli.file)
        .with_watch(effective.watch)
        .with_gutter_visible(!effective.no_gutter);

    app.run().context("Application error")
}
