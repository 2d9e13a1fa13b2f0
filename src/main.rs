//! mpad - A small vi-style text editor for the terminal.
//!
//! # Usage
//!
//! ```bash
//! mpad main.c
//! mpad --number notes.txt
//! mpad --log-file mpad.log --save
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use mpad::app::App;
use mpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A small vi-style text editor
#[derive(Parser, Debug)]
#[command(name = "mpad", version, about, long_about = None)]
struct Cli {
    /// File to edit (created on first write if missing)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Show line numbers
    #[arg(short, long)]
    number: bool,

    /// Disable syntax highlighting
    #[arg(long)]
    no_highlight: bool,

    /// Write log events to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as global defaults
    #[arg(long)]
    save: bool,

    /// Clear saved global defaults
    #[arg(long)]
    clear: bool,
}

// stderr shares the screen with the editor, so without a log file nothing
// is emitted unless RUST_LOG asks for it.
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let default_level = if log_file.is_some() {
        LevelFilter::INFO
    } else {
        LevelFilter::OFF
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
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

    init_logging(effective.log_file.as_ref())?;
    tracing::info!(
        file = ?cli.file,
        number = effective.number,
        highlight = !effective.no_highlight,
        "starting mpad"
    );

    let mut app = App::new(cli.file)
        .with_line_numbers(effective.number)
        .with_highlight(!effective.no_highlight);

    app.run().context("Application error")
}
