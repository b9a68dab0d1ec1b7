//! docu — print Markdown documentation extracted from a Python source file.
//!
//! `docu module.py > module.md`

use anyhow::Result;
use clap::Parser;
use docu::ExtractorConfig;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docu",
    version,
    about = "Extract Markdown documentation from Python docstrings and #' comments"
)]
struct Cli {
    /// Python source file to document
    file: Option<PathBuf>,

    /// Close the YAML front matter even when no date line follows the author
    #[arg(long)]
    close_front_matter: bool,

    /// Number of leading lines searched for the module docstring
    #[arg(long, default_value_t = docu::config::FRONT_MATTER_WINDOW)]
    window: usize,

    /// Log rule decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(path) = cli.file.as_deref() else {
        // No input is not an error: show how to call it.
        println!("Usage: docu <FILE>");
        println!("Try 'docu --help' for more information.");
        return Ok(());
    };

    let config = ExtractorConfig {
        front_matter_window: cli.window,
        close_front_matter: cli.close_front_matter,
        ..ExtractorConfig::default()
    };

    let stdout = io::stdout();
    docu::extract_file(path, stdout.lock(), config)?;
    Ok(())
}

/// Log to stderr so stdout carries only Markdown.
fn init_tracing(verbose: bool) {
    let default = if verbose { "docu=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
