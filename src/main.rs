//! # Study Index CLI (`study-index`)
//!
//! Builds the JSON indexes consumed by the study-materials app.
//!
//! ## Usage
//!
//! ```bash
//! study-index --config ./study-index.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `study-index init` | Write an example configuration file |
//! | `study-index sources` | Show content root, category folders and manifest status |
//! | `study-index build` | Scan the content root and write both index files |
//! | `study-index classify <path>...` | Show how individual paths are indexed |
//!
//! Diagnostics (skipped files, manifest problems) go to stderr through
//! `tracing`; set `RUST_LOG=debug` for per-file layout matches.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use study_index::config::{self, EXAMPLE_CONFIG};
use study_index::ingest::{self, BuildOptions};
use study_index::sources;

/// Study Index: builds static JSON indexes of question papers and notes.
///
/// Without `--config`, `./study-index.toml` is used when present and the
/// built-in defaults (content root `./public`) otherwise.
#[derive(Parser)]
#[command(
    name = "study-index",
    about = "Build static JSON indexes of question papers and lecture notes",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the content root from the configuration.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an example configuration file.
    ///
    /// Writes to `--config` (default `./study-index.toml`). Refuses to
    /// overwrite an existing file.
    Init,

    /// List configured inputs and their status.
    Sources,

    /// Scan the content root and write `pyq-index.json` and `notes-index.json`.
    ///
    /// Every run recomputes both indexes from scratch. Files that fit no
    /// known layout are skipped and reported on stderr.
    Build {
        /// Classify and count without writing any files.
        #[arg(long)]
        dry_run: bool,
    },

    /// Classify paths relative to the content root and print the resulting
    /// entry, or the reason the path would be skipped.
    Classify {
        /// Paths such as `pyq/cse/sem4/afl/mid/AFL_MIDSEM_2023.pdf`.
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Init = cli.command {
        let path = cli
            .config
            .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        std::fs::write(&path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let mut cfg = config::resolve_config(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        cfg.content.root = root;
    }

    match cli.command {
        Commands::Init => {
            // Handled above (before config loading)
            unreachable!()
        }
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
        Commands::Build { dry_run } => {
            ingest::run_build(&cfg, BuildOptions { dry_run })?;
        }
        Commands::Classify { paths } => {
            ingest::run_classify(&cfg, &paths)?;
        }
    }

    Ok(())
}
