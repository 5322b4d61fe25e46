//! layer-lint CLI tool.
//!
//! Usage:
//! ```bash
//! layer-lint check [OPTIONS] --files <JSON> [PATH]
//! layer-lint graph --files <JSON> [PATH]
//! layer-lint list-rules
//! layer-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod inputs;
mod project;

/// Layered architecture linter driven by a directory-import matrix
#[derive(Parser)]
#[command(name = "layer-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the project against its layer rules
    Check {
        /// Project root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Scanned files as a JSON array, relative to the project root
        #[arg(long, env = "LAYER_LINT_FILES")]
        files: PathBuf,

        /// Package coverage as a JSON array
        #[arg(long)]
        coverage: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the dependency graph as JSON
    Graph {
        /// Project root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Scanned files as a JSON array, relative to the project root
        #[arg(long, env = "LAYER_LINT_FILES")]
        files: PathBuf,

        /// Attach used symbols to each import
        #[arg(long)]
        symbols: bool,
    },

    /// List available rules and presets
    ListRules,

    /// Initialize configuration file
    Init {
        /// Preset to start from
        #[arg(long, default_value = "standard")]
        preset: String,

        /// Write the preset's full rule-set instead of a reference to it
        #[arg(long)]
        flat: bool,

        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for validation results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            files,
            coverage,
            format,
        } => {
            let project = project::Project::discover(&path, cli.config.as_deref())?;
            commands::check::run(&path, &files, coverage.as_deref(), format, &project)
        }
        Commands::Graph {
            path,
            files,
            symbols,
        } => {
            let project = project::Project::discover(&path, cli.config.as_deref())?;
            commands::graph::run(&path, &files, symbols, &project)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init {
            preset,
            flat,
            force,
        } => commands::init::run(&preset, flat, force),
    }
}
