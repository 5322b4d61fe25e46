//! Graph command implementation.

use anyhow::{Context, Result};
use layer_lint_core::{Graph, SourceScanner};
use std::path::Path;

use crate::inputs::ManifestScanner;
use crate::project::Project;

/// Runs the graph command: prints the dependency graph as JSON.
pub fn run(path: &Path, files: &Path, symbols: bool, project: &Project) -> Result<()> {
    let config = project.load_config()?;
    let scanned = ManifestScanner::new(files)
        .scan(path)
        .context("Scanning failed")?;

    let graph = if symbols {
        Graph::build_detailed(&scanned, &config.module)
    } else {
        Graph::build(&scanned, &config.module)
    };

    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}
