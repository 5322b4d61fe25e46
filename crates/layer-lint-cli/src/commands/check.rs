//! Check command implementation.

use anyhow::{Context, Result};
use layer_lint_core::{should_fail, Graph, SourceScanner, Validator};
use std::path::Path;

use crate::inputs::{read_coverage, ManifestScanner};
use crate::project::Project;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    files: &Path,
    coverage: Option<&Path>,
    format: OutputFormat,
    project: &Project,
) -> Result<()> {
    let config = project.load_config()?;

    let scanned = ManifestScanner::new(files)
        .scan(path)
        .context("Scanning failed")?;
    let graph = Graph::build(&scanned, &config.module);

    let mut builder = Validator::builder();
    if let Some(coverage_path) = coverage {
        if config.rules.coverage.enabled {
            builder = builder.coverage(read_coverage(coverage_path)?);
        } else {
            tracing::warn!("--coverage given but [rules.coverage] is not enabled; ignoring");
        }
    }
    let validator = builder
        .config(config)
        .build()
        .context("Failed to build validator")?;

    tracing::info!(
        "Checking {} with {} rules from {}",
        path.display(),
        validator.rule_count(),
        project.config_path().display()
    );

    let report = validator.validate(&graph);
    super::output::print(&report, format)?;

    if should_fail(&report.violations, validator.config()) {
        std::process::exit(1);
    }

    Ok(())
}
