//! Shared output formatting for validation reports.

use anyhow::Result;
use layer_lint_core::ValidationReport;

use crate::OutputFormat;

/// Print a validation report in the specified format.
pub fn print(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print!("{}", report.render_compact()),
    }
    Ok(())
}

fn print_text(report: &ValidationReport) {
    let (errors, warnings, infos) = report.count_by_severity();

    for violation in &report.violations {
        println!("{}", violation.format());
    }

    if let Some(guidance) = &report.guidance {
        println!("\x1b[36mnote\x1b[0m: {guidance}\n");
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, report.files_checked
    );
}

fn print_json(report: &ValidationReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
