//! List rules command implementation.

use layer_lint_core::config::Preset;
use layer_lint_core::rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for preset in Preset::ALL {
        println!("  {:<12} - {}", preset.name(), preset.description());
    }

    println!("\nStart from a preset with:");
    println!("  layer-lint init --preset clean-arch");
}
