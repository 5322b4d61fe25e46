//! Init command implementation.

use anyhow::{bail, Context, Result};
use layer_lint_core::config::Preset;
use std::path::Path;

const CONFIG_NAME: &str = "layer-lint.toml";

/// Renders a config that references `preset` and leaves room for overrides.
fn preset_template(preset: Preset) -> String {
    format!(
        r#"# layer-lint configuration
# Preset: {description}

preset = "{name}"

# Module identity. Detected from go.mod when omitted.
# module = "example.com/app"

# Overrides are merged into the preset:
#   maps add or replace entries, lists are unioned,
#   non-empty strings replace, booleans can only be switched on.

# [overrides.rules]
# exclude_imports = ["example.com/app/internal/generated/*"]

# [overrides.rules.shared_external_imports]
# exclusions = ["github.com/google/uuid"]

# [overrides.rules.test_files]
# exempt_imports = ["example.com/app/internal/testutil"]
"#,
        description = preset.description(),
        name = preset.name(),
    )
}

/// Renders the preset's full rule-set as a flat config.
fn flat_template(preset: Preset) -> Result<String> {
    let body = toml::to_string_pretty(&preset.ruleset())
        .context("Failed to render preset rule-set")?;
    Ok(format!(
        "# layer-lint configuration\n# Expanded from preset \"{}\"\n\n{body}",
        preset.name()
    ))
}

/// Runs the init command.
pub fn run(preset_name: &str, flat: bool, force: bool) -> Result<()> {
    let Some(preset) = Preset::from_name(preset_name) else {
        let available: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
        bail!(
            "Unknown preset `{preset_name}` (available: {})",
            available.join(", ")
        );
    };

    let config_path = Path::new(CONFIG_NAME);
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = if flat {
        flat_template(preset)?
    } else {
        preset_template(preset)
    };
    std::fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_NAME} from preset {}", preset.name());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to match your layers");
    println!("  2. Run: layer-lint check --files <scanned-files.json>");

    Ok(())
}
