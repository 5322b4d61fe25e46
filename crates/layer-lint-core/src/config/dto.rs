//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization and for merging a
//! preset with its overrides. They are converted to the resolved domain
//! model by the loader.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw configuration document, in either of its two shapes.
///
/// Flat documents carry `[structure]`, `[rules]` and `[guidance]` at the top
/// level. Preset documents carry `preset = "..."` plus an optional
/// `[overrides]` table with the same sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigDocumentDto {
    /// Explicit module identity.
    #[serde(default)]
    pub module: Option<String>,

    /// Built-in preset name.
    #[serde(default)]
    pub preset: Option<String>,

    /// Overrides applied on top of the preset.
    #[serde(default)]
    pub overrides: Option<RulesetDto>,

    /// Flat-shape structure section.
    #[serde(default)]
    pub structure: Option<StructureDto>,

    /// Flat-shape rules section.
    #[serde(default)]
    pub rules: Option<RulesDto>,

    /// Flat-shape guidance section.
    #[serde(default)]
    pub guidance: Option<GuidanceDto>,
}

/// One complete (or partial, when used as overrides) rule-set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesetDto {
    /// Directory layout expectations.
    #[serde(default)]
    pub structure: StructureDto,
    /// Rule switches and policies.
    #[serde(default)]
    pub rules: RulesDto,
    /// Narrative guidance.
    #[serde(default)]
    pub guidance: GuidanceDto,
}

/// `[structure]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureDto {
    /// Required top-level directories and what they hold.
    #[serde(default)]
    pub required_directories: BTreeMap<String, String>,
    /// Whether directories outside the required set and layers are tolerated.
    /// Unset means tolerated.
    #[serde(default)]
    pub allow_other_directories: Option<bool>,
}

/// `[rules]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesDto {
    /// Layer → layers it may import.
    #[serde(default)]
    pub directories_import: BTreeMap<String, Vec<String>>,
    /// Local imports skipped by the layering check (exact or glob).
    #[serde(default)]
    pub exclude_imports: Vec<String>,
    /// Report local packages unreachable from the entry files.
    #[serde(default)]
    pub detect_unused: bool,
    /// Require `X_test` files to have an `X` sibling.
    #[serde(default)]
    pub strict_test_naming: bool,
    /// Cross-layer external import policy.
    #[serde(default)]
    pub shared_external_imports: SharedImportsDto,
    /// Test file policy.
    #[serde(default)]
    pub test_files: TestFilesDto,
    /// Coverage policy.
    #[serde(default)]
    pub coverage: CoverageDto,
}

/// `[rules.shared_external_imports]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedImportsDto {
    /// Enables detection.
    #[serde(default)]
    pub detect: bool,
    /// `"warn"` or `"error"`.
    #[serde(default)]
    pub mode: String,
    /// Import paths never reported.
    #[serde(default)]
    pub exclusions: Vec<String>,
    /// Glob patterns of import paths never reported.
    #[serde(default)]
    pub exclusion_patterns: Vec<String>,
}

/// `[rules.test_files]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestFilesDto {
    /// Apply the rules to test files.
    #[serde(default)]
    pub lint: bool,
    /// `"colocated"`, `"separate"` or `"any"`.
    #[serde(default)]
    pub location: String,
    /// Report tests declared in the production package.
    #[serde(default)]
    pub require_blackbox: bool,
    /// Imports test files may always use.
    #[serde(default)]
    pub exempt_imports: Vec<String>,
}

/// `[rules.coverage]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageDto {
    /// Enables the coverage rule.
    #[serde(default)]
    pub enabled: bool,
    /// Default minimum percentage.
    #[serde(default)]
    pub threshold: f64,
    /// Module-relative package path → minimum percentage.
    #[serde(default)]
    pub package_thresholds: BTreeMap<String, f64>,
}

/// `[guidance]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidanceDto {
    /// One-line description of the architecture.
    #[serde(default)]
    pub description: String,
    /// Architectural principles, in order.
    #[serde(default)]
    pub principles: Vec<String>,
    /// Free-form guidance shown alongside test-isolation findings.
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_empty() {
        let dto: ConfigDocumentDto = toml::from_str("").unwrap();
        assert!(dto.preset.is_none());
        assert!(dto.rules.is_none());
        assert!(dto.overrides.is_none());
    }

    #[test]
    fn deserialize_flat_shape() {
        let dto: ConfigDocumentDto = toml::from_str(
            r#"
module = "example.com/app"

[structure]
required_directories = { cmd = "entry points" }

[rules]
directories_import = { cmd = ["internal"], internal = [] }
detect_unused = true

[rules.shared_external_imports]
detect = true
mode = "error"
exclusion_patterns = ["github.com/acme/*"]

[rules.coverage]
enabled = true
threshold = 70
package_thresholds = { "internal/domain" = 90.5 }
"#,
        )
        .unwrap();

        assert_eq!(dto.module.as_deref(), Some("example.com/app"));
        let rules = dto.rules.unwrap();
        assert_eq!(rules.directories_import.len(), 2);
        assert!(rules.detect_unused);
        assert_eq!(rules.shared_external_imports.mode, "error");
        assert!((rules.coverage.threshold - 70.0).abs() < f64::EPSILON);
        assert_eq!(
            rules.coverage.package_thresholds.get("internal/domain"),
            Some(&90.5)
        );
        assert!(dto.structure.is_some());
    }

    #[test]
    fn deserialize_preset_shape() {
        let dto: ConfigDocumentDto = toml::from_str(
            r#"
preset = "standard"

[overrides.rules.test_files]
lint = true
exempt_imports = ["example.com/app/internal/testutil"]
"#,
        )
        .unwrap();

        assert_eq!(dto.preset.as_deref(), Some("standard"));
        let overrides = dto.overrides.unwrap();
        assert!(overrides.rules.test_files.lint);
        assert_eq!(overrides.rules.test_files.exempt_imports.len(), 1);
        assert!(dto.rules.is_none());
    }
}
