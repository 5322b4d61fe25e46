//! Resolved configuration: the single canonical rule-set every component reads.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::utils::patterns::ImportMatcher;

/// The result of merging a preset with overrides (or of a flat document).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Module identity; imports under it are local.
    pub module: String,
    /// Preset the configuration was derived from, if any.
    pub preset: Option<String>,
    /// Directory layout expectations.
    pub structure: Structure,
    /// Rule switches and policies.
    pub rules: Rules,
    /// Narrative guidance.
    pub guidance: Guidance,
}

/// Directory layout expectations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structure {
    /// Required directories and their descriptions.
    pub required_directories: BTreeMap<String, String>,
    /// Whether other top-level directories are tolerated.
    pub allow_other_directories: bool,
}

/// Rule switches and policies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rules {
    /// Layer → closed set of layers it may import.
    pub directories_import: BTreeMap<String, Vec<String>>,
    /// Local imports skipped by the layering check.
    pub exclude_imports: ImportMatcher,
    /// Report local packages unreachable from entry files.
    pub detect_unused: bool,
    /// Require `X_test` files to have an `X` sibling.
    pub strict_test_naming: bool,
    /// Cross-layer external import policy.
    pub shared_imports: SharedImportPolicy,
    /// Test file policy.
    pub test_files: TestFilePolicy,
    /// Coverage policy.
    pub coverage: CoveragePolicy,
}

/// How shared external imports affect the verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SharedImportMode {
    /// Report, but do not fail the build on these alone.
    #[default]
    Warn,
    /// Report and fail the build.
    Error,
}

impl SharedImportMode {
    /// Parses a configuration value; empty means the default.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for SharedImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warn => f.write_str("warn"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Cross-layer external import policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedImportPolicy {
    /// Enables detection.
    pub detect: bool,
    /// Verdict mode.
    pub mode: SharedImportMode,
    /// Imports never reported.
    pub exclusions: ImportMatcher,
}

/// Where test files are expected to live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TestLocation {
    /// Next to the code under test.
    #[default]
    Colocated,
    /// Under a `test` or `tests` directory.
    Separate,
    /// Anywhere.
    Any,
}

impl TestLocation {
    /// Parses a configuration value; empty means the default.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "colocated" => Some(Self::Colocated),
            "separate" => Some(Self::Separate),
            "any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// Test file policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestFilePolicy {
    /// Apply the rules to test files.
    pub lint: bool,
    /// Expected location.
    pub location: TestLocation,
    /// Report whitebox tests.
    pub require_blackbox: bool,
    /// Imports test files may always use.
    pub exempt_imports: BTreeSet<String>,
}

/// Coverage policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoveragePolicy {
    /// Enables the coverage rule.
    pub enabled: bool,
    /// Default minimum percentage.
    pub threshold: f64,
    /// Module-relative package path → minimum percentage.
    pub package_thresholds: BTreeMap<String, f64>,
}

/// Narrative guidance attached to the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Guidance {
    /// One-line description.
    pub description: String,
    /// Principles, in order.
    pub principles: Vec<String>,
    /// Free-form guidance text.
    pub text: String,
}

impl ResolvedConfig {
    /// Creates an empty configuration for a module: no layers, no rules.
    #[must_use]
    pub fn empty(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            preset: None,
            structure: Structure {
                required_directories: BTreeMap::new(),
                allow_other_directories: true,
            },
            rules: Rules::default(),
            guidance: Guidance::default(),
        }
    }

    /// Configured layer names.
    pub fn layers(&self) -> impl Iterator<Item = &str> {
        self.rules.directories_import.keys().map(String::as_str)
    }

    /// Returns true if shared external imports should not fail the build.
    #[must_use]
    pub fn shared_imports_warn_only(&self) -> bool {
        self.rules.shared_imports.mode == SharedImportMode::Warn
    }
}
