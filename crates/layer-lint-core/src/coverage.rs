//! Coverage records and hierarchical threshold lookup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::ROOT_PACKAGE;

/// Coverage measured for one package by an external tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageCoverage {
    /// Full package import path.
    pub package: String,
    /// Statement coverage, 0–100.
    pub coverage: f64,
    /// Whether the package has any test files.
    pub has_tests: bool,
}

impl PackageCoverage {
    /// Record for a package whose measurement failed: 0% and no tests.
    #[must_use]
    pub fn unmeasured(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            coverage: 0.0,
            has_tests: false,
        }
    }
}

/// Resolves the coverage threshold for a package.
///
/// The module prefix is stripped (the module root becomes `.`), then keys are
/// tried from the full relative path down to its first segment. The first
/// exact key found wins; otherwise `default` applies.
///
/// ```
/// use std::collections::BTreeMap;
/// use layer_lint_core::threshold_for;
///
/// let per_package = BTreeMap::from([("cmd".to_string(), 40.0)]);
/// assert_eq!(threshold_for("mod/cmd/foo/bar", "mod", 70.0, &per_package), 40.0);
/// ```
#[must_use]
pub fn threshold_for(
    package_path: &str,
    module: &str,
    default: f64,
    per_package: &BTreeMap<String, f64>,
) -> f64 {
    let relative = relative_package(package_path, module);
    if relative == ROOT_PACKAGE {
        return per_package.get(ROOT_PACKAGE).copied().unwrap_or(default);
    }

    let segments: Vec<&str> = relative.split('/').collect();
    (1..=segments.len())
        .rev()
        .find_map(|n| per_package.get(&segments[..n].join("/")).copied())
        .unwrap_or(default)
}

/// Strips `module/` from a package path; the module itself maps to `.`.
/// Paths outside the module are returned unchanged.
fn relative_package<'a>(package_path: &'a str, module: &str) -> &'a str {
    if package_path == module {
        return ROOT_PACKAGE;
    }
    package_path
        .strip_prefix(module)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(package_path)
}
