//! Build verdict.

use crate::config::ResolvedConfig;
use crate::types::{Violation, ViolationKind};

/// Returns true if the violations should fail the build.
///
/// An empty list passes. A non-empty list fails unless every violation is a
/// shared external import and the shared-import mode is `warn`.
#[must_use]
pub fn should_fail(violations: &[Violation], config: &ResolvedConfig) -> bool {
    if violations.is_empty() {
        return false;
    }
    let only_shared = violations
        .iter()
        .all(|v| v.kind == ViolationKind::SharedExternalImport);
    !(only_shared && config.shared_imports_warn_only())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SharedImportMode;
    use crate::types::Severity;

    fn violation(kind: ViolationKind) -> Violation {
        Violation::new(kind, Severity::Error, "x")
    }

    fn config(mode: SharedImportMode) -> ResolvedConfig {
        let mut config = ResolvedConfig::empty("example.com/app");
        config.rules.shared_imports.mode = mode;
        config
    }

    #[test]
    fn empty_passes() {
        assert!(!should_fail(&[], &config(SharedImportMode::Error)));
    }

    #[test]
    fn shared_only_follows_mode() {
        let shared = vec![
            violation(ViolationKind::SharedExternalImport),
            violation(ViolationKind::SharedExternalImport),
        ];
        assert!(!should_fail(&shared, &config(SharedImportMode::Warn)));
        assert!(should_fail(&shared, &config(SharedImportMode::Error)));
    }

    #[test]
    fn any_other_kind_fails() {
        let mixed = vec![
            violation(ViolationKind::SharedExternalImport),
            violation(ViolationKind::UnusedPackage),
        ];
        assert!(should_fail(&mixed, &config(SharedImportMode::Warn)));
    }
}
