//! Built-in architecture rules.
//!
//! | Code | Name | Active when |
//! |------|------|-------------|
//! | LL001 | `forbidden-import` | always (test files only with `test_files.lint`) |
//! | LL002 | `unused-package` | `detect_unused` |
//! | LL003 | `shared-external-import` | `shared_external_imports.detect` |
//! | LL004 | `whitebox-test` | `test_files.lint` and `test_files.require_blackbox` |
//! | LL005 | `test-naming-orphan` | `test_files.lint` and `strict_test_naming` |
//! | LL006 | `misplaced-test` | `test_files.lint` and `location = "separate"` |
//! | LL007 | `missing-directory` | `structure.required_directories` is non-empty |
//! | LL008 | `unexpected-directory` | `allow_other_directories = false` |
//! | LL009 | `insufficient-coverage` | `coverage.enabled` |

use crate::config::{ResolvedConfig, TestLocation};
use crate::rule::RuleBox;

mod coverage;
mod layering;
mod naming;
mod shared_imports;
mod structure;
mod test_files;
mod unused;

pub use coverage::CoverageRule;
pub use layering::ForbiddenImportRule;
pub use naming::TestNamingRule;
pub use shared_imports::SharedExternalImportRule;
pub use structure::{RequiredDirectoriesRule, UnexpectedDirectoriesRule};
pub use test_files::{TestLocationRule, WhiteboxTestRule, BLACKBOX_GUIDANCE};
pub use unused::UnusedPackageRule;

/// Returns the rules the configuration switches on.
#[must_use]
pub fn default_rules(config: &ResolvedConfig) -> Vec<RuleBox> {
    let rules = &config.rules;
    let tests = &rules.test_files;
    let mut result: Vec<RuleBox> = vec![Box::new(ForbiddenImportRule)];

    if rules.detect_unused {
        result.push(Box::new(UnusedPackageRule));
    }
    if rules.shared_imports.detect {
        result.push(Box::new(SharedExternalImportRule));
    }
    if tests.lint && tests.require_blackbox {
        result.push(Box::new(WhiteboxTestRule));
    }
    if tests.lint && rules.strict_test_naming {
        result.push(Box::new(TestNamingRule));
    }
    if tests.lint && tests.location == TestLocation::Separate {
        result.push(Box::new(TestLocationRule));
    }
    if !config.structure.required_directories.is_empty() {
        result.push(Box::new(RequiredDirectoriesRule));
    }
    if !config.structure.allow_other_directories {
        result.push(Box::new(UnexpectedDirectoriesRule));
    }
    if rules.coverage.enabled {
        result.push(Box::new(CoverageRule));
    }

    result
}

/// Returns every built-in rule, in code order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ForbiddenImportRule),
        Box::new(UnusedPackageRule),
        Box::new(SharedExternalImportRule),
        Box::new(WhiteboxTestRule),
        Box::new(TestNamingRule),
        Box::new(TestLocationRule),
        Box::new(RequiredDirectoriesRule),
        Box::new(UnexpectedDirectoriesRule),
        Box::new(CoverageRule),
    ]
}


#[cfg(test)]
mod tests {
    use super::fixtures::config;
    use super::*;

    #[test]
    fn default_rules_follow_flags() {
        let names = |c: &ResolvedConfig| -> Vec<&'static str> {
            default_rules(c).iter().map(|r| r.name()).collect()
        };

        let minimal = config("");
        assert_eq!(names(&minimal), vec!["forbidden-import"]);

        let strict = config("[structure]\nallow_other_directories = false\n");
        assert_eq!(names(&strict), vec!["forbidden-import", "unexpected-directory"]);

        let full = config(
            r#"
[structure]
required_directories = { cmd = "entry points" }

[rules]
detect_unused = true
strict_test_naming = true

[rules.shared_external_imports]
detect = true

[rules.test_files]
lint = true
require_blackbox = true
location = "separate"

[rules.coverage]
enabled = true
"#,
        );
        assert_eq!(
            names(&full),
            vec![
                "forbidden-import",
                "unused-package",
                "shared-external-import",
                "whitebox-test",
                "test-naming-orphan",
                "misplaced-test",
                "missing-directory",
                "insufficient-coverage",
            ]
        );
    }

    #[test]
    fn naming_requires_test_linting() {
        let c = config("[rules]\nstrict_test_naming = true\n");
        assert!(default_rules(&c).iter().all(|r| r.name() != "test-naming-orphan"));
    }

    #[test]
    fn all_rules_are_in_code_order() {
        let codes: Vec<&str> = all_rules().iter().map(|r| r.code()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
        assert_eq!(codes.len(), 9);
    }
}
