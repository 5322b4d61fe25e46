//! Test isolation rules.

use crate::config::TestLocation;
use crate::context::RuleContext;
use crate::rule::Rule;
use crate::types::{Suggestion, Violation, ViolationKind};

/// Guidance surfaced once per run when a whitebox test is found and the
/// configuration carries no guidance text of its own.
pub const BLACKBOX_GUIDANCE: &str = "Blackbox tests live in a `<package>_test` package and \
use only the exported API of the package under test. This keeps tests honest about the \
public surface and lets the package change its internals freely.";

const TEST_SUFFIX: &str = "_test";

/// Reports test files declared in the production package.
///
/// Directories without a production file have nothing to be whitebox
/// against and are never reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhiteboxTestRule;

impl Rule for WhiteboxTestRule {
    fn kind(&self) -> ViolationKind {
        ViolationKind::WhiteboxTest
    }

    fn description(&self) -> &'static str {
        "Requires test files to use the `<package>_test` package"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        ctx.linted_tests()
            .filter(|node| {
                ctx.production_package(node.directory()) == Some(node.package.as_str())
            })
            .map(|node| {
                let required = format!("{}{TEST_SUFFIX}", node.package);
                Violation::new(
                    self.kind(),
                    self.default_severity(),
                    format!(
                        "whitebox test: {} declares package `{}`, expected `{required}`",
                        node.path, node.package
                    ),
                )
                .with_file(&node.path)
                .with_suggestion(Suggestion::new(format!(
                    "rename the package to `{required}` and import the package under test"
                )))
            })
            .collect()
    }
}

/// Reports test files outside a `test`/`tests` directory when tests must be
/// kept separate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestLocationRule;

fn in_test_directory(path: &str) -> bool {
    path.rsplit_once('/').is_some_and(|(dir, _)| {
        dir.split('/')
            .any(|segment| segment == "test" || segment == "tests")
    })
}

impl Rule for TestLocationRule {
    fn kind(&self) -> ViolationKind {
        ViolationKind::MisplacedTest
    }

    fn description(&self) -> &'static str {
        "Requires test files under a test directory when location is `separate`"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        if ctx.config.rules.test_files.location != TestLocation::Separate {
            return Vec::new();
        }
        ctx.linted_tests()
            .filter(|node| !in_test_directory(&node.path))
            .map(|node| {
                Violation::new(
                    self.kind(),
                    self.default_severity(),
                    format!("test file {} is not under a test directory", node.path),
                )
                .with_file(&node.path)
                .with_suggestion(Suggestion::new("move it under `test/` or `tests/`"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::{config, file, run};

    const BLACKBOX: &str = r#"
[rules.test_files]
lint = true
require_blackbox = true
"#;

    #[test]
    fn whitebox_test_reported_with_rename() {
        let files = vec![
            file("internal/app/app.go", "app", &[]),
            file("internal/app/app_test.go", "app", &[]),
        ];
        let violations = run(&WhiteboxTestRule, &files, &config(BLACKBOX));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("`app_test`"));
        assert_eq!(
            violations[0].file.as_deref(),
            Some("internal/app/app_test.go")
        );
    }

    #[test]
    fn blackbox_test_passes() {
        let files = vec![
            file("internal/user/user.go", "user", &[]),
            file("internal/user/user_test.go", "user_test", &["@/internal/user"]),
        ];
        assert!(run(&WhiteboxTestRule, &files, &config(BLACKBOX)).is_empty());
    }

    #[test]
    fn test_only_directory_is_never_whitebox() {
        let files = vec![
            file("e2e/flow_test.go", "e2e", &[]),
            file("e2e/api_test.go", "e2e_test", &[]),
        ];
        assert!(run(&WhiteboxTestRule, &files, &config(BLACKBOX)).is_empty());
    }

    #[test]
    fn nothing_reported_without_test_linting() {
        let files = vec![
            file("internal/app/app.go", "app", &[]),
            file("internal/app/app_test.go", "app", &[]),
        ];
        let c = config("[rules.test_files]\nrequire_blackbox = true\n");
        assert!(run(&WhiteboxTestRule, &files, &c).is_empty());
    }

    #[test]
    fn separate_location_requires_test_directory() {
        let c = config("[rules.test_files]\nlint = true\nlocation = \"separate\"\n");
        let files = vec![
            file("internal/app/app_test.go", "app_test", &[]),
            file("tests/app/app_test.go", "app_test", &[]),
            file("internal/app/test/helpers_test.go", "test", &[]),
        ];
        let violations = run(&TestLocationRule, &files, &c);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].file.as_deref(),
            Some("internal/app/app_test.go")
        );
    }

    #[test]
    fn colocated_location_imposes_nothing() {
        let c = config("[rules.test_files]\nlint = true\n");
        let files = vec![file("internal/app/app_test.go", "app_test", &[])];
        assert!(run(&TestLocationRule, &files, &c).is_empty());
    }

    #[test]
    fn test_directory_detection() {
        assert!(in_test_directory("test/a_test.go"));
        assert!(in_test_directory("pkg/x/tests/a_test.go"));
        assert!(!in_test_directory("a_test.go"));
        assert!(!in_test_directory("testdata/a_test.go"));
    }
}
