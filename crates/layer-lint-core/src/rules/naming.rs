//! Test naming correspondence.
//!
//! A test file `X_test` must sit next to an implementation file `X`. The
//! inverse, an implementation without a test, is left to coverage.

use std::collections::BTreeSet;

use crate::context::RuleContext;
use crate::rule::Rule;
use crate::types::{Suggestion, Violation, ViolationKind};

/// Reports test files without a same-named implementation sibling.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestNamingRule;

impl Rule for TestNamingRule {
    fn kind(&self) -> ViolationKind {
        ViolationKind::TestNamingOrphan
    }

    fn description(&self) -> &'static str {
        "Requires every `X_test` file to have an `X` sibling"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let implementations: BTreeSet<(&str, &str)> = ctx
            .graph
            .nodes()
            .iter()
            .filter(|n| !n.is_test)
            .map(|n| (n.directory(), n.base_name.as_str()))
            .collect();

        ctx.linted_tests()
            .filter_map(|node| {
                let subject = node.base_name.strip_suffix("_test")?;
                if implementations.contains(&(node.directory(), subject)) {
                    return None;
                }
                Some(
                    Violation::new(
                        self.kind(),
                        self.default_severity(),
                        format!("{}: no corresponding implementation file", node.path),
                    )
                    .with_file(&node.path)
                    .with_suggestion(Suggestion::new(format!(
                        "add {subject} next to it or rename the test after the file it covers"
                    ))),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::{config, file, run};

    const STRICT: &str = "[rules]\nstrict_test_naming = true\n\n[rules.test_files]\nlint = true\n";

    #[test]
    fn orphan_test_reported() {
        let files = vec![
            file("internal/app/bar.go", "app", &[]),
            file("internal/app/foo_test.go", "app_test", &[]),
        ];
        let violations = run(&TestNamingRule, &files, &config(STRICT));
        assert_eq!(violations.len(), 1);
        assert!(violations[0]
            .message
            .contains("no corresponding implementation file"));
    }

    #[test]
    fn untested_implementation_is_fine() {
        let files = vec![file("internal/app/foo.go", "app", &[])];
        assert!(run(&TestNamingRule, &files, &config(STRICT)).is_empty());
    }

    #[test]
    fn sibling_must_share_directory() {
        let files = vec![
            file("internal/a/foo.go", "a", &[]),
            file("internal/a/foo_test.go", "a_test", &[]),
            file("internal/b/foo_test.go", "b_test", &[]),
        ];
        let violations = run(&TestNamingRule, &files, &config(STRICT));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].file.as_deref(), Some("internal/b/foo_test.go"));
    }
}
