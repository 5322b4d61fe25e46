//! Rule trait for defining architecture rules.

use crate::context::RuleContext;
use crate::types::{Severity, Violation, ViolationKind};

/// A graph-wide architecture rule.
///
/// Rules receive the whole graph and the resolved configuration through a
/// [`RuleContext`] and return the violations they find. Ordering of the
/// returned violations does not matter; the validator sorts them.
///
/// # Example
///
/// ```ignore
/// use layer_lint_core::{Rule, RuleContext, Severity, Violation, ViolationKind};
///
/// pub struct NoRootFiles;
///
/// impl Rule for NoRootFiles {
///     fn kind(&self) -> ViolationKind { ViolationKind::UnexpectedDirectory }
///
///     fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
///         ctx.graph
///             .files_in(".")
///             .map(|n| {
///                 Violation::new(self.kind(), Severity::Error, "file at module root")
///                     .with_file(&n.path)
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// The kind of violation this rule reports.
    fn kind(&self) -> ViolationKind;

    /// Returns the kebab-case name of this rule (e.g., "forbidden-import").
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the rule code (e.g., "LL001").
    fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks the graph and returns any violations found.
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRule;

    impl Rule for TestRule {
        fn kind(&self) -> ViolationKind {
            ViolationKind::MissingDirectory
        }

        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, _ctx: &RuleContext<'_>) -> Vec<Violation> {
            vec![Violation::new(
                self.kind(),
                self.default_severity(),
                "Test violation",
            )]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "missing-directory");
        assert_eq!(rule.code(), "LL007");
        assert_eq!(rule.default_severity(), Severity::Error);
    }
}
