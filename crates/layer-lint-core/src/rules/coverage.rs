//! Coverage threshold rule.

use crate::context::RuleContext;
use crate::coverage::threshold_for;
use crate::graph::strip_module;
use crate::rule::Rule;
use crate::types::{Suggestion, Violation, ViolationKind};

/// Reports packages whose measured coverage is below their threshold.
///
/// Thresholds resolve hierarchically through
/// [`threshold_for`](crate::coverage::threshold_for). Records for packages
/// outside the analyzed module are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageRule;

impl Rule for CoverageRule {
    fn kind(&self) -> ViolationKind {
        ViolationKind::InsufficientCoverage
    }

    fn description(&self) -> &'static str {
        "Requires package coverage to meet the configured thresholds"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let policy = &ctx.config.rules.coverage;
        if !policy.enabled {
            return Vec::new();
        }
        let module = ctx.config.module.as_str();

        let mut records: Vec<_> = ctx
            .coverage
            .iter()
            .filter_map(|record| strip_module(&record.package, module).map(|rel| (rel, record)))
            .collect();
        records.sort_by(|a, b| a.0.cmp(&b.0));

        records
            .into_iter()
            .filter_map(|(relative, record)| {
                let threshold = threshold_for(
                    &record.package,
                    module,
                    policy.threshold,
                    &policy.package_thresholds,
                );
                if record.coverage >= threshold {
                    return None;
                }
                let detail = if record.has_tests { "" } else { " (no tests)" };
                Some(
                    Violation::new(
                        self.kind(),
                        self.default_severity(),
                        format!(
                            "package {relative} coverage {:.1}% is below {threshold:.1}%{detail}",
                            record.coverage
                        ),
                    )
                    .with_file(relative)
                    .with_suggestion(Suggestion::new(if record.has_tests {
                        "add tests for the uncovered code"
                    } else {
                        "add a test file for this package"
                    })),
                )
            })
            .collect()
    }
}
