//! Unused-package detection.
//!
//! Every non-test file declared in the program-entry package is a root. The
//! rule walks local imports of production files breadth-first and reports
//! each local package directory it never reaches.

use std::collections::{BTreeSet, VecDeque};

use crate::context::RuleContext;
use crate::rule::Rule;
use crate::types::{Suggestion, Violation, ViolationKind};

/// Package name of program entry points.
const ENTRY_PACKAGE: &str = "main";

/// Reports local packages unreachable from the program entry points.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnusedPackageRule;

impl Rule for UnusedPackageRule {
    fn kind(&self) -> ViolationKind {
        ViolationKind::UnusedPackage
    }

    fn description(&self) -> &'static str {
        "Reports local packages no entry point reaches"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let graph = ctx.graph;
        let production = || graph.nodes().iter().filter(|n| !n.is_test);

        let mut queue: VecDeque<String> = production()
            .filter(|n| n.package == ENTRY_PACKAGE)
            .map(|n| n.directory().to_string())
            .collect();
        if queue.is_empty() {
            tracing::warn!("No `{ENTRY_PACKAGE}` package found; every package is unreachable");
        }

        let mut visited: BTreeSet<String> = BTreeSet::new();
        while let Some(dir) = queue.pop_front() {
            if !visited.insert(dir.clone()) {
                continue;
            }
            for node in graph.files_in(&dir).filter(|n| !n.is_test) {
                for dep in node.local_dependencies() {
                    if !visited.contains(&dep.local_path) {
                        queue.push_back(dep.local_path.clone());
                    }
                }
            }
        }
        tracing::debug!("Reached {} packages from entry points", visited.len());

        graph
            .local_directories()
            .into_iter()
            .filter(|dir| !visited.contains(*dir))
            .map(|dir| {
                Violation::new(
                    self.kind(),
                    self.default_severity(),
                    format!("package {dir} is not reachable from any entry point"),
                )
                .with_file(dir)
                .with_suggestion(Suggestion::new(
                    "import it from an entry point or remove it",
                ))
            })
            .collect()
    }
}
