//! Context passed to rules.

use crate::config::ResolvedConfig;
use crate::coverage::PackageCoverage;
use crate::graph::{FileNode, Graph};
use crate::layer::LayerClassifier;

/// Everything a rule may look at during one validation run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The dependency graph.
    pub graph: &'a Graph,
    /// The resolved configuration.
    pub config: &'a ResolvedConfig,
    /// Layer classifier built from the configuration.
    pub classifier: &'a LayerClassifier,
    /// Coverage records, empty unless supplied.
    pub coverage: &'a [PackageCoverage],
}

impl<'a> RuleContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub fn new(
        graph: &'a Graph,
        config: &'a ResolvedConfig,
        classifier: &'a LayerClassifier,
        coverage: &'a [PackageCoverage],
    ) -> Self {
        Self {
            graph,
            config,
            classifier,
            coverage,
        }
    }

    /// Production package declared in `dir`, taken from its first non-test file.
    #[must_use]
    pub fn production_package(&self, dir: &str) -> Option<&'a str> {
        self.graph
            .nodes()
            .iter()
            .find(|n| !n.is_test && n.directory() == dir)
            .map(|n| n.package.as_str())
    }

    /// Files the rules apply to: production files, plus test files when
    /// test linting is enabled.
    pub fn linted_files(&self) -> impl Iterator<Item = &'a FileNode> + 'a {
        let lint_tests = self.config.rules.test_files.lint;
        self.graph
            .nodes()
            .iter()
            .filter(move |n| !n.is_test || lint_tests)
    }

    /// Test files, when test linting is enabled; otherwise nothing.
    pub fn linted_tests(&self) -> impl Iterator<Item = &'a FileNode> + 'a {
        let lint_tests = self.config.rules.test_files.lint;
        self.graph
            .nodes()
            .iter()
            .filter(move |n| n.is_test && lint_tests)
    }
}
