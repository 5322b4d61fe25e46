//! Directory-import layering rule.
//!
//! # Rationale
//!
//! Each configured layer lists the closed set of layers it may import. A layer
//! omitted from its own allow-list forbids its packages from importing each
//! other.
//!
//! # Exemptions
//!
//! - Source or target directories outside every layer
//! - Imports matched by `rules.exclude_imports`
//! - For test files: imports in `test_files.exempt_imports`, and a blackbox
//!   test's import of the package under test

use crate::context::RuleContext;
use crate::graph::{Dependency, FileNode};
use crate::rule::Rule;
use crate::types::{Suggestion, Violation, ViolationKind};

/// Reports local imports that cross a layer boundary the matrix forbids.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForbiddenImportRule;

impl ForbiddenImportRule {
    fn is_exempt(ctx: &RuleContext<'_>, node: &FileNode, dep: &Dependency) -> bool {
        if ctx.config.rules.exclude_imports.matches(&dep.import_path) {
            return true;
        }
        if !node.is_test {
            return false;
        }
        if ctx
            .config
            .rules
            .test_files
            .exempt_imports
            .contains(&dep.import_path)
        {
            return true;
        }
        dep.local_path == node.directory() && Self::tests_own_package(ctx, node)
    }

    /// Whether `node` is the blackbox test package of its own directory.
    ///
    /// Without a production file to compare against, any `_test` package
    /// qualifies.
    fn tests_own_package(ctx: &RuleContext<'_>, node: &FileNode) -> bool {
        let Some(subject) = node.package.strip_suffix("_test") else {
            return false;
        };
        ctx.production_package(node.directory())
            .map_or(true, |production| production == subject)
    }
}

impl Rule for ForbiddenImportRule {
    fn kind(&self) -> ViolationKind {
        ViolationKind::ForbiddenImport
    }

    fn description(&self) -> &'static str {
        "Forbids local imports the directory-import matrix does not allow"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();

        for node in ctx.linted_files() {
            let Some(from) = ctx.classifier.classify(&node.path) else {
                continue;
            };

            for dep in node.local_dependencies() {
                if Self::is_exempt(ctx, node, dep) {
                    continue;
                }
                let Some(to) = ctx.classifier.classify_dir(&dep.local_path) else {
                    continue;
                };
                if ctx.classifier.is_allowed(from, to) {
                    continue;
                }

                let allowed = ctx.classifier.allowed(from);
                let help = if allowed.is_empty() {
                    format!("`{from}` may not import any layer")
                } else {
                    format!("`{from}` may import: {}", allowed.join(", "))
                };

                violations.push(
                    Violation::new(
                        self.kind(),
                        self.default_severity(),
                        format!(
                            "{from} -> {to} dependency not allowed: {} imports {}",
                            node.path, dep.local_path
                        ),
                    )
                    .with_file(&node.path)
                    .with_import(&dep.import_path)
                    .with_layers(from, to)
                    .with_suggestion(Suggestion::new(help)),
                );
            }
        }

        violations
    }
}
