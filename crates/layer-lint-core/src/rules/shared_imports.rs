//! Shared external import detection.
//!
//! An external import consumed from two or more layers couples those layers
//! to the same third-party surface. Imports in the configured exclusion set
//! (exact paths or glob patterns) are never reported; files outside every
//! layer do not count as consumers.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::SharedImportMode;
use crate::context::RuleContext;
use crate::rule::Rule;
use crate::types::{Severity, Suggestion, Violation, ViolationKind};

/// Reports external imports used by more than one layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedExternalImportRule;

impl Rule for SharedExternalImportRule {
    fn kind(&self) -> ViolationKind {
        ViolationKind::SharedExternalImport
    }

    fn description(&self) -> &'static str {
        "Reports external imports shared across layers"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let policy = &ctx.config.rules.shared_imports;
        let severity = match policy.mode {
            SharedImportMode::Warn => Severity::Warning,
            SharedImportMode::Error => Severity::Error,
        };

        let mut consumers: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for node in ctx.linted_files() {
            let Some(layer) = ctx.classifier.classify(&node.path) else {
                continue;
            };
            for dep in node.external_dependencies() {
                consumers
                    .entry(dep.import_path.as_str())
                    .or_default()
                    .insert(layer);
            }
        }

        consumers
            .into_iter()
            .filter(|(_, layers)| layers.len() >= 2)
            .filter(|(import, _)| !policy.exclusions.matches(import))
            .map(|(import, layers)| {
                let names: Vec<&str> = layers.into_iter().collect();
                Violation::new(
                    self.kind(),
                    severity,
                    format!(
                        "external import \"{import}\" is used by {} layers ({})",
                        names.len(),
                        names.join(", ")
                    ),
                )
                .with_import(import)
                .with_suggestion(Suggestion::new(
                    "wrap it behind one layer, or add it to shared_external_imports.exclusions",
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::{config, file, run};

    fn setup(extra: &str) -> crate::config::ResolvedConfig {
        config(&format!(
            r#"
[rules]
directories_import = {{ cmd = ["internal"], internal = [] }}

[rules.shared_external_imports]
detect = true
{extra}
"#
        ))
    }

    fn two_layers() -> Vec<crate::scanner::ScannedFile> {
        vec![
            file("cmd/main.go", "main", &["github.com/acme/log", "fmt"]),
            file("internal/repo/repo.go", "repo", &["github.com/acme/log"]),
        ]
    }

    #[test]
    fn cross_layer_import_reported_once() {
        let violations = run(&SharedExternalImportRule, &two_layers(), &setup(""));
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.import.as_deref(), Some("github.com/acme/log"));
        assert!(v.message.contains("2 layers"), "{}", v.message);
        assert_eq!(v.severity, Severity::Warning);
    }

    #[test]
    fn error_mode_raises_severity() {
        let violations = run(
            &SharedExternalImportRule,
            &two_layers(),
            &setup("mode = \"error\""),
        );
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn exact_and_glob_exclusions() {
        let exact = setup("exclusions = [\"github.com/acme/log\"]");
        assert!(run(&SharedExternalImportRule, &two_layers(), &exact).is_empty());

        let glob = setup("exclusion_patterns = [\"github.com/acme/*\"]");
        assert!(run(&SharedExternalImportRule, &two_layers(), &glob).is_empty());
    }

    #[test]
    fn same_layer_consumers_are_fine() {
        let files = vec![
            file("internal/a/a.go", "a", &["github.com/acme/log"]),
            file("internal/b/b.go", "b", &["github.com/acme/log"]),
        ];
        assert!(run(&SharedExternalImportRule, &files, &setup("")).is_empty());
    }

    #[test]
    fn unclassified_consumers_do_not_count() {
        let files = vec![
            file("cmd/main.go", "main", &["github.com/acme/log"]),
            file("scripts/gen.go", "main", &["github.com/acme/log"]),
        ];
        assert!(run(&SharedExternalImportRule, &files, &setup("")).is_empty());
    }

    #[test]
    fn test_files_count_only_when_linted() {
        let files = vec![
            file("cmd/main.go", "main", &["github.com/acme/assert"]),
            file("internal/a/a_test.go", "a_test", &["github.com/acme/assert"]),
        ];
        assert!(run(&SharedExternalImportRule, &files, &setup("")).is_empty());

        let linted = config(
            r#"
[rules]
directories_import = { cmd = ["internal"], internal = [] }

[rules.shared_external_imports]
detect = true

[rules.test_files]
lint = true
"#,
        );
        assert_eq!(run(&SharedExternalImportRule, &files, &linted).len(), 1);
    }
}
