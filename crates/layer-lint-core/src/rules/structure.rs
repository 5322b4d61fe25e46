//! Directory layout rules driven by the `[structure]` section.

use std::collections::BTreeSet;

use crate::context::RuleContext;
use crate::rule::Rule;
use crate::types::{Suggestion, Violation, ViolationKind};

/// Reports required directories with no scanned file beneath them.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredDirectoriesRule;

impl Rule for RequiredDirectoriesRule {
    fn kind(&self) -> ViolationKind {
        ViolationKind::MissingDirectory
    }

    fn description(&self) -> &'static str {
        "Requires the configured directories to exist"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        ctx.config
            .structure
            .required_directories
            .iter()
            .filter(|(dir, _)| {
                let prefix = format!("{}/", dir.trim_end_matches('/'));
                !ctx.graph.nodes().iter().any(|n| n.path.starts_with(&prefix))
            })
            .map(|(dir, purpose)| {
                let message = if purpose.is_empty() {
                    format!("required directory {dir} is missing")
                } else {
                    format!("required directory {dir} is missing ({purpose})")
                };
                Violation::new(self.kind(), self.default_severity(), message).with_file(dir)
            })
            .collect()
    }
}

/// Reports top-level directories that are neither required nor a layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnexpectedDirectoriesRule;

impl Rule for UnexpectedDirectoriesRule {
    fn kind(&self) -> ViolationKind {
        ViolationKind::UnexpectedDirectory
    }

    fn description(&self) -> &'static str {
        "Forbids top-level directories outside the declared structure"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let structure = &ctx.config.structure;
        if structure.allow_other_directories {
            return Vec::new();
        }

        let first_segment = |path: &str| path.split('/').next().unwrap_or(path).to_string();
        let known: BTreeSet<String> = structure
            .required_directories
            .keys()
            .map(|d| first_segment(d.as_str()))
            .chain(ctx.config.layers().map(first_segment))
            .collect();

        ctx.graph
            .top_level_directories()
            .into_iter()
            .filter(|dir| !known.contains(*dir))
            .map(|dir| {
                Violation::new(
                    self.kind(),
                    self.default_severity(),
                    format!("directory {dir} is not part of the declared structure"),
                )
                .with_file(dir)
                .with_suggestion(Suggestion::new(
                    "declare it in required_directories or set allow_other_directories = true",
                ))
            })
            .collect()
    }
}
