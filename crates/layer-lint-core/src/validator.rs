//! Rule validator: runs every registered rule over one graph.

use crate::config::ResolvedConfig;
use crate::context::RuleContext;
use crate::coverage::PackageCoverage;
use crate::graph::Graph;
use crate::layer::LayerClassifier;
use crate::rule::{Rule, RuleBox};
use crate::rules::{default_rules, BLACKBOX_GUIDANCE};
use crate::types::{ValidationReport, ViolationKind};

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while assembling a [`Validator`].
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ValidatorError {
    /// No configuration was supplied.
    #[error("validator requires a resolved configuration")]
    #[diagnostic(code(layer_lint::validator::config))]
    MissingConfig,
}

/// Builder for configuring a [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    config: Option<ResolvedConfig>,
    rules: Vec<RuleBox>,
    coverage: Vec<PackageCoverage>,
}

impl ValidatorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resolved configuration.
    #[must_use]
    pub fn config(mut self, config: ResolvedConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Adds a rule. When no rule is added, the configuration decides.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Supplies coverage records for the coverage rule.
    #[must_use]
    pub fn coverage(mut self, coverage: Vec<PackageCoverage>) -> Self {
        self.coverage = coverage;
        self
    }

    /// Builds the validator.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::MissingConfig`] if no configuration was set.
    pub fn build(self) -> Result<Validator, ValidatorError> {
        let config = self.config.ok_or(ValidatorError::MissingConfig)?;
        let rules = if self.rules.is_empty() {
            default_rules(&config)
        } else {
            self.rules
        };
        let classifier = LayerClassifier::new(&config.rules.directories_import);
        Ok(Validator {
            config,
            classifier,
            rules,
            coverage: self.coverage,
        })
    }
}

/// Validates graphs against a resolved configuration.
///
/// Use [`Validator::builder()`] to construct an instance.
pub struct Validator {
    config: ResolvedConfig,
    classifier: LayerClassifier,
    rules: Vec<RuleBox>,
    coverage: Vec<PackageCoverage>,
}

impl Validator {
    /// Creates a new builder for configuring a validator.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// The configuration this validator applies.
    #[must_use]
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Runs every rule and returns the violations in deterministic order.
    #[must_use]
    pub fn validate(&self, graph: &Graph) -> ValidationReport {
        info!(
            "Validating {} files against {} rules",
            graph.len(),
            self.rules.len()
        );

        let ctx = RuleContext::new(graph, &self.config, &self.classifier, &self.coverage);
        let mut report = ValidationReport::new();
        report.files_checked = graph.len();

        for rule in &self.rules {
            let violations = rule.check(&ctx);
            debug!("{} ({}): {} violations", rule.name(), rule.code(), violations.len());
            report.violations.extend(violations);
        }

        report.violations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        if report.violations.iter().any(|v| v.kind == ViolationKind::WhiteboxTest) {
            let text = &self.config.guidance.text;
            report.guidance = Some(if text.is_empty() {
                BLACKBOX_GUIDANCE.to_string()
            } else {
                text.clone()
            });
        }

        info!(
            "Validation complete: {} violations in {} files",
            report.violations.len(),
            report.files_checked
        );

        report
    }
}
