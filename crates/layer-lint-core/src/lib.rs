//! # layer-lint-core
//!
//! Core engine for enforcing a declared layered architecture on a source tree.
//!
//! This crate provides:
//!
//! - [`Graph`] built from scanned files, classifying imports as local or external
//! - [`LayerClassifier`] mapping directories to the most specific configured layer
//! - [`Rule`] trait and the built-in [`rules`]
//! - [`Validator`] running rules into a deterministic [`ValidationReport`]
//! - [`config`] resolution: flat or preset + overrides, merged and validated
//! - [`should_fail`] reducing violations to a build verdict
//!
//! ## Example
//!
//! ```
//! use layer_lint_core::{load_config, should_fail, Graph, ScannedFile, Validator};
//!
//! let config = load_config(
//!     r#"
//! [rules]
//! directories_import = { cmd = ["pkg"], pkg = [] }
//! "#,
//!     Some("example.com/app"),
//! )?;
//!
//! let files = vec![
//!     ScannedFile::new("cmd/main.go", "main", &["example.com/app/pkg"]),
//!     ScannedFile::new("pkg/pkg.go", "pkg", &[]),
//! ];
//! let graph = Graph::build(&files, &config.module);
//!
//! let validator = Validator::builder().config(config).build()?;
//! let report = validator.validate(&graph);
//! assert!(report.is_clean());
//! assert!(!should_fail(&report.violations, validator.config()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
mod context;
mod coverage;
mod graph;
mod layer;
mod rule;
pub mod rules;
mod scanner;
mod types;
mod validator;
mod verdict;

/// Utility modules for rule implementations.
pub mod utils;

pub use config::{load_config, load_config_file, module_from_manifest, ConfigError, ResolvedConfig};
pub use context::RuleContext;
pub use coverage::{threshold_for, PackageCoverage};
pub use graph::{directory_of, strip_module, Dependency, FileNode, Graph, ROOT_PACKAGE};
pub use layer::LayerClassifier;
pub use rule::{Rule, RuleBox};
pub use scanner::{ScanError, ScannedFile, SourceScanner};
pub use types::{Severity, Suggestion, ValidationReport, Violation, ViolationKind};
pub use validator::{Validator, ValidatorBuilder, ValidatorError};
pub use verdict::should_fail;
