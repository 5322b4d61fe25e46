//! Core types for violations and validation reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail the build.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The kind of architectural violation.
///
/// The declaration order is the tie-break order used when sorting
/// violations that share a file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// A layer imports a layer it is not allowed to depend on.
    ForbiddenImport,
    /// A local package is never reached from the program entry files.
    UnusedPackage,
    /// An external import is consumed by two or more layers.
    SharedExternalImport,
    /// A test file is declared in the production package.
    WhiteboxTest,
    /// A test file has no correspondingly named implementation file.
    TestNamingOrphan,
    /// A test file lives outside the configured test location.
    MisplacedTest,
    /// A required top-level directory is missing.
    MissingDirectory,
    /// A top-level directory is neither required nor a configured layer.
    UnexpectedDirectory,
    /// A package falls below its coverage threshold.
    InsufficientCoverage,
}

impl ViolationKind {
    /// All kinds, in code order.
    pub const ALL: [Self; 9] = [
        Self::ForbiddenImport,
        Self::UnusedPackage,
        Self::SharedExternalImport,
        Self::WhiteboxTest,
        Self::TestNamingOrphan,
        Self::MisplacedTest,
        Self::MissingDirectory,
        Self::UnexpectedDirectory,
        Self::InsufficientCoverage,
    ];

    /// Returns the stable rule code (e.g., `"LL001"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::ForbiddenImport => "LL001",
            Self::UnusedPackage => "LL002",
            Self::SharedExternalImport => "LL003",
            Self::WhiteboxTest => "LL004",
            Self::TestNamingOrphan => "LL005",
            Self::MisplacedTest => "LL006",
            Self::MissingDirectory => "LL007",
            Self::UnexpectedDirectory => "LL008",
            Self::InsufficientCoverage => "LL009",
        }
    }

    /// Returns the kebab-case rule name (e.g., `"forbidden-import"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ForbiddenImport => "forbidden-import",
            Self::UnusedPackage => "unused-package",
            Self::SharedExternalImport => "shared-external-import",
            Self::WhiteboxTest => "whitebox-test",
            Self::TestNamingOrphan => "test-naming-orphan",
            Self::MisplacedTest => "misplaced-test",
            Self::MissingDirectory => "missing-directory",
            Self::UnexpectedDirectory => "unexpected-directory",
            Self::InsufficientCoverage => "insufficient-coverage",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An architectural violation found during validation.
///
/// Violations are self-describing: formatters never need to consult the
/// graph or the configuration to render one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// What rule was broken.
    pub kind: ViolationKind,
    /// Severity of this violation.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Implicated file or directory, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Offending import path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import: Option<String>,
    /// Layer of the importing file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_layer: Option<String>,
    /// Layer of the imported package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_layer: Option<String>,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation with no location details.
    #[must_use]
    pub fn new(kind: ViolationKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            file: None,
            import: None,
            source_layer: None,
            target_layer: None,
            suggestion: None,
        }
    }

    /// Sets the implicated file or directory.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the offending import path.
    #[must_use]
    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.import = Some(import.into());
        self
    }

    /// Sets the source and target layers.
    #[must_use]
    pub fn with_layers(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_layer = Some(source.into());
        self.target_layer = Some(target.into());
        self
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Returns the rule code of this violation's kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {}", self.code(), self.kind.name());
        if let Some(file) = &self.file {
            let _ = write!(output, " at {file}");
        }
        output.push('\n');
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(import) = &self.import {
            let _ = writeln!(output, "  = import: {import}");
        }
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }

    /// Key used for deterministic ordering: file, kind, import, message.
    pub(crate) fn sort_key(&self) -> (&str, ViolationKind, &str, &str) {
        (
            self.file.as_deref().unwrap_or(""),
            self.kind,
            self.import.as_deref().unwrap_or(""),
            &self.message,
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.file.as_deref().unwrap_or(".");
        write!(
            f,
            "{file}: {} [{}] {}",
            self.severity,
            self.code(),
            self.message
        )
    }
}

/// Result of running validation over a graph.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All violations, in deterministic order.
    pub violations: Vec<Violation>,
    /// Number of files in the validated graph.
    pub files_checked: usize,
    /// Shared guidance, surfaced once per run when a whitebox test was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}

impl ValidationReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no violations were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns violations of the given kind.
    #[must_use]
    pub fn by_kind(&self, kind: ViolationKind) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.kind == kind).collect()
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |s: Severity| self.violations.iter().filter(|v| v.severity == s).count();
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Renders every violation, one per line, in report order.
    #[must_use]
    pub fn render_compact(&self) -> String {
        self.violations
            .iter()
            .map(|v| format!("{v}\n"))
            .collect()
    }
}
