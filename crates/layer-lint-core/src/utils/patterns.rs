//! Import-path matching: exact entries plus glob patterns.

/// A validated glob pattern for import paths.
///
/// The glob is compiled once at construction and reused for all match calls.
/// `*` matches across `/`, so `github.com/acme/*` covers every package
/// below `github.com/acme`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPattern(glob::Pattern);

impl ImportPattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns the glob error message if the pattern is empty or invalid.
    pub fn new(pattern: &str) -> Result<Self, String> {
        if pattern.is_empty() {
            return Err("pattern must not be empty".to_string());
        }
        glob::Pattern::new(pattern)
            .map(Self)
            .map_err(|e| e.to_string())
    }

    /// Tests whether an import path matches this pattern.
    #[must_use]
    pub fn matches(&self, import_path: &str) -> bool {
        self.0.matches(import_path)
    }
}

/// Exclusion set for import paths: exact entries and glob patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportMatcher {
    exact: Vec<String>,
    patterns: Vec<ImportPattern>,
}

impl ImportMatcher {
    /// Creates a matcher from exact entries and already compiled patterns.
    #[must_use]
    pub fn new(exact: Vec<String>, patterns: Vec<ImportPattern>) -> Self {
        Self { exact, patterns }
    }

    /// Returns true if the import is listed exactly or matches a pattern.
    #[must_use]
    pub fn matches(&self, import_path: &str) -> bool {
        self.exact.iter().any(|e| e == import_path)
            || self.patterns.iter().any(|p| p.matches(import_path))
    }
}
