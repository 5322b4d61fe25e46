//! Scanner boundary types.
//!
//! Extracting packages and imports from source text is not the core's job.
//! A [`SourceScanner`] hands the core a fully materialized list of
//! [`ScannedFile`] records; the core never sees a partial scan.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One scanned source file, as produced by a scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedFile {
    /// Slash-separated path relative to the project root.
    pub path: String,
    /// Declared package name.
    pub package: String,
    /// File name without extension (e.g., `service_test`).
    pub base_name: String,
    /// Whether this is a test file.
    #[serde(default)]
    pub is_test: bool,
    /// Raw import strings, in source order.
    #[serde(default)]
    pub imports: Vec<String>,
    /// Symbols used per import path. Only filled in documentation mode.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub used_symbols: BTreeMap<String, Vec<String>>,
}

impl ScannedFile {
    /// Creates a record, deriving the base name from the path.
    ///
    /// Test status follows the `_test` base-name suffix convention.
    #[must_use]
    pub fn new(path: impl Into<String>, package: impl Into<String>, imports: &[&str]) -> Self {
        let path = path.into();
        let file_name = path.rsplit('/').next().unwrap_or(&path);
        let base_name = file_name
            .rsplit_once('.')
            .map_or(file_name, |(stem, _)| stem)
            .to_string();
        let is_test = base_name.ends_with("_test");
        Self {
            path,
            package: package.into(),
            base_name,
            is_test,
            imports: imports.iter().map(|s| (*s).to_string()).collect(),
            used_symbols: BTreeMap::new(),
        }
    }
}

/// Errors raised by a scanner.
///
/// Any scanner failure aborts the whole run.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ScanError {
    /// Failed to read scanner input.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(layer_lint::scan::io))]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// Scanner output could not be decoded.
    #[error("invalid scan data in {path}: {message}")]
    #[diagnostic(code(layer_lint::scan::decode))]
    Decode {
        /// Path of the malformed document.
        path: PathBuf,
        /// Decoder message.
        message: String,
    },
}

/// Trait for scanners that turn a source tree into [`ScannedFile`] records.
pub trait SourceScanner: Send + Sync {
    /// Scans the tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be scanned completely.
    fn scan(&self, root: &Path) -> Result<Vec<ScannedFile>, ScanError>;
}
