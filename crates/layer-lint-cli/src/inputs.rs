//! Collaborator inputs: scanned files and coverage records.

use anyhow::{Context, Result};
use layer_lint_core::{PackageCoverage, ScanError, ScannedFile, SourceScanner};
use std::path::{Path, PathBuf};

/// Reads scanner output produced ahead of time as a JSON array of
/// [`ScannedFile`] records.
#[derive(Debug, Clone)]
pub struct ManifestScanner {
    manifest: PathBuf,
}

impl ManifestScanner {
    /// Creates a scanner reading `manifest`; relative paths resolve against
    /// the scanned root.
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
        }
    }
}

impl SourceScanner for ManifestScanner {
    fn scan(&self, root: &Path) -> Result<Vec<ScannedFile>, ScanError> {
        let path = if self.manifest.is_absolute() {
            self.manifest.clone()
        } else {
            root.join(&self.manifest)
        };
        let content = std::fs::read_to_string(&path).map_err(|source| ScanError::Io {
            path: path.clone(),
            source,
        })?;
        let mut files: Vec<ScannedFile> =
            serde_json::from_str(&content).map_err(|e| ScanError::Decode {
                path: path.clone(),
                message: e.to_string(),
            })?;

        for file in &mut files {
            file.path = normalize(&file.path);
        }
        tracing::debug!("Loaded {} scanned files from {}", files.len(), path.display());
        Ok(files)
    }
}

/// Slash-separated, without a leading `./`.
fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.strip_prefix("./").map(str::to_string).unwrap_or(path)
}

/// Reads coverage records.
///
/// A record that cannot be decoded but names its package degrades to
/// `0% / no tests`; one without a package is dropped.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a JSON array.
pub fn read_coverage(path: &Path) -> Result<Vec<PackageCoverage>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read coverage: {}", path.display()))?;
    let raw: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("Coverage must be a JSON array: {}", path.display()))?;

    let records = raw
        .into_iter()
        .filter_map(|value| {
            let package = value
                .get("package")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string);
            match serde_json::from_value::<PackageCoverage>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Unreadable coverage record ({e}); treating as unmeasured");
                    package.map(PackageCoverage::unmeasured)
                }
            }
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scanner_reads_and_normalizes_paths() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("files.json"),
            r#"[
                {"path": "./cmd/main.go", "package": "main", "base_name": "main",
                 "imports": ["example.com/app/internal/db"]},
                {"path": "internal\\db\\db_test.go", "package": "db_test",
                 "base_name": "db_test", "is_test": true}
            ]"#,
        )
        .unwrap();

        let files = ManifestScanner::new("files.json").scan(tmp.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "cmd/main.go");
        assert_eq!(files[1].path, "internal/db/db_test.go");
        assert!(files[1].is_test);
    }

    #[test]
    fn scanner_failures_are_wrapped() {
        let tmp = TempDir::new().unwrap();
        let missing = ManifestScanner::new("nope.json").scan(tmp.path());
        assert!(matches!(missing, Err(ScanError::Io { .. })));

        fs::write(tmp.path().join("bad.json"), "{").unwrap();
        let bad = ManifestScanner::new("bad.json").scan(tmp.path());
        assert!(matches!(bad, Err(ScanError::Decode { .. })));
    }

    #[test]
    fn unreadable_coverage_record_degrades() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("coverage.json");
        fs::write(
            &path,
            r#"[
                {"package": "example.com/app/a", "coverage": 81.5, "has_tests": true},
                {"package": "example.com/app/b", "coverage": "n/a"},
                {"coverage": 12.0}
            ]"#,
        )
        .unwrap();

        let records = read_coverage(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], PackageCoverage::unmeasured("example.com/app/b"));
    }
}
