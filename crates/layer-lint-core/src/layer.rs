//! Layer classification: maps directories to configured architecture layers.

use std::collections::BTreeMap;

use crate::graph::directory_of;

/// Resolves slash-separated paths to configured layer prefixes.
///
/// Resolution matches whole path segments and prefers the prefix with the
/// most segments, so `internal/domain` wins over `internal` for
/// `internal/domain/user`, while `internals` never matches `internal`.
#[derive(Debug, Clone)]
pub struct LayerClassifier {
    /// (prefix segments, layer name, allowed layers), most segments first.
    layers: Vec<(Vec<String>, String, Vec<String>)>,
}

impl LayerClassifier {
    /// Builds a classifier from a directory-import matrix.
    ///
    /// Every key of the matrix is a layer; its value is the closed set of
    /// layers it may depend on.
    #[must_use]
    pub fn new(matrix: &BTreeMap<String, Vec<String>>) -> Self {
        let mut layers: Vec<(Vec<String>, String, Vec<String>)> = matrix
            .iter()
            .map(|(name, allowed)| (segments(name), name.clone(), allowed.clone()))
            .collect();
        // Stable on ties: BTreeMap order already sorted names.
        layers.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { layers }
    }

    /// Which layer does the file at `rel_path` belong to?
    #[must_use]
    pub fn classify(&self, rel_path: &str) -> Option<&str> {
        self.classify_dir(directory_of(rel_path))
    }

    /// Which layer does the directory (or module-relative package path) belong to?
    #[must_use]
    pub fn classify_dir(&self, dir: &str) -> Option<&str> {
        let dir_segments = segments(dir);
        self.layers
            .iter()
            .find(|(prefix, _, _)| {
                prefix.len() <= dir_segments.len()
                    && prefix.iter().zip(&dir_segments).all(|(p, d)| p == d)
            })
            .map(|(_, name, _)| name.as_str())
    }

    /// Layers the given layer may depend on. Unknown layers allow nothing.
    #[must_use]
    pub fn allowed(&self, layer: &str) -> &[String] {
        self.layers
            .iter()
            .find(|(_, name, _)| name == layer)
            .map(|(_, _, allowed)| allowed.as_slice())
            .unwrap_or(&[])
    }

    /// Returns true if `from` may depend on `to`.
    #[must_use]
    pub fn is_allowed(&self, from: &str, to: &str) -> bool {
        self.allowed(from).iter().any(|a| a == to)
    }
}

fn segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect()
}
