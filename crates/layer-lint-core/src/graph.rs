//! Dependency graph built from scanned files.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::scanner::ScannedFile;

/// Module-relative path of the module root package.
pub const ROOT_PACKAGE: &str = ".";

/// One import edge, owned by exactly one [`FileNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// Import path as written in source.
    pub import_path: String,
    /// Whether the import resolves inside the analyzed module.
    pub is_local: bool,
    /// Import path with the module prefix stripped (`.` for the root).
    /// Empty for external imports.
    pub local_path: String,
    /// Symbols used from this import. Only set by [`Graph::build_detailed`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_symbols: Option<Vec<String>>,
}

impl Dependency {
    fn resolve(import_path: &str, module: &str) -> Self {
        let local_path = strip_module(import_path, module);
        Self {
            import_path: import_path.to_string(),
            is_local: local_path.is_some(),
            local_path: local_path.unwrap_or_default(),
            used_symbols: None,
        }
    }
}

/// One scanned source file and its imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNode {
    /// Slash-separated path relative to the project root.
    pub path: String,
    /// Declared package name.
    pub package: String,
    /// File name without extension.
    pub base_name: String,
    /// Whether this is a test file.
    pub is_test: bool,
    /// Imports in source order.
    pub dependencies: Vec<Dependency>,
}

impl FileNode {
    /// Directory containing this file (`.` for the project root).
    #[must_use]
    pub fn directory(&self) -> &str {
        directory_of(&self.path)
    }

    /// Local dependencies only.
    pub fn local_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| d.is_local)
    }

    /// External dependencies only.
    pub fn external_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| !d.is_local)
    }
}

/// Ordered collection of file nodes; the edges are their dependencies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    module: String,
    nodes: Vec<FileNode>,
}

impl Graph {
    /// Builds a graph, classifying each import as local or external.
    #[must_use]
    pub fn build(files: &[ScannedFile], module: &str) -> Self {
        Self::build_with(files, module, false)
    }

    /// Builds a graph and attaches per-import used-symbol lists.
    ///
    /// Symbols are documentation data only; rules never read them.
    #[must_use]
    pub fn build_detailed(files: &[ScannedFile], module: &str) -> Self {
        Self::build_with(files, module, true)
    }

    fn build_with(files: &[ScannedFile], module: &str, detailed: bool) -> Self {
        let nodes = files
            .iter()
            .map(|file| {
                let dependencies = file
                    .imports
                    .iter()
                    .map(|import| {
                        let mut dep = Dependency::resolve(import, module);
                        if detailed {
                            dep.used_symbols =
                                Some(file.used_symbols.get(import).cloned().unwrap_or_default());
                        }
                        dep
                    })
                    .collect();
                FileNode {
                    path: file.path.clone(),
                    package: file.package.clone(),
                    base_name: file.base_name.clone(),
                    is_test: file.is_test,
                    dependencies,
                }
            })
            .collect();

        tracing::debug!("Built graph with {} nodes for module {module}", files.len());

        Self {
            module: module.to_string(),
            nodes,
        }
    }

    /// All nodes, in scanner order.
    #[must_use]
    pub fn nodes(&self) -> &[FileNode] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Directories holding at least one non-test file, i.e. local packages.
    #[must_use]
    pub fn local_directories(&self) -> BTreeSet<&str> {
        self.nodes
            .iter()
            .filter(|n| !n.is_test)
            .map(FileNode::directory)
            .collect()
    }

    /// Nodes whose directory is exactly `dir`.
    pub fn files_in<'a>(&'a self, dir: &'a str) -> impl Iterator<Item = &'a FileNode> + 'a {
        self.nodes.iter().filter(move |n| n.directory() == dir)
    }

    /// First path segment of every file that is not at the project root.
    #[must_use]
    pub fn top_level_directories(&self) -> BTreeSet<&str> {
        self.nodes
            .iter()
            .filter_map(|n| n.path.split_once('/').map(|(first, _)| first))
            .collect()
    }
}

/// Strips the module prefix from an import path.
///
/// Returns `Some(".")` for the module root, `Some(rest)` for imports under it
/// and `None` for anything else.
#[must_use]
pub fn strip_module(import_path: &str, module: &str) -> Option<String> {
    if module.is_empty() {
        return None;
    }
    if import_path == module {
        return Some(ROOT_PACKAGE.to_string());
    }
    import_path
        .strip_prefix(module)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
        .map(str::to_string)
}

/// Directory part of a slash-separated relative path (`.` at the root).
#[must_use]
pub fn directory_of(path: &str) -> &str {
    path.rsplit_once('/').map_or(ROOT_PACKAGE, |(dir, _)| dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULE: &str = "example.com/app";

    #[test]
    fn classifies_local_and_external_imports() {
        let files = vec![ScannedFile::new(
            "cmd/app/main.go",
            "main",
            &["fmt", "example.com/app/internal/repo", "example.com/app"],
        )];
        let graph = Graph::build(&files, MODULE);
        let deps = &graph.nodes()[0].dependencies;

        assert!(!deps[0].is_local);
        assert!(deps[0].local_path.is_empty());
        assert!(deps[1].is_local);
        assert_eq!(deps[1].local_path, "internal/repo");
        assert!(deps[2].is_local);
        assert_eq!(deps[2].local_path, ".");
    }

    #[test]
    fn sibling_module_is_not_local() {
        assert_eq!(strip_module("example.com/application/x", MODULE), None);
        assert_eq!(strip_module("example.com/app/", MODULE), None);
    }

    #[test]
    fn preserves_import_order_and_duplicates() {
        let files = vec![
            ScannedFile::new("a/a.go", "a", &["os", "fmt", "os"]),
            ScannedFile::new("b/b.go", "b", &["fmt"]),
        ];
        let graph = Graph::build(&files, MODULE);
        let imports: Vec<&str> = graph.nodes()[0]
            .dependencies
            .iter()
            .map(|d| d.import_path.as_str())
            .collect();
        assert_eq!(imports, vec!["os", "fmt", "os"]);
        assert_eq!(graph.nodes()[1].dependencies.len(), 1);
    }

    #[test]
    fn detailed_build_attaches_symbols() {
        let mut file = ScannedFile::new("a/a.go", "a", &["fmt", "os"]);
        file.used_symbols
            .insert("fmt".into(), vec!["Println".into(), "Sprintf".into()]);

        let plain = Graph::build(std::slice::from_ref(&file), MODULE);
        assert!(plain.nodes()[0].dependencies[0].used_symbols.is_none());

        let detailed = Graph::build_detailed(&[file], MODULE);
        let deps = &detailed.nodes()[0].dependencies;
        assert_eq!(
            deps[0].used_symbols.as_deref(),
            Some(&["Println".to_string(), "Sprintf".to_string()][..])
        );
        assert_eq!(deps[1].used_symbols.as_deref(), Some(&[][..]));
    }

    #[test]
    fn directory_queries() {
        let files = vec![
            ScannedFile::new("main.go", "main", &[]),
            ScannedFile::new("internal/repo/repo.go", "repo", &[]),
            ScannedFile::new("internal/repo/repo_test.go", "repo_test", &[]),
            ScannedFile::new("testdata/only_test.go", "fixtures", &[]),
        ];
        let graph = Graph::build(&files, MODULE);

        assert_eq!(graph.nodes()[0].directory(), ".");
        let dirs: Vec<&str> = graph.local_directories().into_iter().collect();
        assert_eq!(dirs, vec![".", "internal/repo"]);
        assert_eq!(graph.files_in("internal/repo").count(), 2);
        let top: Vec<&str> = graph.top_level_directories().into_iter().collect();
        assert_eq!(top, vec!["internal", "testdata"]);
    }
}
