//! Configuration resolution.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! ConfigDocumentDto
//!   ↓ ConfigShape::from_document
//! Flat(ruleset) | PresetOverrides { preset, overrides }
//!   ↓ preset lookup + merge
//! RulesetDto
//!   ↓ validate + convert
//! ResolvedConfig
//! ```

use std::path::{Path, PathBuf};

pub mod dto;
pub mod loader;
pub mod merge;
pub mod model;
pub mod presets;

pub use loader::{load_config, ConfigLoader, ConfigShape};
pub use model::{
    CoveragePolicy, Guidance, ResolvedConfig, Rules, SharedImportMode, SharedImportPolicy,
    Structure, TestFilePolicy, TestLocation,
};
pub use presets::Preset;

/// Errors when loading configuration. All of them abort the run.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(layer_lint::config::io))]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("invalid config: {message}")]
    #[diagnostic(code(layer_lint::config::parse))]
    Parse {
        /// Parse error detail.
        message: String,
    },

    /// The document mixes the flat and preset shapes.
    #[error("invalid config shape: {0}")]
    #[diagnostic(code(layer_lint::config::shape))]
    MixedShape(String),

    /// The named preset does not exist.
    #[error("unknown preset `{name}` (available: {available})")]
    #[diagnostic(
        code(layer_lint::config::unknown_preset),
        help("run `layer-lint list-rules` to see every preset")
    )]
    UnknownPreset {
        /// Requested name.
        name: String,
        /// Comma-separated list of known presets.
        available: String,
    },

    /// No module identity could be determined.
    #[error("module identity could not be determined")]
    #[diagnostic(
        code(layer_lint::config::missing_module),
        help("add a root manifest with a `module` directive, or set `module = \"...\"` in the config")
    )]
    MissingModule,

    /// An exclusion pattern is not a valid glob.
    #[error("invalid pattern `{pattern}`: {reason}")]
    #[diagnostic(code(layer_lint::config::pattern))]
    InvalidPattern {
        /// The pattern as written.
        pattern: String,
        /// Why it is invalid.
        reason: String,
    },

    /// A field holds an unsupported value.
    #[error("{field}: unsupported value `{value}`, expected: {expected}")]
    #[diagnostic(code(layer_lint::config::value))]
    InvalidValue {
        /// Dotted field path.
        field: String,
        /// The value found.
        value: String,
        /// Accepted values.
        expected: String,
    },
}

/// Reads and resolves a config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not resolve.
pub fn load_config_file(
    path: &Path,
    detected_module: Option<&str>,
) -> Result<ResolvedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_config(&content, detected_module)
}

/// Extracts the module path from a root manifest's `module` directive.
///
/// Accepts `module example.com/app`, a quoted path, and trailing `//`
/// comments. Returns `None` if no directive is present.
#[must_use]
pub fn module_from_manifest(manifest: &str) -> Option<String> {
    manifest.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let name = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!name.is_empty()).then(|| name.to_string())
    })
}
