//! Project discovery.
//!
//! A project root yields two things before any scanning happens: the
//! configuration file to load and the module identity from `go.mod`.
//! Configuration is looked up in this order:
//!
//! 1. `--config <path>`
//! 2. `{root}/layer-lint.toml`, then `{root}/.layer-lint.toml`
//! 3. `$LAYER_LINT_CONFIG_DIR/config.toml`, else `~/.layer-lint/config.toml`
//!
//! Without any of these the command fails; layer rules cannot be guessed.

use anyhow::{anyhow, Result};
use layer_lint_core::{load_config_file, module_from_manifest, ResolvedConfig};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAMES: &[&str] = &["layer-lint.toml", ".layer-lint.toml"];
const GLOBAL_CONFIG_NAME: &str = "config.toml";
const MANIFEST_NAME: &str = "go.mod";

/// A project root with its configuration file and detected module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    config_path: PathBuf,
    module: Option<String>,
}

impl Project {
    /// Discovers the configuration and module identity for `root`.
    ///
    /// # Errors
    ///
    /// Fails when no configuration file can be found.
    pub fn discover(root: &Path, explicit_config: Option<&Path>) -> Result<Self> {
        Self::discover_with(root, explicit_config, global_config_dir().as_deref())
    }

    fn discover_with(
        root: &Path,
        explicit_config: Option<&Path>,
        global_dir: Option<&Path>,
    ) -> Result<Self> {
        let config_path = explicit_config
            .map(Path::to_path_buf)
            .or_else(|| {
                PROJECT_CONFIG_NAMES
                    .iter()
                    .map(|name| root.join(name))
                    .find(|candidate| candidate.is_file())
            })
            .or_else(|| {
                let candidate = global_dir?.join(GLOBAL_CONFIG_NAME);
                candidate.is_file().then(|| {
                    tracing::info!("Using global config: {}", candidate.display());
                    candidate
                })
            })
            .ok_or_else(|| {
                anyhow!(
                    "No configuration found for {}. Run `layer-lint init` or pass --config <path>.",
                    root.display()
                )
            })?;
        tracing::debug!("Config: {}", config_path.display());

        Ok(Self {
            config_path,
            module: detect_module(root),
        })
    }

    /// The configuration file that will be loaded.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Module identity from the root manifest, if present.
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Loads and resolves the configuration.
    ///
    /// Configuration errors are rendered as diagnostics before being returned.
    pub fn load_config(&self) -> Result<ResolvedConfig> {
        load_config_file(&self.config_path, self.module()).map_err(|e| {
            eprintln!("{:?}", miette::Report::new(e));
            anyhow!("Failed to load config: {}", self.config_path.display())
        })
    }
}

fn detect_module(root: &Path) -> Option<String> {
    let content = std::fs::read_to_string(root.join(MANIFEST_NAME)).ok()?;
    let module = module_from_manifest(&content);
    if let Some(m) = &module {
        tracing::debug!("Detected module {m}");
    }
    module
}

/// `$LAYER_LINT_CONFIG_DIR`, else `~/.layer-lint`.
fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("LAYER_LINT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".layer-lint")))
}
