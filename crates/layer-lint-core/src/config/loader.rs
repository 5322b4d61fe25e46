//! DTO → resolved configuration, with validation.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::dto::{ConfigDocumentDto, RulesetDto};
use super::merge::merge;
use super::model::{
    CoveragePolicy, Guidance, ResolvedConfig, Rules, SharedImportMode, SharedImportPolicy,
    Structure, TestFilePolicy, TestLocation,
};
use super::presets::Preset;
use super::ConfigError;
use crate::utils::patterns::{ImportMatcher, ImportPattern};

/// The two accepted document shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigShape {
    /// Legacy flat document: the rule-set is given directly.
    Flat(RulesetDto),
    /// A named preset plus optional overrides.
    PresetOverrides {
        /// Preset name.
        preset: String,
        /// Overrides merged on top of the preset.
        overrides: RulesetDto,
    },
}

impl ConfigShape {
    /// Classifies a raw document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MixedShape`] if flat sections appear next to a
    /// preset, or `[overrides]` appears without one.
    pub fn from_document(dto: ConfigDocumentDto) -> Result<Self, ConfigError> {
        let has_flat = dto.structure.is_some() || dto.rules.is_some() || dto.guidance.is_some();
        match (dto.preset, dto.overrides) {
            (Some(_), _) if has_flat => Err(ConfigError::MixedShape(
                "`preset` cannot be combined with top-level [structure], [rules] or [guidance]; \
                 move them under [overrides]"
                    .into(),
            )),
            (Some(preset), overrides) => Ok(Self::PresetOverrides {
                preset,
                overrides: overrides.unwrap_or_default(),
            }),
            (None, Some(_)) => Err(ConfigError::MixedShape(
                "[overrides] requires a `preset`".into(),
            )),
            (None, None) => Ok(Self::Flat(RulesetDto {
                structure: dto.structure.unwrap_or_default(),
                rules: dto.rules.unwrap_or_default(),
                guidance: dto.guidance.unwrap_or_default(),
            })),
        }
    }

    /// Produces the canonical rule-set for this shape.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPreset`] for an unknown preset name.
    pub fn into_ruleset(self) -> Result<(Option<String>, RulesetDto), ConfigError> {
        match self {
            Self::Flat(ruleset) => Ok((None, ruleset)),
            Self::PresetOverrides { preset, overrides } => {
                let base = Preset::from_name(&preset).ok_or_else(|| ConfigError::UnknownPreset {
                    name: preset.clone(),
                    available: Preset::ALL.map(Preset::name).join(", "),
                })?;
                tracing::debug!("Merging overrides into preset {}", base.name());
                Ok((Some(preset), merge(base.ruleset(), overrides)))
            }
        }
    }
}

/// Loads a configuration document once and memoizes its resolution.
#[derive(Debug)]
pub struct ConfigLoader {
    shape: ConfigShape,
    explicit_module: Option<String>,
    detected_module: Option<String>,
    resolved: OnceLock<ResolvedConfig>,
}

impl ConfigLoader {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or mixes both shapes.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let dto: ConfigDocumentDto = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        let explicit_module = dto.module.clone().filter(|m| !m.trim().is_empty());
        Ok(Self {
            shape: ConfigShape::from_document(dto)?,
            explicit_module,
            detected_module: None,
            resolved: OnceLock::new(),
        })
    }

    /// Supplies the module identity found in the root manifest.
    ///
    /// An explicit `module` key in the document takes precedence.
    #[must_use]
    pub fn with_detected_module(mut self, module: Option<String>) -> Self {
        self.detected_module = module;
        self
    }

    /// Resolves the configuration, computing it on first call only.
    ///
    /// # Errors
    ///
    /// Returns an error if the module identity is unknown, the preset does
    /// not exist, or the merged rule-set is invalid.
    pub fn resolve(&self) -> Result<&ResolvedConfig, ConfigError> {
        if let Some(config) = self.resolved.get() {
            return Ok(config);
        }
        let module = self
            .explicit_module
            .clone()
            .or_else(|| self.detected_module.clone())
            .ok_or(ConfigError::MissingModule)?;
        let (preset, ruleset) = self.shape.clone().into_ruleset()?;
        let config = build_resolved(module, preset, ruleset)?;
        Ok(self.resolved.get_or_init(|| config))
    }
}

/// Parses and resolves a document in one step.
///
/// # Errors
///
/// See [`ConfigLoader::parse`] and [`ConfigLoader::resolve`].
pub fn load_config(
    content: &str,
    detected_module: Option<&str>,
) -> Result<ResolvedConfig, ConfigError> {
    let loader =
        ConfigLoader::parse(content)?.with_detected_module(detected_module.map(str::to_string));
    loader.resolve().cloned()
}

/// Validates a merged rule-set and converts it to the resolved model.
///
/// # Errors
///
/// Returns the first validation problem found.
pub fn build_resolved(
    module: String,
    preset: Option<String>,
    ruleset: RulesetDto,
) -> Result<ResolvedConfig, ConfigError> {
    let RulesetDto {
        structure,
        rules,
        guidance,
    } = ruleset;

    for (layer, allowed) in &rules.directories_import {
        for unknown in allowed
            .iter()
            .filter(|target| !rules.directories_import.contains_key(*target))
        {
            tracing::warn!(
                "rules.directories_import.{layer}: `{unknown}` is not a configured layer; \
                 imports of it are never checked"
            );
        }
    }

    let mode = SharedImportMode::parse(&rules.shared_external_imports.mode).ok_or_else(|| {
        ConfigError::InvalidValue {
            field: "rules.shared_external_imports.mode".into(),
            value: rules.shared_external_imports.mode.clone(),
            expected: "warn, error".into(),
        }
    })?;

    let location = TestLocation::parse(&rules.test_files.location).ok_or_else(|| {
        ConfigError::InvalidValue {
            field: "rules.test_files.location".into(),
            value: rules.test_files.location.clone(),
            expected: "colocated, separate, any".into(),
        }
    })?;

    for (package, threshold) in &rules.coverage.package_thresholds {
        if !(0.0..=100.0).contains(threshold) {
            return Err(ConfigError::InvalidValue {
                field: format!("rules.coverage.package_thresholds.{package}"),
                value: threshold.to_string(),
                expected: "a percentage between 0 and 100".into(),
            });
        }
    }

    let exclude_imports = matcher(rules.exclude_imports)?;
    let shared_exclusions = ImportMatcher::new(
        rules.shared_external_imports.exclusions,
        compile(&rules.shared_external_imports.exclusion_patterns)?,
    );

    Ok(ResolvedConfig {
        module,
        preset,
        structure: Structure {
            required_directories: structure.required_directories,
            allow_other_directories: structure.allow_other_directories.unwrap_or(true),
        },
        rules: Rules {
            directories_import: rules.directories_import,
            exclude_imports,
            detect_unused: rules.detect_unused,
            strict_test_naming: rules.strict_test_naming,
            shared_imports: SharedImportPolicy {
                detect: rules.shared_external_imports.detect,
                mode,
                exclusions: shared_exclusions,
            },
            test_files: TestFilePolicy {
                lint: rules.test_files.lint,
                location,
                require_blackbox: rules.test_files.require_blackbox,
                exempt_imports: rules.test_files.exempt_imports.into_iter().collect::<BTreeSet<_>>(),
            },
            coverage: CoveragePolicy {
                enabled: rules.coverage.enabled,
                threshold: rules.coverage.threshold,
                package_thresholds: rules.coverage.package_thresholds,
            },
        },
        guidance: Guidance {
            description: guidance.description,
            principles: guidance.principles,
            text: guidance.text,
        },
    })
}

/// Splits entries into exact paths and glob patterns (entries containing
/// glob metacharacters).
fn matcher(entries: Vec<String>) -> Result<ImportMatcher, ConfigError> {
    let (globs, exact): (Vec<String>, Vec<String>) = entries
        .into_iter()
        .partition(|e| e.contains(['*', '?', '[']));
    Ok(ImportMatcher::new(exact, compile(&globs)?))
}

fn compile(patterns: &[String]) -> Result<Vec<ImportPattern>, ConfigError> {
    patterns
        .iter()
        .map(|p| {
            ImportPattern::new(p).map_err(|reason| ConfigError::InvalidPattern {
                pattern: p.clone(),
                reason,
            })
        })
        .collect()
}
