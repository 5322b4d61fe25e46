//! Built-in rule-set presets.

use std::collections::BTreeMap;

use super::dto::{
    CoverageDto, GuidanceDto, RulesDto, RulesetDto, SharedImportsDto, StructureDto, TestFilesDto,
};

/// Standard library packages that every layer may reasonably share.
const COMMON_STDLIB: &[&str] = &[
    "context", "errors", "fmt", "io", "os", "sort", "strconv", "strings", "sync", "time",
];

const BLACKBOX_TEXT: &str = "Tests should exercise a package through its exported API. \
Declare test files in the `<package>_test` package and import the package under test; \
internal details that need direct testing usually belong in a smaller exported package.";

/// Built-in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// `cmd` / `internal` / `pkg` layout.
    Standard,
    /// Clean architecture: dependencies point inward to the domain.
    CleanArch,
    /// Ports and adapters around an isolated core.
    Hexagonal,
    /// No layers; tolerant structure. For gradual adoption.
    Minimal,
}

impl Preset {
    /// All presets, in listing order.
    pub const ALL: [Self; 4] = [Self::Standard, Self::CleanArch, Self::Hexagonal, Self::Minimal];

    /// Looks up a preset by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Configuration name (e.g., `"clean-arch"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::CleanArch => "clean-arch",
            Self::Hexagonal => "hexagonal",
            Self::Minimal => "minimal",
        }
    }

    /// One-line description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Standard => "cmd -> internal -> pkg, unused package detection",
            Self::CleanArch => "cmd -> app/infrastructure -> domain, blackbox tests",
            Self::Hexagonal => "adapters -> ports -> core, shared import detection",
            Self::Minimal => "no layers, tolerant structure (gradual adoption)",
        }
    }

    /// The preset's rule-set, ready to be merged with overrides.
    #[must_use]
    pub fn ruleset(self) -> RulesetDto {
        match self {
            Self::Standard => standard(),
            Self::CleanArch => clean_arch(),
            Self::Hexagonal => hexagonal(),
            Self::Minimal => minimal(),
        }
    }
}

fn matrix(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(layer, allowed)| ((*layer).to_string(), strings(allowed)))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn directories(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(d, why)| ((*d).to_string(), (*why).to_string()))
        .collect()
}

fn standard() -> RulesetDto {
    RulesetDto {
        structure: StructureDto {
            required_directories: directories(&[
                ("cmd", "program entry points"),
                ("internal", "private application code"),
            ]),
            allow_other_directories: Some(true),
        },
        rules: RulesDto {
            directories_import: matrix(&[
                ("cmd", &["internal", "pkg"]),
                ("internal", &["internal", "pkg"]),
                ("pkg", &["pkg"]),
            ]),
            detect_unused: true,
            shared_external_imports: SharedImportsDto {
                mode: "warn".into(),
                ..SharedImportsDto::default()
            },
            test_files: TestFilesDto {
                location: "colocated".into(),
                ..TestFilesDto::default()
            },
            ..RulesDto::default()
        },
        guidance: GuidanceDto {
            description: "Standard command/internal/library layout".into(),
            principles: strings(&[
                "Entry points in cmd stay thin and delegate to internal",
                "Reusable libraries in pkg never reach into internal",
            ]),
            text: String::new(),
        },
    }
}

fn clean_arch() -> RulesetDto {
    RulesetDto {
        structure: StructureDto {
            required_directories: directories(&[
                ("cmd", "program entry points"),
                ("internal", "application, infrastructure and domain layers"),
            ]),
            allow_other_directories: Some(false),
        },
        rules: RulesDto {
            directories_import: matrix(&[
                (
                    "cmd",
                    &["internal/app", "internal/infrastructure", "internal/domain"],
                ),
                ("internal/app", &["internal/domain"]),
                ("internal/infrastructure", &["internal/app", "internal/domain"]),
                ("internal/domain", &[]),
            ]),
            detect_unused: true,
            shared_external_imports: SharedImportsDto {
                detect: true,
                mode: "warn".into(),
                exclusions: strings(COMMON_STDLIB),
                exclusion_patterns: Vec::new(),
            },
            test_files: TestFilesDto {
                lint: true,
                location: "colocated".into(),
                require_blackbox: true,
                exempt_imports: Vec::new(),
            },
            coverage: CoverageDto {
                enabled: false,
                threshold: 70.0,
                package_thresholds: BTreeMap::from([("internal/domain".to_string(), 90.0)]),
            },
            ..RulesDto::default()
        },
        guidance: GuidanceDto {
            description: "Clean architecture with an isolated domain".into(),
            principles: strings(&[
                "Dependencies point inward, towards the domain",
                "Domain packages do not depend on each other or on frameworks",
                "Avoid circular dependencies between packages",
            ]),
            text: BLACKBOX_TEXT.into(),
        },
    }
}

fn hexagonal() -> RulesetDto {
    RulesetDto {
        structure: StructureDto {
            required_directories: directories(&[
                ("cmd", "program entry points"),
                ("internal", "core, ports and adapters"),
            ]),
            allow_other_directories: Some(true),
        },
        rules: RulesDto {
            directories_import: matrix(&[
                (
                    "cmd",
                    &["internal/adapters", "internal/ports", "internal/core"],
                ),
                ("internal/adapters", &["internal/ports", "internal/core"]),
                ("internal/ports", &["internal/core"]),
                ("internal/core", &["internal/core"]),
            ]),
            detect_unused: true,
            shared_external_imports: SharedImportsDto {
                detect: true,
                mode: "error".into(),
                exclusions: strings(COMMON_STDLIB),
                exclusion_patterns: Vec::new(),
            },
            test_files: TestFilesDto {
                lint: true,
                location: "colocated".into(),
                require_blackbox: false,
                exempt_imports: Vec::new(),
            },
            ..RulesDto::default()
        },
        guidance: GuidanceDto {
            description: "Ports and adapters around an isolated core".into(),
            principles: strings(&[
                "The core knows nothing about adapters",
                "Adapters talk to the core only through ports",
                "Avoid circular dependencies between packages",
            ]),
            text: BLACKBOX_TEXT.into(),
        },
    }
}

fn minimal() -> RulesetDto {
    RulesetDto {
        structure: StructureDto {
            required_directories: BTreeMap::new(),
            allow_other_directories: Some(true),
        },
        rules: RulesDto::default(),
        guidance: GuidanceDto {
            description: "Minimal rules for gradual adoption".into(),
            ..GuidanceDto::default()
        },
    }
}
