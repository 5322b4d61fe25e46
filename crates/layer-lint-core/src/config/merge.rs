//! Preset + overrides merge.
//!
//! | Field class | Policy |
//! |---|---|
//! | maps | override entries added to / replacing entries in the base |
//! | cumulative lists | ordered union, base first |
//! | scalar strings | override wins only if non-empty |
//! | booleans | logical OR; a `false` override never clears a `true` base |
//! | thresholds | override wins only if `> 0` |

use std::collections::BTreeMap;

use super::dto::{
    CoverageDto, GuidanceDto, RulesDto, RulesetDto, SharedImportsDto, StructureDto, TestFilesDto,
};

/// Merges `overrides` on top of `base`.
#[must_use]
pub fn merge(base: RulesetDto, overrides: RulesetDto) -> RulesetDto {
    RulesetDto {
        structure: merge_structure(base.structure, overrides.structure),
        rules: merge_rules(base.rules, overrides.rules),
        guidance: merge_guidance(base.guidance, overrides.guidance),
    }
}

fn merge_structure(base: StructureDto, over: StructureDto) -> StructureDto {
    StructureDto {
        required_directories: merge_map(base.required_directories, over.required_directories),
        allow_other_directories: either(base.allow_other_directories, over.allow_other_directories),
    }
}

fn merge_rules(base: RulesDto, over: RulesDto) -> RulesDto {
    RulesDto {
        directories_import: merge_map(base.directories_import, over.directories_import),
        exclude_imports: union(base.exclude_imports, over.exclude_imports),
        detect_unused: base.detect_unused || over.detect_unused,
        strict_test_naming: base.strict_test_naming || over.strict_test_naming,
        shared_external_imports: SharedImportsDto {
            detect: base.shared_external_imports.detect || over.shared_external_imports.detect,
            mode: scalar(
                base.shared_external_imports.mode,
                over.shared_external_imports.mode,
            ),
            exclusions: union(
                base.shared_external_imports.exclusions,
                over.shared_external_imports.exclusions,
            ),
            exclusion_patterns: union(
                base.shared_external_imports.exclusion_patterns,
                over.shared_external_imports.exclusion_patterns,
            ),
        },
        test_files: TestFilesDto {
            lint: base.test_files.lint || over.test_files.lint,
            location: scalar(base.test_files.location, over.test_files.location),
            require_blackbox: base.test_files.require_blackbox || over.test_files.require_blackbox,
            exempt_imports: union(base.test_files.exempt_imports, over.test_files.exempt_imports),
        },
        coverage: CoverageDto {
            enabled: base.coverage.enabled || over.coverage.enabled,
            threshold: threshold(base.coverage.threshold, over.coverage.threshold),
            package_thresholds: merge_map(
                base.coverage.package_thresholds,
                over.coverage.package_thresholds,
            ),
        },
    }
}

fn merge_guidance(base: GuidanceDto, over: GuidanceDto) -> GuidanceDto {
    GuidanceDto {
        description: scalar(base.description, over.description),
        principles: union(base.principles, over.principles),
        text: scalar(base.text, over.text),
    }
}

/// Boolean OR that keeps "unset" distinguishable from an explicit `false`.
fn either(base: Option<bool>, over: Option<bool>) -> Option<bool> {
    match (base, over) {
        (None, None) => None,
        (b, o) => Some(b.unwrap_or(false) || o.unwrap_or(false)),
    }
}

fn merge_map<V>(mut base: BTreeMap<String, V>, over: BTreeMap<String, V>) -> BTreeMap<String, V> {
    base.extend(over);
    base
}

fn union(mut base: Vec<String>, over: Vec<String>) -> Vec<String> {
    for item in over {
        if !base.contains(&item) {
            base.push(item);
        }
    }
    base
}

fn scalar(base: String, over: String) -> String {
    if over.is_empty() {
        base
    } else {
        over
    }
}

fn threshold(base: f64, over: f64) -> f64 {
    if over > 0.0 {
        over
    } else {
        base
    }
}
