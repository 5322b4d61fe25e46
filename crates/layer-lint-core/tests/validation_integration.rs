//! Integration test: config text → graph → validator → verdict.
//!
//! Each scenario resolves a TOML document, builds a graph from scanned
//! records and checks the report and the build verdict together.

use layer_lint_core::{
    load_config, should_fail, threshold_for, Graph, ResolvedConfig, ScannedFile,
    ValidationReport, Validator, ViolationKind,
};
use std::collections::BTreeMap;

const MODULE: &str = "example.com/app";

fn import(rel: &str) -> String {
    format!("{MODULE}/{rel}")
}

fn file(path: &str, package: &str, imports: &[&str]) -> ScannedFile {
    let imports: Vec<String> = imports
        .iter()
        .map(|i| i.strip_prefix("@/").map_or_else(|| (*i).to_string(), import))
        .collect();
    let refs: Vec<&str> = imports.iter().map(String::as_str).collect();
    ScannedFile::new(path, package, &refs)
}

fn config(toml: &str) -> ResolvedConfig {
    load_config(toml, Some(MODULE)).expect("fixture config should resolve")
}

fn validate(config: &ResolvedConfig, files: &[ScannedFile]) -> ValidationReport {
    let graph = Graph::build(files, MODULE);
    Validator::builder()
        .config(config.clone())
        .build()
        .expect("validator should build")
        .validate(&graph)
}

const THREE_LAYERS: &str = r#"
[rules]
directories_import = { cmd = ["pkg"], pkg = [], internal = [] }
"#;

// ── Layering ──

#[test]
fn allowed_dependency_is_clean() {
    let c = config(THREE_LAYERS);
    let report = validate(
        &c,
        &[
            file("cmd/main.go", "main", &["@/pkg"]),
            file("pkg/pkg.go", "pkg", &[]),
        ],
    );
    assert!(report.is_clean(), "{:#?}", report.violations);
    assert!(!should_fail(&report.violations, &c));
}

#[test]
fn sibling_packages_in_closed_layer_are_forbidden() {
    let c = config(THREE_LAYERS);
    let report = validate(
        &c,
        &[
            file("pkg/service1/service1.go", "service1", &["@/pkg/service2"]),
            file("pkg/service2/service2.go", "service2", &[]),
        ],
    );
    assert_eq!(report.violations.len(), 1);
    let v = &report.violations[0];
    assert_eq!(v.kind, ViolationKind::ForbiddenImport);
    assert!(v.message.contains("pkg/service1/service1.go"));
    assert!(v.message.contains("pkg/service2"));
    assert!(should_fail(&report.violations, &c));
}

// ── Shared external imports ──

fn shared_config(mode: &str, extra: &str) -> ResolvedConfig {
    config(&format!(
        r#"
[rules]
directories_import = {{ cmd = ["internal"], internal = [] }}

[rules.shared_external_imports]
detect = true
mode = "{mode}"
{extra}
"#
    ))
}

fn shared_files() -> Vec<ScannedFile> {
    vec![
        file("cmd/main.go", "main", &["@/internal/repo", "github.com/x/y"]),
        file("internal/repo/repo.go", "repo", &["github.com/x/y"]),
    ]
}

#[test]
fn shared_import_warn_mode_passes() {
    let c = shared_config("warn", "");
    let report = validate(&c, &shared_files());
    assert_eq!(report.violations.len(), 1);
    let v = &report.violations[0];
    assert_eq!(v.kind, ViolationKind::SharedExternalImport);
    assert_eq!(v.import.as_deref(), Some("github.com/x/y"));
    assert!(v.message.contains("2 layers"));
    assert!(!should_fail(&report.violations, &c));
}

#[test]
fn shared_import_error_mode_fails() {
    let c = shared_config("error", "");
    let report = validate(&c, &shared_files());
    assert_eq!(report.violations.len(), 1);
    assert!(should_fail(&report.violations, &c));
}

#[test]
fn shared_import_exclusions() {
    for extra in [
        "exclusions = [\"github.com/x/y\"]",
        "exclusion_patterns = [\"github.com/x/*\"]",
    ] {
        let report = validate(&shared_config("error", extra), &shared_files());
        assert!(
            report.by_kind(ViolationKind::SharedExternalImport).is_empty(),
            "{extra}"
        );
    }
}

#[test]
fn shared_import_within_one_layer() {
    let report = validate(
        &shared_config("error", ""),
        &[
            file("internal/a/a.go", "a", &["github.com/x/y"]),
            file("internal/b/b.go", "b", &["github.com/x/y"]),
        ],
    );
    assert!(report.is_clean());
}

// ── Test isolation ──

const BLACKBOX: &str = r#"
[rules]
directories_import = { cmd = ["pkg"], pkg = [], internal = [] }

[rules.test_files]
lint = true
require_blackbox = true
"#;

#[test]
fn whitebox_and_blackbox_tests() {
    let c = config(BLACKBOX);
    let report = validate(
        &c,
        &[
            file("pkg/app/app.go", "app", &[]),
            file("pkg/app/app_test.go", "app", &[]),
            file("pkg/user/user.go", "user", &[]),
            file("pkg/user/user_test.go", "user_test", &["@/pkg/user"]),
        ],
    );
    let whitebox = report.by_kind(ViolationKind::WhiteboxTest);
    assert_eq!(whitebox.len(), 1);
    assert_eq!(whitebox[0].file.as_deref(), Some("pkg/app/app_test.go"));
    assert!(whitebox[0].message.contains("app_test"));
    assert_eq!(report.violations.len(), 1);
    assert!(report.guidance.is_some());
}

#[test]
fn blackbox_test_with_forbidden_import() {
    let c = config(BLACKBOX);
    let report = validate(
        &c,
        &[
            file("pkg/user/user.go", "user", &[]),
            file(
                "pkg/user/user_test.go",
                "user_test",
                &["@/pkg/user", "@/internal/db"],
            ),
            file("internal/db/db.go", "db", &[]),
        ],
    );
    assert_eq!(report.violations.len(), 1);
    let v = &report.violations[0];
    assert_eq!(v.kind, ViolationKind::ForbiddenImport);
    assert_eq!(v.import.as_deref(), Some(import("internal/db").as_str()));
}

#[test]
fn strict_naming_orphans() {
    let c = config(
        r#"
[rules]
strict_test_naming = true

[rules.test_files]
lint = true
"#,
    );
    let report = validate(
        &c,
        &[
            file("internal/a/foo_test.go", "a_test", &[]),
            file("internal/a/bar.go", "a", &[]),
        ],
    );
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].kind, ViolationKind::TestNamingOrphan);
}

// ── Presets ──

#[test]
fn clean_arch_preset_end_to_end() {
    let c = config(
        r#"
preset = "clean-arch"

[overrides.rules.test_files]
exempt_imports = ["example.com/app/internal/testutil"]
"#,
    );
    let report = validate(
        &c,
        &[
            file("cmd/api/main.go", "main", &["@/internal/app", "@/internal/infrastructure"]),
            file("internal/app/service.go", "app", &["@/internal/domain"]),
            file(
                "internal/infrastructure/repo.go",
                "infrastructure",
                &["@/internal/domain"],
            ),
            file("internal/domain/user.go", "domain", &["@/internal/app"]),
            file(
                "internal/domain/user_test.go",
                "domain_test",
                &["@/internal/domain", "@/internal/testutil"],
            ),
        ],
    );

    let codes: Vec<&str> = report.violations.iter().map(|v| v.code()).collect();
    assert_eq!(codes, vec!["LL001"], "{:#?}", report.violations);
    assert_eq!(
        report.violations[0].file.as_deref(),
        Some("internal/domain/user.go")
    );
}

// ── Coverage thresholds ──

#[test]
fn hierarchical_thresholds() {
    let cmd = BTreeMap::from([("cmd".to_string(), 40.0)]);
    assert!((threshold_for("mod/cmd/foo/bar", "mod", 70.0, &cmd) - 40.0).abs() < f64::EPSILON);

    let nested = BTreeMap::from([
        ("internal".to_string(), 80.0),
        ("internal/domain".to_string(), 90.0),
    ]);
    assert!(
        (threshold_for("mod/internal/domain", "mod", 70.0, &nested) - 90.0).abs() < f64::EPSILON
    );
    assert!((threshold_for("other/lib", "mod", 70.0, &nested) - 70.0).abs() < f64::EPSILON);
}

// ── Determinism ──

#[test]
fn repeated_validation_is_byte_identical() {
    let c = shared_config("warn", "");
    let files = vec![
        file("cmd/main.go", "main", &["github.com/acme/log", "@/internal/repo"]),
        file(
            "internal/repo/repo.go",
            "repo",
            &["github.com/acme/log", "@/internal/db"],
        ),
        file("internal/db/db.go", "db", &[]),
    ];

    let first = validate(&c, &files).render_compact();
    let second = validate(&c, &files).render_compact();
    assert_eq!(first, second);

    insta::assert_snapshot!(first.trim_end(), @r#"
    .: warning [LL003] external import "github.com/acme/log" is used by 2 layers (cmd, internal)
    internal/repo/repo.go: error [LL001] internal -> internal dependency not allowed: internal/repo/repo.go imports internal/db
    "#);
}
