//! Integration tests for environment resolution

use emx_config::parse;
use emx_errors::{Error, ResolveError};
use emx_resolver::resolve;

const DOCUMENT: &str = r#"
default = ["unit", "style"]

[base]
passenv = ["HOME"]
deps = ["pip-tools"]
install_command = ["pip", "install"]

[env.unit]
extras = ["data"]
deps = ["coverage"]
commands = ["pytest {posargs}"]

[env.style]
skip_install = true
deps = ["flake8"]
commands = ["flake8 ."]

[env.strict-style]
inherit = "style"
passenv = ["NO_COLOR"]
commands = ["black --check ."]

[env.lint-only]
inherit = "style"
replace = ["deps", "commands"]
deps = ["ruff"]
commands = ["ruff check ."]
"#;

#[test]
fn empty_request_resolves_default_list_in_order() {
    let model = parse(DOCUMENT).unwrap();
    let specs = resolve(&model, &[]).unwrap();
    let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["unit", "style"]);
}

#[test]
fn explicit_request_resolves_only_named_environments() {
    let model = parse(DOCUMENT).unwrap();
    let specs = resolve(&model, &["style".to_string()]).unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].name, "style");
}

#[test]
fn unknown_environment_fails_resolution() {
    let model = parse(DOCUMENT).unwrap();
    let err = resolve(&model, &["missing".to_string()]).unwrap_err();
    match err {
        Error::Resolve(ResolveError::UnknownEnvironment { name }) => {
            assert_eq!(name, "missing");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn base_settings_extend_into_environments() {
    let model = parse(DOCUMENT).unwrap();
    let specs = resolve(&model, &["unit".to_string()]).unwrap();
    let unit = &specs[0];
    assert_eq!(unit.passenv, vec!["HOME"]);
    assert_eq!(unit.deps, vec!["pip-tools", "coverage"]);
    assert_eq!(unit.extras, vec!["data"]);
    assert!(!unit.skip_install);
}

#[test]
fn inherit_layers_between_base_and_environment() {
    let model = parse(DOCUMENT).unwrap();
    let specs = resolve(&model, &["strict-style".to_string()]).unwrap();
    let strict = &specs[0];
    // base, then style, then strict-style
    assert_eq!(strict.deps, vec!["pip-tools", "flake8"]);
    assert_eq!(strict.commands, vec!["flake8 .", "black --check ."]);
    assert_eq!(strict.passenv, vec!["HOME", "NO_COLOR"]);
    // scalar from the inherited layer survives
    assert!(strict.skip_install);
}

#[test]
fn replace_overrides_instead_of_extending() {
    let model = parse(DOCUMENT).unwrap();
    let specs = resolve(&model, &["lint-only".to_string()]).unwrap();
    let lint = &specs[0];
    assert_eq!(lint.deps, vec!["ruff"]);
    assert_eq!(lint.commands, vec!["ruff check ."]);
    // fields not named in replace still extend
    assert_eq!(lint.passenv, vec!["HOME"]);
}

#[test]
fn install_command_defaults_when_undeclared() {
    let model = parse("[env.bare]\n").unwrap();
    let specs = resolve(&model, &["bare".to_string()]).unwrap();
    assert_eq!(specs[0].install_command, vec!["pip", "install"]);
}

#[test]
fn duplicate_set_entries_collapse_in_order() {
    let text = r#"
[base]
passenv = ["HOME", "LANG"]

[env.unit]
passenv = ["LANG", "TERM"]
"#;
    let model = parse(text).unwrap();
    let specs = resolve(&model, &["unit".to_string()]).unwrap();
    assert_eq!(specs[0].passenv, vec!["HOME", "LANG", "TERM"]);
}
