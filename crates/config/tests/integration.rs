//! Integration tests for matrix document loading

use emx_config::{load, parse};
use emx_errors::{ConfigError, Error};
use std::io::Write;
use tempfile::NamedTempFile;

const DOCUMENT: &str = r#"
default = ["unit", "style"]

[base]
passenv = ["HOME", "LANG"]
install_command = ["pip", "install"]

[env.unit]
extras = ["data"]
deps = ["coverage"]
commands = ["pytest {posargs}"]

[env.style]
deps = ["flake8", "black"]
commands = ["flake8 .", "black --check ."]
"#;

#[test]
fn parse_full_document() {
    let model = parse(DOCUMENT).unwrap();
    assert_eq!(model.default, vec!["unit", "style"]);
    assert_eq!(model.base.passenv, vec!["HOME", "LANG"]);
    assert_eq!(
        model.base.install_command.as_deref(),
        Some(["pip".to_string(), "install".to_string()].as_slice())
    );
    assert_eq!(model.envs.len(), 2);
    assert_eq!(model.envs["unit"].extras, vec!["data"]);
    assert_eq!(model.envs["style"].commands.len(), 2);
}

#[test]
fn parse_is_idempotent() {
    let first = parse(DOCUMENT).unwrap();
    let second = parse(DOCUMENT).unwrap();
    assert_eq!(first, second);
}

#[test]
fn malformed_document_is_a_parse_error() {
    let err = parse("default = [unquoted").unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::ParseError { .. })
    ));
}

#[test]
fn unknown_setting_is_a_parse_error() {
    let err = parse("[env.unit]\ncomands = [\"pytest\"]\n").unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::ParseError { .. })
    ));
}

#[test]
fn default_list_must_reference_defined_environments() {
    let err = parse("default = [\"missing\"]\n").unwrap_err();
    match err {
        Error::Config(ConfigError::UnknownDefault { name }) => assert_eq!(name, "missing"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn inherit_must_reference_defined_environments() {
    let text = "[env.unit]\ninherit = \"ghost\"\n";
    let err = parse(text).unwrap_err();
    match err {
        Error::Config(ConfigError::UnknownInherit { env, target }) => {
            assert_eq!(env, "unit");
            assert_eq!(target, "ghost");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn duplicate_default_entries_are_rejected() {
    let err = parse("default = [\"unit\", \"unit\"]\n\n[env.unit]\n").unwrap_err();
    match err {
        Error::Config(ConfigError::Invalid { message }) => {
            assert!(message.contains("more than once"), "message: {message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn inherit_cycles_are_rejected() {
    let text = r#"
[env.a]
inherit = "b"

[env.b]
inherit = "a"
"#;
    let err = parse(text).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Invalid { .. })));
}

#[test]
fn replace_must_name_collection_fields() {
    let text = "[env.unit]\nreplace = [\"skip_install\"]\n";
    let err = parse(text).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Invalid { .. })));
}

#[test]
fn base_may_not_inherit() {
    let text = "[base]\ninherit = \"unit\"\n\n[env.unit]\n";
    let err = parse(text).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Invalid { .. })));
}

#[tokio::test]
async fn load_reads_document_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DOCUMENT.as_bytes()).unwrap();
    let model = load(file.path()).await.unwrap();
    assert_eq!(model.default, vec!["unit", "style"]);
}

#[tokio::test]
async fn load_reports_missing_files() {
    let err = load(std::path::Path::new("/nonexistent/envmatrix.toml"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::NotFound { .. })));
}
