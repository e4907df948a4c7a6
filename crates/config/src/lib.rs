#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Matrix document loading for emx
//!
//! This crate parses the declarative matrix document (TOML) into the
//! [`DocumentModel`] and validates its internal references at load time:
//! every name in the default list and every `inherit` target must resolve
//! to a defined environment, inherit chains must be acyclic, and `replace`
//! may only name collection-valued settings.
//!
//! Parsing is pure: the same text always yields a structurally equal model.

use std::collections::HashSet;
use std::path::Path;

use emx_errors::{ConfigError, Error};
use emx_types::{DocumentModel, COLLECTION_FIELDS};
use tracing::debug;

/// Parse a matrix document from text.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` for malformed TOML (including duplicate
/// environment tables, which the TOML parser rejects), and the more specific
/// `ConfigError` variants for reference and merge-marker violations.
pub fn parse(text: &str) -> Result<DocumentModel, Error> {
    let model: DocumentModel = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })?;
    validate(&model)?;
    Ok(model)
}

/// Load and parse a matrix document from a file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` when the file does not exist, otherwise
/// the same errors as [`parse`].
pub async fn load(path: &Path) -> Result<DocumentModel, Error> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let text = tokio::fs::read_to_string(path).await?;
    let model = parse(&text)?;
    debug!(
        path = %path.display(),
        environments = model.envs.len(),
        "loaded matrix document"
    );
    Ok(model)
}

fn validate(model: &DocumentModel) -> Result<(), Error> {
    if model.base.inherit.is_some() {
        return Err(ConfigError::Invalid {
            message: "[base] may not declare inherit".to_string(),
        }
        .into());
    }

    let mut seen_defaults = HashSet::new();
    for name in &model.default {
        if !model.envs.contains_key(name) {
            return Err(ConfigError::UnknownDefault { name: name.clone() }.into());
        }
        if !seen_defaults.insert(name.clone()) {
            return Err(ConfigError::Invalid {
                message: format!("default list names environment {name} more than once"),
            }
            .into());
        }
    }

    for (name, settings) in &model.envs {
        if let Some(target) = &settings.inherit {
            if !model.envs.contains_key(target) {
                return Err(ConfigError::UnknownInherit {
                    env: name.clone(),
                    target: target.clone(),
                }
                .into());
            }
        }
        validate_replace(name, &settings.replace)?;
    }
    validate_replace("base", &model.base.replace)?;

    check_inherit_cycles(model)?;
    Ok(())
}

fn validate_replace(env: &str, replace: &[String]) -> Result<(), Error> {
    for field in replace {
        if !COLLECTION_FIELDS.contains(&field.as_str()) {
            return Err(ConfigError::Invalid {
                message: format!("environment {env}: replace names non-collection field {field}"),
            }
            .into());
        }
    }
    Ok(())
}

fn check_inherit_cycles(model: &DocumentModel) -> Result<(), Error> {
    for start in model.envs.keys() {
        let mut seen = HashSet::new();
        let mut current = start;
        while let Some(target) = model.envs.get(current).and_then(|s| s.inherit.as_ref()) {
            if !seen.insert(current.clone()) {
                return Err(ConfigError::Invalid {
                    message: format!("inherit cycle involving environment {start}"),
                }
                .into());
            }
            current = target;
        }
    }
    Ok(())
}
