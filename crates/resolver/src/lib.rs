#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Environment resolution for emx
//!
//! Turns a parsed [`DocumentModel`] plus a list of requested environment
//! names into an ordered sequence of fully-merged [`EnvironmentSpec`]s.
//!
//! Settings layer in a fixed order: the document's `[base]` section, the
//! environment's `inherit` chain (outermost ancestor first), and finally
//! the environment's own section. Collection-valued settings extend across
//! layers; a layer replaces a field instead by naming it in `replace`.
//! Scalar settings take the most specific defined value.

use emx_errors::{Error, ResolveError};
use emx_types::{
    DocumentModel, EnvironmentSettings, EnvironmentSpec, MergeStrategy, COLLECTION_FIELDS,
};

/// Installer used when the document does not declare one.
pub const DEFAULT_INSTALL_COMMAND: &[&str] = &["pip", "install"];

/// Resolve the requested environment names into runnable specs.
///
/// An empty `requested` slice selects the document's default list.
///
/// # Errors
///
/// Returns `ResolveError::UnknownEnvironment` when a requested name has no
/// matching environment definition. Nothing is ever executed on that path.
pub fn resolve(model: &DocumentModel, requested: &[String]) -> Result<Vec<EnvironmentSpec>, Error> {
    let names: &[String] = if requested.is_empty() {
        &model.default
    } else {
        requested
    };

    names
        .iter()
        .map(|name| resolve_one(model, name))
        .collect()
}

fn resolve_one(model: &DocumentModel, name: &str) -> Result<EnvironmentSpec, Error> {
    if !model.envs.contains_key(name) {
        return Err(ResolveError::UnknownEnvironment {
            name: name.to_string(),
        }
        .into());
    }

    let mut merged = EnvironmentSettings::default();
    merge_layer(&mut merged, &model.base);
    for layer_name in inherit_chain(model, name) {
        merge_layer(&mut merged, &model.envs[&layer_name]);
    }

    Ok(EnvironmentSpec {
        name: name.to_string(),
        extras: dedup(merged.extras),
        deps: merged.deps,
        commands: merged.commands,
        passenv: dedup(merged.passenv),
        allowlist_externals: dedup(merged.allowlist_externals),
        install_command: merged.install_command.unwrap_or_else(|| {
            DEFAULT_INSTALL_COMMAND
                .iter()
                .map(ToString::to_string)
                .collect()
        }),
        skip_install: merged.skip_install.unwrap_or(false),
        skip: merged.skip.unwrap_or(false),
    })
}

/// Environment names from the outermost inherit ancestor down to `name`.
///
/// Chains are validated acyclic at parse time.
fn inherit_chain(model: &DocumentModel, name: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = Some(name.to_string());
    while let Some(n) = current {
        current = model.envs[&n].inherit.clone();
        chain.push(n);
    }
    chain.reverse();
    chain
}

fn merge_layer(acc: &mut EnvironmentSettings, layer: &EnvironmentSettings) {
    for &field in COLLECTION_FIELDS {
        let strategy = MergeStrategy::for_field(&layer.replace, field);
        let (dst, src) = match field {
            "extras" => (&mut acc.extras, &layer.extras),
            "deps" => (&mut acc.deps, &layer.deps),
            "commands" => (&mut acc.commands, &layer.commands),
            "passenv" => (&mut acc.passenv, &layer.passenv),
            "allowlist_externals" => (&mut acc.allowlist_externals, &layer.allowlist_externals),
            _ => unreachable!("unhandled collection field {field}"),
        };
        match strategy {
            MergeStrategy::Replace => *dst = src.clone(),
            MergeStrategy::Extend => dst.extend(src.iter().cloned()),
        }
    }

    if layer.install_command.is_some() {
        acc.install_command.clone_from(&layer.install_command);
    }
    if layer.skip_install.is_some() {
        acc.skip_install = layer.skip_install;
    }
    if layer.skip.is_some() {
        acc.skip = layer.skip;
    }
}

/// Order-preserving de-duplication for set-valued settings.
fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values.into_iter().filter(|v| seen.insert(v.clone())).collect()
}
