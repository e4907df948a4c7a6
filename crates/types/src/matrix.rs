//! Matrix document model
//!
//! A matrix document declares named execution environments. Settings appear
//! in three layers: the shared `[base]` section, an optional `inherit`
//! target, and the environment's own `[env.<name>]` section. Collection
//! valued settings extend across layers unless the environment lists the
//! field in `replace`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Collection-valued settings that participate in extend/replace merging.
pub const COLLECTION_FIELDS: &[&str] = &[
    "extras",
    "deps",
    "commands",
    "passenv",
    "allowlist_externals",
];

/// How a layer's value combines with the values beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Append the layer's entries after the accumulated entries.
    Extend,
    /// Discard the accumulated entries and use the layer's alone.
    Replace,
}

impl MergeStrategy {
    /// Strategy for `field` given an environment's `replace` list.
    #[must_use]
    pub fn for_field(replace: &[String], field: &str) -> Self {
        if replace.iter().any(|f| f == field) {
            Self::Replace
        } else {
            Self::Extend
        }
    }
}

/// One layer of environment settings, as written in the document.
///
/// Scalar settings are `Option` so the resolver can tell "unset" from an
/// explicit value when layering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentSettings {
    /// Optional dependency groups of the project under test.
    #[serde(default)]
    pub extras: Vec<String>,
    /// Direct dependency specifiers.
    #[serde(default)]
    pub deps: Vec<String>,
    /// Command lines, executed in order.
    #[serde(default)]
    pub commands: Vec<String>,
    /// Process environment variables allowed through to commands.
    #[serde(default)]
    pub passenv: Vec<String>,
    /// Executables permitted to run from outside the context's bin dir.
    #[serde(default)]
    pub allowlist_externals: Vec<String>,
    /// Command used to install each dependency target; empty disables
    /// installation entirely.
    #[serde(default)]
    pub install_command: Option<Vec<String>>,
    /// Suppress installation of the project under test.
    #[serde(default)]
    pub skip_install: Option<bool>,
    /// Mark the environment disabled; it is reported as skipped.
    #[serde(default)]
    pub skip: Option<bool>,
    /// Name of another environment whose settings layer beneath this one.
    #[serde(default)]
    pub inherit: Option<String>,
    /// Collection fields for which this layer replaces instead of extends.
    #[serde(default)]
    pub replace: Vec<String>,
}

/// The parsed matrix document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentModel {
    /// Ordered default execution list.
    #[serde(default)]
    pub default: Vec<String>,
    /// Settings merged into every environment.
    #[serde(default)]
    pub base: EnvironmentSettings,
    /// Environment definitions by name.
    #[serde(default, rename = "env")]
    pub envs: BTreeMap<String, EnvironmentSettings>,
}

/// A fully-merged, ready-to-run environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub name: String,
    pub extras: Vec<String>,
    pub deps: Vec<String>,
    pub commands: Vec<String>,
    pub passenv: Vec<String>,
    pub allowlist_externals: Vec<String>,
    pub install_command: Vec<String>,
    pub skip_install: bool,
    pub skip: bool,
}

impl EnvironmentSpec {
    /// Installation targets in install order: the project under test (with
    /// extras) unless `skip_install`, then each direct dependency.
    #[must_use]
    pub fn install_targets(&self) -> Vec<String> {
        let mut targets = Vec::new();
        if !self.skip_install {
            if self.extras.is_empty() {
                targets.push(".".to_string());
            } else {
                targets.push(format!(".[{}]", self.extras.join(",")));
            }
        }
        targets.extend(self.deps.iter().cloned());
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_strategy_honors_replace_list() {
        let replace = vec!["commands".to_string()];
        assert_eq!(
            MergeStrategy::for_field(&replace, "commands"),
            MergeStrategy::Replace
        );
        assert_eq!(
            MergeStrategy::for_field(&replace, "deps"),
            MergeStrategy::Extend
        );
    }

    #[test]
    fn install_targets_bundle_extras_with_project() {
        let spec = EnvironmentSpec {
            name: "unit".to_string(),
            extras: vec!["data".to_string(), "jupyter".to_string()],
            deps: vec!["coverage".to_string()],
            commands: vec![],
            passenv: vec![],
            allowlist_externals: vec![],
            install_command: vec!["pip".to_string(), "install".to_string()],
            skip_install: false,
            skip: false,
        };
        assert_eq!(spec.install_targets(), vec![".[data,jupyter]", "coverage"]);
    }

    #[test]
    fn install_targets_respect_skip_install() {
        let spec = EnvironmentSpec {
            name: "style".to_string(),
            extras: vec![],
            deps: vec!["flake8".to_string()],
            commands: vec![],
            passenv: vec![],
            allowlist_externals: vec![],
            install_command: vec![],
            skip_install: true,
            skip: false,
        };
        assert_eq!(spec.install_targets(), vec!["flake8"]);
    }
}
