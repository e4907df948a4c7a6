//! Environment variable filtering
//!
//! Spawned commands see exactly the allow-listed intersection of the
//! invoking process's variables, plus the platform-mandatory `PATH` (with
//! the context's bin directory prepended) and a context-private `TMPDIR`.
//! Everything else is stripped.

use std::collections::HashMap;

use emx_types::EnvironmentSpec;

use crate::context::ExecutionContext;

/// Fallback search path when the invoking process has no `PATH` at all.
const DEFAULT_PATH: &str = "/usr/bin:/bin";

/// Compute the variable set visible to commands in `spec`'s context.
#[must_use]
pub fn visible_variables(
    spec: &EnvironmentSpec,
    context: &ExecutionContext,
) -> HashMap<String, String> {
    let mut vars: HashMap<String, String> = std::env::vars()
        .filter(|(name, _)| spec.passenv.iter().any(|allowed| allowed == name))
        .collect();

    let inherited_path = std::env::var("PATH").unwrap_or_else(|_| DEFAULT_PATH.to_string());
    vars.insert(
        "PATH".to_string(),
        format!("{}:{inherited_path}", context.bin_dir().display()),
    );
    vars.insert(
        "TMPDIR".to_string(),
        context.tmp_dir().display().to_string(),
    );

    vars
}
