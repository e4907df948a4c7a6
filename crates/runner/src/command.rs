//! Command preparation
//!
//! Declared command lines are whitespace-tokenized, then placeholders are
//! substituted: `{posargs}` (trailing CLI arguments, spliced when the token
//! is the bare placeholder), `{envdir}` and `{envbindir}` (context paths).
//! Any placeholder left after substitution fails the command with a clear
//! diagnostic instead of reaching the spawned process.

use emx_errors::RunError;
use emx_types::EnvironmentSpec;

use crate::context::ExecutionContext;

/// Tokenize and substitute one command line.
///
/// # Errors
///
/// Returns `RunError::UnknownPlaceholder` when a `{...}` reference is not
/// one of the supported placeholders.
pub fn prepare(
    line: &str,
    posargs: &[String],
    context: &ExecutionContext,
) -> Result<Vec<String>, RunError> {
    let mut tokens = Vec::new();
    for raw in line.split_whitespace() {
        if raw == "{posargs}" {
            tokens.extend(posargs.iter().cloned());
            continue;
        }
        let substituted = raw
            .replace("{envdir}", &context.env_dir().display().to_string())
            .replace("{envbindir}", &context.bin_dir().display().to_string())
            .replace("{posargs}", &posargs.join(" "));
        if let Some(placeholder) = leftover_placeholder(&substituted) {
            return Err(RunError::UnknownPlaceholder {
                placeholder,
                command: line.to_string(),
            });
        }
        tokens.push(substituted);
    }
    Ok(tokens)
}

/// Enforce the external-executable allow-list for a command's program.
///
/// A program is permitted when it resolves inside the context's bin
/// directory, or when the allow-list names it (exactly, by trailing path
/// component, or with the `*` wildcard).
///
/// # Errors
///
/// Returns `RunError::ExternalNotAllowed` otherwise.
pub fn check_external(
    program: &str,
    spec: &EnvironmentSpec,
    context: &ExecutionContext,
) -> Result<(), RunError> {
    let path = std::path::Path::new(program);
    if path.is_absolute() {
        if path.starts_with(context.bin_dir()) {
            return Ok(());
        }
    } else if context.bin_dir().join(program).is_file() {
        return Ok(());
    }

    let basename = program.rsplit('/').next().unwrap_or(program);
    let allowed = spec
        .allowlist_externals
        .iter()
        .any(|entry| entry == "*" || entry == program || entry == basename);
    if allowed {
        Ok(())
    } else {
        Err(RunError::ExternalNotAllowed {
            program: program.to_string(),
        })
    }
}

fn leftover_placeholder(token: &str) -> Option<String> {
    let open = token.find('{')?;
    let close = token[open..].find('}')?;
    Some(token[open..=open + close].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_with_allowlist(allowlist: &[&str]) -> EnvironmentSpec {
        EnvironmentSpec {
            name: "t".to_string(),
            extras: vec![],
            deps: vec![],
            commands: vec![],
            passenv: vec![],
            allowlist_externals: allowlist.iter().map(ToString::to_string).collect(),
            install_command: vec![],
            skip_install: true,
            skip: false,
        }
    }

    #[tokio::test]
    async fn bare_posargs_token_splices() {
        let context = ExecutionContext::create("t").await.unwrap();
        let posargs = vec!["-k".to_string(), "smoke".to_string()];
        let tokens = prepare("pytest {posargs}", &posargs, &context).unwrap();
        assert_eq!(tokens, vec!["pytest", "-k", "smoke"]);
    }

    #[tokio::test]
    async fn empty_posargs_vanish() {
        let context = ExecutionContext::create("t").await.unwrap();
        let tokens = prepare("pytest {posargs}", &[], &context).unwrap();
        assert_eq!(tokens, vec!["pytest"]);
    }

    #[tokio::test]
    async fn envdir_substitutes_inline() {
        let context = ExecutionContext::create("t").await.unwrap();
        let tokens = prepare("test -d {envdir}", &[], &context).unwrap();
        assert_eq!(tokens[2], context.env_dir().display().to_string());
    }

    #[tokio::test]
    async fn unknown_placeholder_is_rejected() {
        let context = ExecutionContext::create("t").await.unwrap();
        let err = prepare("echo {workdir}/x", &[], &context).unwrap_err();
        match err {
            RunError::UnknownPlaceholder { placeholder, .. } => {
                assert_eq!(placeholder, "{workdir}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn allowlist_matches_wildcard_and_basename() {
        let context = ExecutionContext::create("t").await.unwrap();
        let spec = spec_with_allowlist(&["make"]);
        assert!(check_external("make", &spec, &context).is_ok());
        assert!(check_external("/usr/bin/make", &spec, &context).is_ok());
        assert!(check_external("yarn", &spec, &context).is_err());

        let anything = spec_with_allowlist(&["*"]);
        assert!(check_external("yarn", &anything, &context).is_ok());
    }
}
