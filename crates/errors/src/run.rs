//! Runner error types
//!
//! These are scoped to a single environment: the runner records them in the
//! run report and continues with the next environment.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum RunError {
    #[error("dependency install failed: {message}")]
    DependencyInstall { message: String },

    #[error("command failed: {command} (exit code {code:?})")]
    CommandFailed { command: String, code: Option<i32> },

    #[error("command could not be spawned: {command}: {message}")]
    SpawnFailed { command: String, message: String },

    #[error("unknown placeholder {placeholder} in command: {command}")]
    UnknownPlaceholder { placeholder: String, command: String },

    #[error("external command not allow-listed: {program}")]
    ExternalNotAllowed { program: String },

    #[error("execution context setup failed: {message}")]
    ContextSetup { message: String },

    #[error("run interrupted")]
    Interrupted,
}

impl UserFacingError for RunError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::DependencyInstall { .. } => {
                Some("Check the environment's deps and install_command settings.")
            }
            Self::UnknownPlaceholder { .. } => {
                Some("Only {posargs}, {envdir} and {envbindir} are substituted in commands.")
            }
            Self::ExternalNotAllowed { .. } => {
                Some("Add the program to the environment's allowlist_externals.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::DependencyInstall { .. } => Some("RUN_DEP_INSTALL"),
            Self::CommandFailed { .. } => Some("RUN_COMMAND_FAILED"),
            Self::SpawnFailed { .. } => Some("RUN_SPAWN_FAILED"),
            Self::UnknownPlaceholder { .. } => Some("RUN_UNKNOWN_PLACEHOLDER"),
            Self::ExternalNotAllowed { .. } => Some("RUN_EXTERNAL_NOT_ALLOWED"),
            Self::ContextSetup { .. } => Some("RUN_CONTEXT_SETUP"),
            Self::Interrupted => Some("RUN_INTERRUPTED"),
        }
    }
}
