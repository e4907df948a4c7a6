#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the emx environment-matrix runner
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone for easier handling across the
//! event and reporting layers.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod resolve;
pub mod run;

// Re-export all error types at the root
pub use config::ConfigError;
pub use resolve::ResolveError;
pub use run::RunError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("run error: {0}")]
    Run(#[from] RunError),

    #[error("{message}")]
    Io { message: String },
}

impl Error {
    /// Whether this error occurred before any environment was executed
    ///
    /// Configuration and resolution failures abort the whole run; they map
    /// to a distinct process exit code so callers can tell them apart from
    /// in-environment command failures.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Error::Config(_) | Error::Resolve(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}

/// Errors that can present a concise, actionable message to the CLI user.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Config(err) => err.user_message(),
            Error::Resolve(err) => err.user_message(),
            Error::Run(err) => err.user_message(),
            Error::Io { message } => Cow::Owned(message.clone()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Config(err) => err.user_hint(),
            Error::Resolve(err) => err.user_hint(),
            Error::Run(err) => err.user_hint(),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Config(err) => err.user_code(),
            Error::Resolve(err) => err.user_code(),
            Error::Run(err) => err.user_code(),
            Error::Io { .. } => Some("EMX_IO"),
        }
    }
}
