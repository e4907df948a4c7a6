//! Configuration document error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ConfigError {
    #[error("matrix document not found: {path}")]
    NotFound { path: String },

    #[error("parse error: {message}")]
    ParseError { message: String },

    #[error("default list references undefined environment: {name}")]
    UnknownDefault { name: String },

    #[error("environment {env} inherits from undefined environment: {target}")]
    UnknownInherit { env: String, target: String },

    #[error("invalid document: {message}")]
    Invalid { message: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => {
                Some("Provide a matrix document with --config or create envmatrix.toml.")
            }
            Self::ParseError { .. } | Self::Invalid { .. } => {
                Some("Fix the matrix document and retry.")
            }
            Self::UnknownDefault { .. } => {
                Some("Every name in `default` must have a matching [env.<name>] section.")
            }
            Self::UnknownInherit { .. } => {
                Some("Every `inherit` value must name a defined [env.<name>] section.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => Some("CONFIG_NOT_FOUND"),
            Self::ParseError { .. } => Some("CONFIG_PARSE"),
            Self::UnknownDefault { .. } => Some("CONFIG_UNKNOWN_DEFAULT"),
            Self::UnknownInherit { .. } => Some("CONFIG_UNKNOWN_INHERIT"),
            Self::Invalid { .. } => Some("CONFIG_INVALID"),
        }
    }
}
