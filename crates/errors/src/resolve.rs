//! Environment resolution error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ResolveError {
    #[error("unknown environment: {name}")]
    UnknownEnvironment { name: String },
}

impl UserFacingError for ResolveError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownEnvironment { .. } => {
                Some("Run with --list to see the environments the document defines.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::UnknownEnvironment { .. } => Some("RESOLVE_UNKNOWN_ENV"),
        }
    }
}
