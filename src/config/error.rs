//! Errors raised while loading a field declaration.

use crate::builder::BuildError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed state field document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl ConfigError {
    /// The configuration mistake, when the document itself parsed.
    pub fn build_error(&self) -> Option<&BuildError> {
        match self {
            ConfigError::Build(err) => Some(err),
            ConfigError::Json(_) => None,
        }
    }
}
