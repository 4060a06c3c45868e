//! Cross-cutting error types for Blackwell.
//!
//! This module defines errors that can originate from any crate in the
//! system. Domain-specific errors (e.g., `RegistryError`, `ConfigError`) are
//! defined in their respective crates and converge to `anyhow` in `bw-cli`.

use thiserror::Error;

/// Errors that can be raised by any Blackwell crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A create collided with an existing entity.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// Data failed validation (format, constraints).
    #[error("validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    #[must_use]
    pub fn client_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "client",
            id: id.into(),
        }
    }

    #[must_use]
    pub fn client_exists(id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: "client",
            id: id.into(),
        }
    }
}
