//! Error types for the permissions module.

use thiserror::Error;

/// Errors that can occur during permission operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermsError {
    /// Permission node not known to the engine.
    #[error("unknown permission node: {0}")]
    UnknownPermission(String),

    /// Core error.
    #[error("core error: {0}")]
    CoreError(#[from] blocklocker_core::CoreError),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
