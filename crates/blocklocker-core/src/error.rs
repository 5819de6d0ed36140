//! Error types for BlockLocker core.

use thiserror::Error;

/// Errors raised when parsing core values from their textual names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    #[error("unknown block face: {0}")]
    UnknownBlockFace(String),

    #[error("unknown game mode: {0}")]
    UnknownGameMode(String),

    #[error("unknown translation key: {0}")]
    UnknownTranslationKey(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
