//! Error types for the engine.

use blocklocker_core::{BlockFace, BlockPos, GameMode, Material};
use blocklocker_perms::Permission;
use thiserror::Error;

/// Errors loading or saving configuration and translation files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("config i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the expected shape.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serializing back to TOML failed.
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but makes no sense.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Why a sign was not placed automatically.
///
/// Refusals are silent to the player; the caller falls through to normal
/// handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimRefusal {
    #[error("player is sneaking")]
    Sneaking,

    #[error("players cannot build in {0:?} mode")]
    CannotBuild(GameMode),

    #[error("{0} cannot be protected")]
    NotProtectable(Material),

    #[error("missing permission {0}")]
    MissingPermission(Permission),

    #[error("no sign in either hand")]
    NoSignInHand,

    #[error("signs are not placed on the {0:?} face")]
    UnsupportedFace(BlockFace),

    #[error("{pos} is occupied by {material}")]
    Obstructed { pos: BlockPos, material: Material },

    #[error("placement at {0} was rejected")]
    Rejected(BlockPos),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
