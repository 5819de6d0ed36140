//! Keys of the user-facing message catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A message the engine can send, or a sign tag it can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Translation {
    ProtectionBypassed,
    ProtectionClaimedContainer,
    ProtectionExpired,
    ProtectionIsClaimedBy,
    ProtectionNoAccess,
    ProtectionSelectedSign,
    TagEveryone,
    TagMoreUsers,
    TagPrivate,
    TagRedstone,
}

impl Translation {
    pub const ALL: [Translation; 10] = [
        Translation::ProtectionBypassed,
        Translation::ProtectionClaimedContainer,
        Translation::ProtectionExpired,
        Translation::ProtectionIsClaimedBy,
        Translation::ProtectionNoAccess,
        Translation::ProtectionSelectedSign,
        Translation::TagEveryone,
        Translation::TagMoreUsers,
        Translation::TagPrivate,
        Translation::TagRedstone,
    ];

    /// Dotted key used in translation files.
    pub const fn key(&self) -> &'static str {
        match self {
            Translation::ProtectionBypassed => "protection.bypassed",
            Translation::ProtectionClaimedContainer => "protection.claimed_container",
            Translation::ProtectionExpired => "protection.expired",
            Translation::ProtectionIsClaimedBy => "protection.is_claimed_by",
            Translation::ProtectionNoAccess => "protection.no_access",
            Translation::ProtectionSelectedSign => "protection.selected_sign",
            Translation::TagEveryone => "tag.everyone",
            Translation::TagMoreUsers => "tag.more_users",
            Translation::TagPrivate => "tag.private",
            Translation::TagRedstone => "tag.redstone",
        }
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Translation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Translation::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| CoreError::UnknownTranslationKey(s.to_string()))
    }
}
