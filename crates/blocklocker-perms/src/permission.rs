//! Permission nodes checked by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use blocklocker_core::Player;

use crate::error::PermsError;

/// A permission a player may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// May claim containers by placing signs.
    CanProtect,
    /// May open any protection regardless of its signs.
    CanBypass,
}

impl Permission {
    pub const ALL: [Permission; 2] = [Permission::CanProtect, Permission::CanBypass];

    pub const fn node(&self) -> &'static str {
        match self {
            Permission::CanProtect => "blocklocker.protect",
            Permission::CanBypass => "blocklocker.bypass",
        }
    }

    /// Whether players hold this permission unless it is taken away.
    pub const fn granted_by_default(&self) -> bool {
        match self {
            Permission::CanProtect => true,
            Permission::CanBypass => false,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node())
    }
}

impl FromStr for Permission {
    type Err = PermsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.node() == s)
            .ok_or_else(|| PermsError::UnknownPermission(s.to_string()))
    }
}

/// Something that holds permissions.
pub trait Permissible {
    fn has_permission(&self, permission: Permission) -> bool;
}

impl Permissible for Player {
    fn has_permission(&self, permission: Permission) -> bool {
        self.permission_value(permission.node())
            .unwrap_or(permission.granted_by_default())
    }
}
