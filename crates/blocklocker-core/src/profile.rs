//! Principals that can own or be granted access to a protection.
//!
//! The engine only compares profiles: a protection lists profiles, and each
//! listed profile either includes the acting profile or it does not.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// A player identity.
///
/// Two player profiles match by UUID when both carry one, otherwise by
/// case-insensitive name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Stable identifier, if known.
    pub uuid: Option<Uuid>,

    /// Display name.
    pub name: String,

    /// Groups the player is a member of, lowercase.
    #[serde(default)]
    pub groups: BTreeSet<String>,
}

impl PlayerProfile {
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid),
            name: name.into(),
            groups: BTreeSet::new(),
        }
    }

    /// A profile known only by name, as written on an old sign.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            uuid: None,
            name: name.into(),
            groups: BTreeSet::new(),
        }
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.groups = groups
            .into_iter()
            .map(|g| g.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    /// Whether both profiles denote the same player.
    pub fn matches(&self, other: &PlayerProfile) -> bool {
        match (self.uuid, other.uuid) {
            (Some(a), Some(b)) => a == b,
            _ => self.name.eq_ignore_ascii_case(&other.name),
        }
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.contains(&group.to_ascii_lowercase())
    }
}

/// Anything that can appear on a protection sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    /// A single player.
    Player(PlayerProfile),
    /// Every member of a named group.
    Group(String),
    /// Everyone, including automation.
    Everyone,
    /// Redstone and other automated access (hoppers, droppers).
    Redstone,
}

impl Profile {
    /// Whether this listed profile grants access to `actor`.
    pub fn includes(&self, actor: &Profile) -> bool {
        match (self, actor) {
            (Profile::Everyone, _) => true,
            (Profile::Player(listed), Profile::Player(actor)) => listed.matches(actor),
            (Profile::Group(group), Profile::Player(actor)) => actor.in_group(group),
            (Profile::Redstone, Profile::Redstone) => true,
            (Profile::Player(_), _) | (Profile::Group(_), _) | (Profile::Redstone, _) => false,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Profile::Player(player) => &player.name,
            Profile::Group(group) => group,
            Profile::Everyone => "[Everyone]",
            Profile::Redstone => "[Redstone]",
        }
    }
}

impl From<PlayerProfile> for Profile {
    fn from(player: PlayerProfile) -> Self {
        Profile::Player(player)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_takes_precedence_over_name() {
        let id = Uuid::from_u128(1);
        let a = PlayerProfile::new(id, "Alice");
        let renamed = PlayerProfile::new(id, "Alicia");
        let impostor = PlayerProfile::new(Uuid::from_u128(2), "Alice");

        assert!(a.matches(&renamed));
        assert!(!a.matches(&impostor));
    }

    #[test]
    fn test_name_only_profiles_match_case_insensitively() {
        let a = PlayerProfile::new(Uuid::from_u128(1), "Alice");
        assert!(PlayerProfile::named("alice").matches(&a));
        assert!(!PlayerProfile::named("bob").matches(&a));
    }

    #[test]
    fn test_group_includes_members() {
        let member = Profile::Player(PlayerProfile::named("bob").with_groups(["Builders"]));
        let outsider = Profile::Player(PlayerProfile::named("eve"));
        let group = Profile::Group("builders".into());

        assert!(group.includes(&member));
        assert!(!group.includes(&outsider));
    }

    #[test]
    fn test_redstone_is_only_included_by_redstone_and_everyone() {
        let player = Profile::Player(PlayerProfile::named("bob"));
        assert!(Profile::Redstone.includes(&Profile::Redstone));
        assert!(Profile::Everyone.includes(&Profile::Redstone));
        assert!(!player.includes(&Profile::Redstone));
        assert!(!Profile::Redstone.includes(&player));
    }
}
