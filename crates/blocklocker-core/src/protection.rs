//! Protections: the authorization state attached to a structure.
//!
//! A protection is produced by the structure finder when a block is scanned
//! and shared as a [`ProtectionRef`]. The only state the engine mutates is
//! the open flag, which is interior so a scheduled close can hold the handle.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::profile::{PlayerProfile, Profile};
use crate::sign::ProtectionSign;
use crate::types::{BlockPos, Material};

/// Shared handle to a protection.
pub type ProtectionRef = Rc<Protection>;

/// Identifier assigned by the structure finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProtectionId(pub u64);

impl fmt::Display for ProtectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of structure a protection covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionType {
    Container,
    Door,
    Trapdoor,
    FenceGate,
}

impl ProtectionType {
    pub const ALL: [ProtectionType; 4] = [
        ProtectionType::Container,
        ProtectionType::Door,
        ProtectionType::Trapdoor,
        ProtectionType::FenceGate,
    ];

    /// Whether structures of this kind can be opened and closed.
    pub const fn can_be_opened(&self) -> bool {
        match self {
            ProtectionType::Container => false,
            ProtectionType::Door => true,
            ProtectionType::Trapdoor => true,
            ProtectionType::FenceGate => true,
        }
    }
}

/// Authorization state of one protected structure.
#[derive(Debug)]
pub struct Protection {
    /// Identifier assigned by the finder.
    pub id: ProtectionId,

    /// What kind of structure is protected.
    pub kind: ProtectionType,

    /// A representative block of the structure.
    pub location: BlockPos,

    /// The owner from the main sign, if the main sign is readable.
    pub owner: Option<PlayerProfile>,

    /// Additional principals from all signs, in sign order.
    pub allowed: Vec<Profile>,

    /// Seconds a door stays open; `None` uses the configured default.
    pub open_seconds: Option<i32>,

    /// When the owner was last seen (Unix milliseconds).
    pub owner_last_seen: Option<i64>,

    /// Signs attached to this protection.
    pub signs: Vec<ProtectionSign>,

    open: Cell<bool>,
}

impl Protection {
    pub fn new(id: ProtectionId, kind: ProtectionType, location: BlockPos) -> Self {
        Self {
            id,
            kind,
            location,
            owner: None,
            allowed: Vec::new(),
            open_seconds: None,
            owner_last_seen: None,
            signs: Vec::new(),
            open: Cell::new(false),
        }
    }

    pub fn with_owner(mut self, owner: PlayerProfile) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_allowed(mut self, profile: impl Into<Profile>) -> Self {
        self.allowed.push(profile.into());
        self
    }

    pub fn with_open_seconds(mut self, seconds: i32) -> Self {
        self.open_seconds = Some(seconds);
        self
    }

    pub fn with_owner_last_seen(mut self, at: i64) -> Self {
        self.owner_last_seen = Some(at);
        self
    }

    pub fn with_sign(mut self, sign: ProtectionSign) -> Self {
        self.signs.push(sign);
        self
    }

    pub fn with_open(self, open: bool) -> Self {
        self.open.set(open);
        self
    }

    /// Wrap into a shared handle.
    pub fn into_ref(self) -> ProtectionRef {
        Rc::new(self)
    }

    /// Whether `player` is the owner.
    pub fn is_owner(&self, player: &PlayerProfile) -> bool {
        self.owner
            .as_ref()
            .map(|owner| owner.matches(player))
            .unwrap_or(false)
    }

    /// The protection's own access rule: the owner, or anyone included by a
    /// listed profile.
    pub fn is_allowed(&self, actor: &Profile) -> bool {
        if let Profile::Player(player) = actor {
            if self.is_owner(player) {
                return true;
            }
        }
        self.allowed.iter().any(|listed| listed.includes(actor))
    }

    pub fn owner_display_name(&self) -> &str {
        self.owner.as_ref().map(|o| o.name.as_str()).unwrap_or("?")
    }

    pub fn can_be_opened(&self) -> bool {
        self.kind.can_be_opened()
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Set the open flag. Returns whether the flag changed.
    ///
    /// Setting the current state again is a no-op.
    pub fn set_open(&self, open: bool) -> bool {
        self.open.replace(open) != open
    }
}

/// Whether `material` is the block of the given protection kind.
///
/// Used by in-memory finders; real hosts decide this from their own tags.
pub fn kind_of(material: Material) -> Option<ProtectionType> {
    match material {
        Material::Chest
        | Material::TrappedChest
        | Material::Furnace
        | Material::Barrel
        | Material::Hopper
        | Material::Dispenser
        | Material::Dropper
        | Material::BrewingStand => Some(ProtectionType::Container),
        Material::OakDoor | Material::SpruceDoor | Material::IronDoor => Some(ProtectionType::Door),
        Material::OakTrapdoor | Material::IronTrapdoor => Some(ProtectionType::Trapdoor),
        Material::OakFenceGate => Some(ProtectionType::FenceGate),
        Material::Air
        | Material::Stone
        | Material::Dirt
        | Material::OakPlanks
        | Material::Sign
        | Material::SignPost
        | Material::WallSign
        | Material::Torch => None,
    }
}
