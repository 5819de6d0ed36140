//! Collaborator traits: what the engine needs from its host.
//!
//! The engine runs on the host's main thread. Collaborators are shared as
//! `Rc<dyn Trait>` and take `&self`; implementations that keep state use
//! interior mutability. Every call is synchronous and must not block.

use blocklocker_core::{
    BlockPlaceEvent, BlockPos, BlockState, Material, Player, PlayerProfile, Profile, Protection,
    ProtectionRef, ProtectionSign, ProtectionType, SignOrientation, SignType, Translation,
};

/// How far the finder may look from the clicked block.
///
/// The engine only asks about the structure itself and its signs; blocks
/// that merely support a protected structure are never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Only the structure itself and its signs.
    NoSupportingBlocks,
}

/// Why a door changed state, for sound suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCondition {
    /// Always play the door sound (timer closes).
    Always,
    /// Play only where the host would not (player toggles).
    Automatic,
}

/// Block access and event firing.
pub trait World {
    /// The block at `pos`. Unloaded or empty positions are air.
    fn block(&self, pos: BlockPos) -> BlockState;

    /// Replace the block at `pos` without firing events.
    fn set_block(&self, pos: BlockPos, state: BlockState);

    /// Hand a synthesized placement to the host's listeners, exactly as a
    /// block placed by the player would be. Listeners may cancel the event
    /// or change the placed block.
    fn fire_block_place(&self, event: &mut BlockPlaceEvent);

    /// Apply an open/close to the door blocks and play its effects.
    fn door_state_changed(&self, protection: &Protection, open: bool, sound: SoundCondition);
}

/// Locates protections and builds signs for them.
pub trait ProtectionFinder {
    fn find_protection(&self, pos: BlockPos, mode: SearchMode) -> Option<ProtectionRef>;

    fn new_protection_sign(
        &self,
        location: BlockPos,
        orientation: SignOrientation,
        sign_type: SignType,
        profile: Profile,
    ) -> ProtectionSign {
        ProtectionSign::new(location, orientation, sign_type, vec![profile])
    }
}

/// Writes protection signs to the world.
pub trait SignParser {
    fn save_sign(&self, sign: &ProtectionSign);
}

/// Resolves players to profiles.
pub trait ProfileFactory {
    fn from_player(&self, player: &Player) -> PlayerProfile;

    fn everyone(&self) -> Profile {
        Profile::Everyone
    }

    fn redstone(&self) -> Profile {
        Profile::Redstone
    }
}

/// Profiles straight from the player's id, name and groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProfileFactory;

impl ProfileFactory for DefaultProfileFactory {
    fn from_player(&self, player: &Player) -> PlayerProfile {
        PlayerProfile::new(player.uuid, player.name.clone()).with_groups(&player.groups)
    }
}

/// Refreshes or migrates a protection before it is checked.
pub trait ProtectionUpdater {
    fn update(&self, protection: &Protection, forced: bool);
}

/// An updater with nothing to migrate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUpdater;

impl ProtectionUpdater for NoopUpdater {
    fn update(&self, _protection: &Protection, _forced: bool) {}
}

/// Deployment policy.
pub trait ChestSettings {
    /// Whether `material` may be protected as `kind`.
    fn can_protect(&self, kind: ProtectionType, material: Material) -> bool;

    /// Seconds a door stays open when its protection does not say.
    fn default_door_open_seconds(&self) -> i32;

    /// Days of owner inactivity before a protection expires; zero never.
    fn auto_expire_days(&self) -> u32 {
        0
    }
}

/// Sends catalog messages to players.
pub trait Translator {
    fn send_message(&self, player: &Player, translation: Translation, args: &[String]);
}

/// Remembers which sign a player is editing.
pub trait SignSelector {
    fn set_selected_sign(&self, player: &Player, sign: BlockPos);

    fn selected_sign(&self, player: &Player) -> Option<BlockPos>;
}

/// A fire-once deferred callback.
pub type Task = Box<dyn FnOnce()>;

/// Runs tasks later on the main thread.
pub trait Scheduler {
    /// Run `task` after `delay_ticks` ticks. Scheduled tasks cannot be
    /// cancelled.
    fn run_later(&self, delay_ticks: u64, task: Task);
}

/// Wall clock in Unix milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}
