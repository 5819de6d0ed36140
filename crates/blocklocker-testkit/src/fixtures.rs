//! Test fixtures and helpers.
//!
//! A [`TestFixture`] is an engine wired to in-memory collaborators, with
//! shortcuts for building players and protections and for firing events.

use std::cell::Cell;
use std::rc::Rc;

use blocklocker::{BlockLocker, InteractOutcome, Settings};
use blocklocker_core::{
    BlockFace, BlockPos, BlockState, GameMode, Hand, InventoryHolder, InventoryMoveEvent,
    ItemStack, Material, Player, PlayerInteractEvent, PlayerProfile, Profile, Protection,
    ProtectionId, ProtectionRef, ProtectionSign, ProtectionType, SignOrientation, SignType,
};
use blocklocker_host::{
    DefaultProfileFactory, ManualClock, MemoryFinder, MemorySignSelector, MemorySignStore,
    MemoryWorld, RecordingTranslator, RecordingUpdater, SentMessage, Services, TickScheduler,
    World,
};
use uuid::Uuid;

/// What a fired interaction did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub outcome: InteractOutcome,
    pub cancelled: bool,
}

/// An engine over an in-memory world.
pub struct TestFixture {
    pub world: Rc<MemoryWorld>,
    pub finder: Rc<MemoryFinder>,
    pub signs: Rc<MemorySignStore>,
    pub translator: Rc<RecordingTranslator>,
    pub selector: Rc<MemorySignSelector>,
    pub updater: Rc<RecordingUpdater>,
    pub scheduler: Rc<TickScheduler>,
    pub clock: Rc<ManualClock>,
    pub engine: BlockLocker,
    next_id: Cell<u64>,
}

impl TestFixture {
    /// A fixture with default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// A fixture with the given settings; the engine section configures
    /// the engine itself.
    pub fn with_settings(settings: Settings) -> Self {
        let world = Rc::new(MemoryWorld::new());
        let finder = Rc::new(MemoryFinder::new());
        let signs = Rc::new(MemorySignStore::new());
        let translator = Rc::new(RecordingTranslator::new());
        let selector = Rc::new(MemorySignSelector::new());
        let updater = Rc::new(RecordingUpdater::new());
        let scheduler = Rc::new(TickScheduler::new());
        let clock = Rc::new(ManualClock::at(0));

        let config = settings.engine.clone();
        let services = Services {
            world: world.clone(),
            finder: finder.clone(),
            signs: signs.clone(),
            profiles: Rc::new(DefaultProfileFactory),
            updater: updater.clone(),
            settings: Rc::new(settings),
            translator: translator.clone(),
            selector: selector.clone(),
            scheduler: scheduler.clone(),
            clock: clock.clone(),
        };

        Self {
            world,
            finder,
            signs,
            translator,
            selector,
            updater,
            scheduler,
            clock,
            engine: BlockLocker::new(services, config),
            next_id: Cell::new(0),
        }
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Players
    // ─────────────────────────────────────────────────────────────────────────

    /// A survival player with nothing in hand and no explicit permissions.
    pub fn player(&self, name: &str) -> Player {
        Player::new(Uuid::from_u128(u128::from(self.next_id())), name)
    }

    /// A survival player holding `signs` signs in the main hand.
    pub fn claimer(&self, name: &str, signs: u32) -> Player {
        self.player(name)
            .with_game_mode(GameMode::Survival)
            .with_main_hand(ItemStack::new(Material::Sign, signs))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // World
    // ─────────────────────────────────────────────────────────────────────────

    pub fn place(&self, pos: BlockPos, material: Material) {
        self.world.set_block(pos, BlockState::of(material));
    }

    pub fn material_at(&self, pos: BlockPos) -> Material {
        self.world.block(pos).material
    }

    /// Register `protection` at `positions`, placing `material` at each.
    pub fn protect(
        &self,
        protection: Protection,
        material: Material,
        positions: &[BlockPos],
    ) -> ProtectionRef {
        for pos in positions {
            self.place(*pos, material);
        }
        let protection = protection.into_ref();
        self.finder.insert(positions, &protection);
        protection
    }

    /// A single chest owned by `owner`, with its main sign on the north face.
    pub fn chest(&self, owner: &Player, pos: BlockPos) -> ProtectionRef {
        self.owned_container(owner, &[pos], |p| p)
    }

    /// A double chest owned by `owner`, signed on the left half's north face.
    pub fn double_chest(&self, owner: &Player, left: BlockPos, right: BlockPos) -> ProtectionRef {
        self.owned_container(owner, &[left, right], |p| p)
    }

    /// Like [`TestFixture::chest`], letting the caller add to the protection.
    pub fn chest_with(
        &self,
        owner: &Player,
        pos: BlockPos,
        edit: impl FnOnce(Protection) -> Protection,
    ) -> ProtectionRef {
        self.owned_container(owner, &[pos], edit)
    }

    fn owned_container(
        &self,
        owner: &Player,
        positions: &[BlockPos],
        edit: impl FnOnce(Protection) -> Protection,
    ) -> ProtectionRef {
        let location = positions[0];
        let owner = profile_of(owner);
        let sign = self.main_sign(location, &owner);

        let protection = Protection::new(
            ProtectionId(self.next_id()),
            ProtectionType::Container,
            location,
        )
        .with_owner(owner)
        .with_sign(sign.clone());
        let protection = self.protect(edit(protection), Material::Chest, positions);

        self.world
            .set_block(sign.location, BlockState::sign(sign.orientation));
        self.finder.insert(&[sign.location], &protection);
        protection
    }

    fn main_sign(&self, container: BlockPos, owner: &PlayerProfile) -> ProtectionSign {
        ProtectionSign::new(
            container.relative(BlockFace::North),
            SignOrientation::Wall {
                facing: BlockFace::North,
            },
            SignType::Private,
            vec![Profile::Player(owner.clone())],
        )
    }

    /// An oak door owned by `owner`.
    pub fn door(&self, owner: &Player, pos: BlockPos, open_seconds: Option<i32>) -> ProtectionRef {
        let mut door = Protection::new(ProtectionId(self.next_id()), ProtectionType::Door, pos)
            .with_owner(profile_of(owner));
        if let Some(seconds) = open_seconds {
            door = door.with_open_seconds(seconds);
        }
        self.protect(door, Material::OakDoor, &[pos])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    /// Right-click `face` of `pos` with the main hand.
    pub fn right_click(&self, player: &mut Player, pos: BlockPos, face: BlockFace) -> Interaction {
        self.interact(player, pos, face, Hand::Main)
    }

    pub fn interact(
        &self,
        player: &mut Player,
        pos: BlockPos,
        face: BlockFace,
        hand: Hand,
    ) -> Interaction {
        let mut event = PlayerInteractEvent::right_click(player, pos, face);
        event.hand = hand;
        let outcome = self.engine.on_player_interact(&mut event);
        Interaction {
            outcome,
            cancelled: event.is_cancelled(),
        }
    }

    /// Move an item between two holders. Returns whether it was blocked.
    pub fn transfer(&self, source: InventoryHolder, destination: InventoryHolder) -> bool {
        let mut event =
            InventoryMoveEvent::new(source, destination, ItemStack::new(Material::Stone, 1));
        let blocked = self.engine.on_inventory_move(&mut event);
        debug_assert_eq!(blocked, event.is_cancelled());
        blocked
    }

    pub fn messages_for(&self, player: &Player) -> Vec<SentMessage> {
        self.translator.messages_for(player.uuid)
    }

    /// Advance the scheduler. Returns how many tasks ran.
    pub fn advance_ticks(&self, ticks: u64) -> usize {
        self.scheduler.advance(ticks)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The profile the default profile factory builds for `player`.
pub fn profile_of(player: &Player) -> PlayerProfile {
    PlayerProfile::new(player.uuid, player.name.clone()).with_groups(&player.groups)
}

/// Several distinct players for multi-party tests.
pub fn players(count: usize) -> Vec<Player> {
    (0..count)
        .map(|i| Player::new(Uuid::from_u128(1_000 + i as u128), format!("Player{i}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_chest_layout() {
        let fixture = TestFixture::new();
        let alice = fixture.player("Alice");
        let pos = BlockPos::new(0, 64, 0);
        let chest = fixture.chest(&alice, pos);

        assert_eq!(fixture.material_at(pos), Material::Chest);
        let sign_pos = pos.relative(BlockFace::North);
        assert_eq!(fixture.material_at(sign_pos), Material::WallSign);
        assert_eq!(chest.signs.len(), 1);
        assert!(chest.is_owner(&profile_of(&alice)));
    }

    #[test]
    fn test_players_are_distinct() {
        let fixture = TestFixture::new();
        let a = fixture.player("A");
        let b = fixture.player("A");
        assert_ne!(a.uuid, b.uuid);

        let party = players(3);
        assert_ne!(party[0].uuid, party[1].uuid);
        assert_ne!(party[1].uuid, party[2].uuid);
    }

    #[test]
    fn test_protection_ids_unique() {
        let fixture = TestFixture::new();
        let owner = fixture.player("Owner");
        let first = fixture.chest(&owner, BlockPos::new(0, 64, 0));
        let second = fixture.door(&owner, BlockPos::new(5, 64, 0), None);
        assert_ne!(first.id, second.id);
    }
}
