//! In-memory implementations of the collaborator traits.
//!
//! These are primarily for testing. They keep everything in `RefCell`s and
//! record what the engine asked of them so tests can assert on it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use uuid::Uuid;

use blocklocker_core::{
    BlockPlaceEvent, BlockPos, BlockState, Player, Protection, ProtectionId, ProtectionRef,
    ProtectionSign, Translation,
};

use crate::traits::{
    Clock, ProtectionFinder, ProtectionUpdater, SearchMode, SignParser, SignSelector,
    SoundCondition, Translator, World,
};

/// Listener for synthesized block placements.
pub type PlaceListener = Box<dyn Fn(&mut BlockPlaceEvent, &MemoryWorld)>;

/// A door transition the world was asked to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorChange {
    pub protection: ProtectionId,
    pub open: bool,
    pub sound: SoundCondition,
}

/// A world of blocks held in a map. Missing positions are air.
#[derive(Default)]
pub struct MemoryWorld {
    blocks: RefCell<HashMap<BlockPos, BlockState>>,
    listeners: RefCell<Vec<PlaceListener>>,
    door_changes: RefCell<Vec<DoorChange>>,
    placements_fired: Cell<usize>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a placement listener, as another plugin would.
    pub fn on_block_place(&self, listener: impl Fn(&mut BlockPlaceEvent, &MemoryWorld) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Door transitions applied so far.
    pub fn door_changes(&self) -> Vec<DoorChange> {
        self.door_changes.borrow().clone()
    }

    /// Number of placement events fired.
    pub fn placements_fired(&self) -> usize {
        self.placements_fired.get()
    }
}

impl World for MemoryWorld {
    fn block(&self, pos: BlockPos) -> BlockState {
        self.blocks
            .borrow()
            .get(&pos)
            .copied()
            .unwrap_or(BlockState::AIR)
    }

    fn set_block(&self, pos: BlockPos, state: BlockState) {
        let mut blocks = self.blocks.borrow_mut();
        if state.material.is_air() {
            blocks.remove(&pos);
        } else {
            blocks.insert(pos, state);
        }
    }

    fn fire_block_place(&self, event: &mut BlockPlaceEvent) {
        self.placements_fired.set(self.placements_fired.get() + 1);
        for listener in self.listeners.borrow().iter() {
            listener(event, self);
        }
    }

    fn door_state_changed(&self, protection: &Protection, open: bool, sound: SoundCondition) {
        self.door_changes.borrow_mut().push(DoorChange {
            protection: protection.id,
            open,
            sound,
        });
    }
}

/// A finder over protections registered by position.
#[derive(Default)]
pub struct MemoryFinder {
    protections: RefCell<HashMap<BlockPos, ProtectionRef>>,
    lookups: Cell<usize>,
}

impl MemoryFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `protection` findable from each of `positions`.
    pub fn insert(&self, positions: &[BlockPos], protection: &ProtectionRef) {
        let mut protections = self.protections.borrow_mut();
        for pos in positions {
            protections.insert(*pos, ProtectionRef::clone(protection));
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl ProtectionFinder for MemoryFinder {
    fn find_protection(&self, pos: BlockPos, _mode: SearchMode) -> Option<ProtectionRef> {
        self.lookups.set(self.lookups.get() + 1);
        self.protections.borrow().get(&pos).cloned()
    }
}

/// Keeps saved signs in a list.
#[derive(Debug, Default)]
pub struct MemorySignStore {
    saved: RefCell<Vec<ProtectionSign>>,
}

impl MemorySignStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<ProtectionSign> {
        self.saved.borrow().clone()
    }

    pub fn at(&self, pos: BlockPos) -> Option<ProtectionSign> {
        self.saved
            .borrow()
            .iter()
            .rev()
            .find(|sign| sign.location == pos)
            .cloned()
    }
}

impl SignParser for MemorySignStore {
    fn save_sign(&self, sign: &ProtectionSign) {
        self.saved.borrow_mut().push(sign.clone());
    }
}

/// A message handed to the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub player: Uuid,
    pub translation: Translation,
    pub args: Vec<String>,
}

/// Records every message instead of rendering it.
#[derive(Debug, Default)]
pub struct RecordingTranslator {
    sent: RefCell<Vec<SentMessage>>,
}

impl RecordingTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<SentMessage> {
        self.sent.borrow().clone()
    }

    pub fn messages_for(&self, player: Uuid) -> Vec<SentMessage> {
        self.sent
            .borrow()
            .iter()
            .filter(|m| m.player == player)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.sent.borrow_mut().clear();
    }
}

impl Translator for RecordingTranslator {
    fn send_message(&self, player: &Player, translation: Translation, args: &[String]) {
        self.sent.borrow_mut().push(SentMessage {
            player: player.uuid,
            translation,
            args: args.to_vec(),
        });
    }
}

/// Selected signs by player.
#[derive(Debug, Default)]
pub struct MemorySignSelector {
    selected: RefCell<HashMap<Uuid, BlockPos>>,
}

impl MemorySignSelector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SignSelector for MemorySignSelector {
    fn set_selected_sign(&self, player: &Player, sign: BlockPos) {
        self.selected.borrow_mut().insert(player.uuid, sign);
    }

    fn selected_sign(&self, player: &Player) -> Option<BlockPos> {
        self.selected.borrow().get(&player.uuid).copied()
    }
}

/// Counts update requests.
#[derive(Debug, Default)]
pub struct RecordingUpdater {
    updates: RefCell<Vec<(ProtectionId, bool)>>,
}

impl RecordingUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<(ProtectionId, bool)> {
        self.updates.borrow().clone()
    }
}

impl ProtectionUpdater for RecordingUpdater {
    fn update(&self, protection: &Protection, forced: bool) {
        self.updates.borrow_mut().push((protection.id, forced));
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn at(now: i64) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocklocker_core::{Material, ProtectionType};

    #[test]
    fn test_world_defaults_to_air() {
        let world = MemoryWorld::new();
        let pos = BlockPos::new(1, 2, 3);
        assert_eq!(world.block(pos), BlockState::AIR);

        world.set_block(pos, BlockState::of(Material::Chest));
        assert_eq!(world.block(pos).material, Material::Chest);

        world.set_block(pos, BlockState::AIR);
        assert_eq!(world.block(pos), BlockState::AIR);
    }

    #[test]
    fn test_listeners_may_cancel_and_edit() {
        let world = MemoryWorld::new();
        let pos = BlockPos::new(0, 0, 0);
        world.on_block_place(|event, world| {
            world.set_block(event.placed, BlockState::of(Material::Stone));
            event.set_cancelled(true);
        });

        let player = Player::new(Uuid::from_u128(1), "Alice");
        let profile = blocklocker_core::PlayerProfile::new(player.uuid, "Alice");
        let mut event = BlockPlaceEvent::new(pos, BlockState::AIR, pos, &player, profile);
        world.fire_block_place(&mut event);

        assert!(event.is_cancelled());
        assert_eq!(world.block(pos).material, Material::Stone);
        assert_eq!(world.placements_fired(), 1);
    }

    #[test]
    fn test_finder_shares_handles() {
        let finder = MemoryFinder::new();
        let left = BlockPos::new(0, 64, 0);
        let right = BlockPos::new(1, 64, 0);
        let protection =
            Protection::new(ProtectionId(3), ProtectionType::Container, left).into_ref();
        finder.insert(&[left, right], &protection);

        let found = finder.find_protection(right, SearchMode::NoSupportingBlocks);
        assert!(found.is_some_and(|p| ProtectionRef::ptr_eq(&p, &protection)));
        assert!(finder
            .find_protection(BlockPos::new(5, 5, 5), SearchMode::NoSupportingBlocks)
            .is_none());
        assert_eq!(finder.lookups(), 2);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::at(10);
        clock.advance(5);
        assert_eq!(clock.now_millis(), 15);
        clock.set(0);
        assert_eq!(clock.now_millis(), 0);
    }
}
