//! In-memory wiring shared by unit tests.

use std::rc::Rc;

use blocklocker_core::{
    BlockPos, BlockState, GameMode, ItemStack, Material, Player, PlayerProfile, Protection,
    ProtectionId, ProtectionRef, ProtectionType,
};
use blocklocker_host::{
    DefaultProfileFactory, ManualClock, MemoryFinder, MemorySignSelector, MemorySignStore,
    MemoryWorld, RecordingTranslator, RecordingUpdater, Services, TickScheduler, World,
};
use uuid::Uuid;

use crate::config::Settings;

pub(crate) struct Harness {
    pub world: Rc<MemoryWorld>,
    pub finder: Rc<MemoryFinder>,
    pub signs: Rc<MemorySignStore>,
    pub translator: Rc<RecordingTranslator>,
    pub selector: Rc<MemorySignSelector>,
    pub updater: Rc<RecordingUpdater>,
    pub scheduler: Rc<TickScheduler>,
    pub clock: Rc<ManualClock>,
    pub settings: Rc<Settings>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            world: Rc::new(MemoryWorld::new()),
            finder: Rc::new(MemoryFinder::new()),
            signs: Rc::new(MemorySignStore::new()),
            translator: Rc::new(RecordingTranslator::new()),
            selector: Rc::new(MemorySignSelector::new()),
            updater: Rc::new(RecordingUpdater::new()),
            scheduler: Rc::new(TickScheduler::new()),
            clock: Rc::new(ManualClock::at(0)),
            settings: Rc::new(settings),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            world: self.world.clone(),
            finder: self.finder.clone(),
            signs: self.signs.clone(),
            profiles: Rc::new(DefaultProfileFactory),
            updater: self.updater.clone(),
            settings: self.settings.clone(),
            translator: self.translator.clone(),
            selector: self.selector.clone(),
            scheduler: self.scheduler.clone(),
            clock: self.clock.clone(),
        }
    }

    /// Put a block in the world and return its position.
    pub fn place(&self, pos: BlockPos, material: Material) -> BlockPos {
        self.world.set_block(pos, BlockState::of(material));
        pos
    }

    /// Register a protection over `positions`, placing `material` there.
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
}

pub(crate) fn alice() -> Player {
    Player::new(Uuid::from_u128(1), "Alice")
}

pub(crate) fn bob() -> Player {
    Player::new(Uuid::from_u128(2), "Bob")
}

pub(crate) fn profile_of(player: &Player) -> PlayerProfile {
    PlayerProfile::new(player.uuid, player.name.clone())
}

/// A survival player holding signs.
pub(crate) fn claimer(player: Player, signs: u32) -> Player {
    player
        .with_game_mode(GameMode::Survival)
        .with_main_hand(ItemStack::new(Material::Sign, signs))
}

pub(crate) fn chest_of(owner: &Player, id: u64, pos: BlockPos) -> Protection {
    Protection::new(ProtectionId(id), ProtectionType::Container, pos).with_owner(profile_of(owner))
}

pub(crate) fn door_of(owner: &Player, id: u64, pos: BlockPos) -> Protection {
    Protection::new(ProtectionId(id), ProtectionType::Door, pos).with_owner(profile_of(owner))
}
