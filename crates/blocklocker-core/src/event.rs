//! Events the engine handles or fires.
//!
//! Each event lives for one dispatch call. Handlers signal their verdict by
//! cancelling the event.

use crate::player::Player;
use crate::profile::PlayerProfile;
use crate::types::{BlockFace, BlockPos, BlockState, Hand, ItemStack};

/// What the player did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    RightClickBlock,
    LeftClickBlock,
    RightClickAir,
    LeftClickAir,
    Physical,
}

/// A player clicking a block.
#[derive(Debug)]
pub struct PlayerInteractEvent<'a> {
    pub player: &'a mut Player,
    pub action: Action,
    pub clicked_block: BlockPos,
    pub face: BlockFace,
    pub hand: Hand,
    cancelled: bool,
}

impl<'a> PlayerInteractEvent<'a> {
    pub fn new(
        player: &'a mut Player,
        action: Action,
        clicked_block: BlockPos,
        face: BlockFace,
        hand: Hand,
    ) -> Self {
        Self {
            player,
            action,
            clicked_block,
            face,
            hand,
            cancelled: false,
        }
    }

    /// A main-hand right click, the most common gesture.
    pub fn right_click(player: &'a mut Player, clicked_block: BlockPos, face: BlockFace) -> Self {
        Self::new(player, Action::RightClickBlock, clicked_block, face, Hand::Main)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// What owns an inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryHolder {
    /// A single block such as a chest or hopper.
    Block(BlockPos),
    /// Two chest halves sharing one inventory.
    DoubleChest {
        left: Box<InventoryHolder>,
        right: Box<InventoryHolder>,
    },
    /// A hopper minecart or other entity.
    Entity,
    /// A player inventory or a virtual inventory.
    Virtual,
}

impl InventoryHolder {
    pub fn double_chest(left: BlockPos, right: BlockPos) -> Self {
        InventoryHolder::DoubleChest {
            left: Box::new(InventoryHolder::Block(left)),
            right: Box::new(InventoryHolder::Block(right)),
        }
    }

    /// The block storing this inventory. Double chests resolve to their
    /// left half.
    pub fn block(&self) -> Option<BlockPos> {
        match self {
            InventoryHolder::Block(pos) => Some(*pos),
            InventoryHolder::DoubleChest { left, .. } => match left.as_ref() {
                InventoryHolder::Block(pos) => Some(*pos),
                _ => None,
            },
            InventoryHolder::Entity | InventoryHolder::Virtual => None,
        }
    }
}

/// Items moving from one inventory to another without a player.
#[derive(Debug, Clone)]
pub struct InventoryMoveEvent {
    pub source: InventoryHolder,
    pub destination: InventoryHolder,
    pub item: ItemStack,
    cancelled: bool,
}

impl InventoryMoveEvent {
    pub fn new(source: InventoryHolder, destination: InventoryHolder, item: ItemStack) -> Self {
        Self {
            source,
            destination,
            item,
            cancelled: false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// Fired so other plugins can veto a block the engine places for a player.
#[derive(Debug, Clone)]
pub struct BlockPlaceEvent {
    pub placed: BlockPos,
    pub replaced: BlockState,
    pub placed_against: BlockPos,
    pub item_in_hand: Option<ItemStack>,
    pub player: PlayerProfile,
    pub can_build: bool,
    pub hand: Hand,
    cancelled: bool,
}

impl BlockPlaceEvent {
    pub fn new(
        placed: BlockPos,
        replaced: BlockState,
        placed_against: BlockPos,
        player: &Player,
        profile: PlayerProfile,
    ) -> Self {
        Self {
            placed,
            replaced,
            placed_against,
            item_in_hand: player.main_hand,
            player: profile,
            can_build: true,
            hand: Hand::Main,
            cancelled: false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}
