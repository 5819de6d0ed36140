//! Inventory transfers between blocks.
//!
//! Hoppers, droppers and the like move items without a player. A transfer
//! is blocked when either inventory belongs to a protection that does not
//! list `[Redstone]`.

use blocklocker_core::{BlockPos, InventoryMoveEvent};
use blocklocker_host::SearchMode;

use crate::engine::BlockLocker;

impl BlockLocker {
    /// Handle an automated item transfer. Returns whether it was blocked.
    pub fn on_inventory_move(&self, event: &mut InventoryMoveEvent) -> bool {
        if self.config.ignore_cancelled && event.is_cancelled() {
            return false;
        }

        let blocked = [event.source.block(), event.destination.block()]
            .into_iter()
            .flatten()
            .find(|pos| self.is_redstone_protected(*pos));

        match blocked {
            Some(pos) => {
                event.set_cancelled(true);
                tracing::debug!(block = %pos, "blocked inventory transfer");
                true
            }
            None => false,
        }
    }

    /// Whether automated access to the block at `pos` is refused.
    pub fn is_redstone_protected(&self, pos: BlockPos) -> bool {
        let redstone = self.services.profiles.redstone();
        self.services
            .finder
            .find_protection(pos, SearchMode::NoSupportingBlocks)
            .is_some_and(|protection| !protection.is_allowed(&redstone))
    }
}
