//! Automatic sign placement.
//!
//! A player right-clicking a protectable block with a sign in hand gets the
//! sign placed for them. The placement goes through the host's normal
//! placement event so region and anti-grief plugins can veto it; a veto
//! restores the block that was there before.

use std::rc::Rc;

use blocklocker_core::{
    orientation_for_face, BlockFace, BlockPlaceEvent, BlockPos, BlockState, Hand, Material,
    Player, Profile, ProtectionSign, ProtectionType, SignOrientation, SignType,
};
use blocklocker_host::{
    ChestSettings, ProfileFactory, ProtectionFinder, Services, SignParser, World,
};
use blocklocker_perms::{Permissible, Permission};

use crate::error::ClaimRefusal;

/// A sign placed on the player's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignPlacement {
    pub sign: ProtectionSign,
    /// Hand the sign item was taken from; `None` in creative mode.
    pub consumed_from: Option<Hand>,
}

/// Places protection signs for players.
pub struct SignClaimer {
    world: Rc<dyn World>,
    finder: Rc<dyn ProtectionFinder>,
    signs: Rc<dyn SignParser>,
    profiles: Rc<dyn ProfileFactory>,
    settings: Rc<dyn ChestSettings>,
}

impl SignClaimer {
    pub fn new(services: &Services) -> Self {
        Self {
            world: Rc::clone(&services.world),
            finder: Rc::clone(&services.finder),
            signs: Rc::clone(&services.signs),
            profiles: Rc::clone(&services.profiles),
            settings: Rc::clone(&services.settings),
        }
    }

    /// Try to place a sign of `sign_type` against the `face` of `block`.
    ///
    /// Main signs list the player; auxiliary signs list everyone. On
    /// success one sign is taken from the player's hands unless they are in
    /// creative mode.
    pub fn try_place_sign(
        &self,
        player: &mut Player,
        block: BlockPos,
        face: BlockFace,
        sign_type: SignType,
    ) -> Result<SignPlacement, ClaimRefusal> {
        let (sign_pos, orientation) = self.check_placement(player, block, face)?;
        self.place_with_rollback(player, sign_pos, block, BlockState::sign(orientation))?;

        let profile = if sign_type.is_main_sign() {
            Profile::Player(self.profiles.from_player(player))
        } else {
            self.profiles.everyone()
        };
        let sign = self
            .finder
            .new_protection_sign(sign_pos, orientation, sign_type, profile);
        self.signs.save_sign(&sign);

        let consumed_from = if player.game_mode.consumes_items() {
            player.remove_one(Material::Sign)
        } else {
            None
        };

        tracing::debug!(
            player = %player.name,
            sign = %sign_pos,
            ?sign_type,
            "placed protection sign"
        );
        Ok(SignPlacement {
            sign,
            consumed_from,
        })
    }

    /// Check every precondition without touching the world. Returns where
    /// the sign would go and how it would face.
    pub fn check_placement(
        &self,
        player: &Player,
        block: BlockPos,
        face: BlockFace,
    ) -> Result<(BlockPos, SignOrientation), ClaimRefusal> {
        if player.sneaking {
            return Err(ClaimRefusal::Sneaking);
        }
        if !player.game_mode.can_build() {
            return Err(ClaimRefusal::CannotBuild(player.game_mode));
        }

        let material = self.world.block(block).material;
        if !self.settings.can_protect(ProtectionType::Container, material) {
            return Err(ClaimRefusal::NotProtectable(material));
        }
        if !player.has_permission(Permission::CanProtect) {
            return Err(ClaimRefusal::MissingPermission(Permission::CanProtect));
        }
        if !player.holds(Material::Sign) {
            return Err(ClaimRefusal::NoSignInHand);
        }

        let orientation =
            orientation_for_face(face, player.yaw).ok_or(ClaimRefusal::UnsupportedFace(face))?;
        let sign_pos = block.relative(face);
        let occupant = self.world.block(sign_pos).material;
        if !occupant.is_air() {
            return Err(ClaimRefusal::Obstructed {
                pos: sign_pos,
                material: occupant,
            });
        }
        Ok((sign_pos, orientation))
    }

    /// Set the block, let the host's listeners judge it, and put the old
    /// block back if they object.
    fn place_with_rollback(
        &self,
        player: &Player,
        pos: BlockPos,
        against: BlockPos,
        state: BlockState,
    ) -> Result<(), ClaimRefusal> {
        let snapshot = self.world.block(pos);
        self.world.set_block(pos, state);

        let profile = self.profiles.from_player(player);
        let mut event = BlockPlaceEvent::new(pos, snapshot, against, player, profile);
        self.world.fire_block_place(&mut event);

        let placed = self.world.block(pos).material;
        if event.is_cancelled() || placed != state.material {
            self.world.set_block(pos, snapshot);
            tracing::debug!(
                pos = %pos,
                cancelled = event.is_cancelled(),
                %placed,
                "sign placement rejected, rolled back"
            );
            return Err(ClaimRefusal::Rejected(pos));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SignClaimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignClaimer").finish_non_exhaustive()
    }
}
