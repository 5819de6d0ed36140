//! Player interaction handling.
//!
//! A right click on a block resolves to one of:
//!
//! - nothing protected: try to claim it with a sign from the player's hand
//! - allowed sign click: select the sign for editing
//! - allowed structure click: add a `[More Users]` sign, or work the door
//! - denied: cancel the event and tell the player who owns the block

use blocklocker_core::{
    Action, BlockPos, Hand, PlayerInteractEvent, PlayerProfile, ProtectionRef, ProtectionSign,
    SignType, Translation,
};
use blocklocker_host::SearchMode;

use crate::door::DoorToggle;
use crate::engine::BlockLocker;

/// What handling an interaction did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractOutcome {
    /// Not a right click on a block, or already cancelled.
    Ignored,
    /// Nothing protected and no sign placed; the host proceeds as usual.
    Unprotected,
    /// A main sign was placed on an unprotected block.
    Claimed(ProtectionSign),
    /// The owner added an auxiliary sign.
    MoreUsersAdded(ProtectionSign),
    /// The player selected a sign for editing.
    SignSelected(BlockPos),
    /// A door was opened or closed.
    DoorToggled(DoorToggle),
    /// Access was granted; the host proceeds unless the event was cancelled.
    Allowed,
    /// Access was refused and the event cancelled.
    Denied,
}

impl BlockLocker {
    /// Handle a player clicking a block.
    pub fn on_player_interact(&self, event: &mut PlayerInteractEvent<'_>) -> InteractOutcome {
        if self.config.ignore_cancelled && event.is_cancelled() {
            return InteractOutcome::Ignored;
        }
        if event.action != Action::RightClickBlock {
            return InteractOutcome::Ignored;
        }

        let block = event.clicked_block;
        let clicked_sign = self.services.world.block(block).material.is_sign_block();

        let Some(protection) = self
            .services
            .finder
            .find_protection(block, SearchMode::NoSupportingBlocks)
        else {
            return self.claim_unprotected(event);
        };

        self.services.updater.update(&protection, false);

        let profile = self.services.profiles.from_player(event.player);
        let now = self.services.clock.now_millis();
        let decision =
            self.policy
                .check_allowed(&*event.player, &profile, &protection, clicked_sign, now);
        if let Some(notice) = &decision.notice {
            self.send(event.player, notice.translation(), &notice.args());
        }

        if decision.is_allowed() {
            self.handle_allowed(event, &protection, &profile, clicked_sign)
        } else {
            self.handle_denied(event, &protection, clicked_sign)
        }
    }

    fn claim_unprotected(&self, event: &mut PlayerInteractEvent<'_>) -> InteractOutcome {
        let result = self.claims.try_place_sign(
            event.player,
            event.clicked_block,
            event.face,
            SignType::Private,
        );
        match result {
            Ok(placement) => {
                self.send(event.player, Translation::ProtectionClaimedContainer, &[]);
                event.set_cancelled(true);
                InteractOutcome::Claimed(placement.sign)
            }
            Err(refusal) => {
                tracing::trace!(%refusal, block = %event.clicked_block, "not claiming block");
                InteractOutcome::Unprotected
            }
        }
    }

    fn handle_allowed(
        &self,
        event: &mut PlayerInteractEvent<'_>,
        protection: &ProtectionRef,
        profile: &PlayerProfile,
        clicked_sign: bool,
    ) -> InteractOutcome {
        let used_off_hand = event.hand == Hand::Off;

        if clicked_sign {
            if !used_off_hand && self.policy.can_manage(&*event.player, profile, protection) {
                self.services
                    .selector
                    .set_selected_sign(event.player, event.clicked_block);
                self.send(event.player, Translation::ProtectionSelectedSign, &[]);
                return InteractOutcome::SignSelected(event.clicked_block);
            }
            return InteractOutcome::Allowed;
        }

        if protection.is_owner(profile) {
            let result = self.claims.try_place_sign(
                event.player,
                event.clicked_block,
                event.face,
                SignType::MoreUsers,
            );
            match result {
                Ok(placement) => {
                    event.set_cancelled(true);
                    return InteractOutcome::MoreUsersAdded(placement.sign);
                }
                Err(refusal) => {
                    tracing::trace!(%refusal, protection = %protection.id, "no extra sign");
                }
            }
        }

        if protection.can_be_opened() && !event.player.is_sneak_placing() {
            // The engine drives the door itself; the host must not toggle it too
            event.set_cancelled(true);
            if !used_off_hand {
                return InteractOutcome::DoorToggled(self.doors.toggle(protection));
            }
        }

        InteractOutcome::Allowed
    }

    fn handle_denied(
        &self,
        event: &mut PlayerInteractEvent<'_>,
        protection: &ProtectionRef,
        clicked_sign: bool,
    ) -> InteractOutcome {
        event.set_cancelled(true);
        tracing::debug!(
            player = %event.player.name,
            protection = %protection.id,
            "access denied"
        );

        // The main hand already got the message for this click
        if event.hand == Hand::Off {
            return InteractOutcome::Denied;
        }

        let translation = if clicked_sign {
            Translation::ProtectionIsClaimedBy
        } else {
            Translation::ProtectionNoAccess
        };
        self.send(
            event.player,
            translation,
            &[protection.owner_display_name().to_string()],
        );
        InteractOutcome::Denied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocklocker_core::{
        BlockFace, GameMode, ItemStack, Material, Player, Profile, Protection, ProtectionId,
        ProtectionType,
    };
    use blocklocker_host::{SentMessage, SignSelector, SoundCondition, World};
    use blocklocker_perms::{Permission, DAY_MILLIS};

    use crate::config::{EngineConfig, Settings};
    use crate::testing::{alice, bob, chest_of, claimer, door_of, profile_of, Harness};

    const CHEST: BlockPos = BlockPos::new(0, 64, 0);
    const DOOR: BlockPos = BlockPos::new(10, 64, 0);
    const SIGN: BlockPos = BlockPos::new(0, 64, -1);

    fn engine(harness: &Harness) -> BlockLocker {
        BlockLocker::new(harness.services(), EngineConfig::default())
    }

    fn click(engine: &BlockLocker, player: &mut Player, pos: BlockPos) -> InteractOutcome {
        let mut event = PlayerInteractEvent::right_click(player, pos, BlockFace::North);
        engine.on_player_interact(&mut event)
    }

    fn click_with(
        engine: &BlockLocker,
        player: &mut Player,
        pos: BlockPos,
        hand: Hand,
    ) -> (InteractOutcome, bool) {
        let mut event = PlayerInteractEvent::right_click(player, pos, BlockFace::North);
        event.hand = hand;
        let outcome = engine.on_player_interact(&mut event);
        (outcome, event.is_cancelled())
    }

    fn alices_chest(harness: &Harness) -> ProtectionRef {
        harness.place(SIGN, Material::WallSign);
        harness.protect(chest_of(&alice(), 1, CHEST), Material::Chest, &[CHEST, SIGN])
    }

    fn alices_door(harness: &Harness, seconds: Option<i32>) -> ProtectionRef {
        let mut door = door_of(&alice(), 2, DOOR);
        if let Some(seconds) = seconds {
            door = door.with_open_seconds(seconds);
        }
        harness.protect(door, Material::OakDoor, &[DOOR])
    }

    #[test]
    fn test_ignores_non_right_clicks_and_cancelled() {
        let harness = Harness::new();
        alices_chest(&harness);
        let engine = engine(&harness);
        let mut player = bob();

        let mut event = PlayerInteractEvent::new(
            &mut player,
            Action::LeftClickBlock,
            CHEST,
            BlockFace::North,
            Hand::Main,
        );
        assert_eq!(engine.on_player_interact(&mut event), InteractOutcome::Ignored);
        assert!(!event.is_cancelled());

        let mut event = PlayerInteractEvent::right_click(&mut player, CHEST, BlockFace::North);
        event.set_cancelled(true);
        assert_eq!(engine.on_player_interact(&mut event), InteractOutcome::Ignored);
        assert_eq!(harness.finder.lookups(), 0);
    }

    #[test]
    fn test_cancelled_events_handled_when_configured() {
        let harness = Harness::new();
        alices_chest(&harness);
        let engine = BlockLocker::new(
            harness.services(),
            EngineConfig {
                ignore_cancelled: false,
                ..EngineConfig::default()
            },
        );
        let mut player = bob();

        let mut event = PlayerInteractEvent::right_click(&mut player, CHEST, BlockFace::North);
        event.set_cancelled(true);
        assert_eq!(engine.on_player_interact(&mut event), InteractOutcome::Denied);
    }

    #[test]
    fn test_claims_unprotected_chest() {
        let harness = Harness::new();
        harness.place(CHEST, Material::Chest);
        let engine = engine(&harness);
        let mut player = claimer(alice(), 1);

        let mut event = PlayerInteractEvent::right_click(&mut player, CHEST, BlockFace::North);
        let outcome = engine.on_player_interact(&mut event);
        assert!(event.is_cancelled());
        assert!(matches!(outcome, InteractOutcome::Claimed(ref sign) if sign.location == SIGN));

        let messages = harness.translator.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].translation, Translation::ProtectionClaimedContainer);
    }

    #[test]
    fn test_unprotected_without_sign_passes() {
        let harness = Harness::new();
        harness.place(CHEST, Material::Chest);
        let engine = engine(&harness);
        let mut player = alice();

        let (outcome, cancelled) = click_with(&engine, &mut player, CHEST, Hand::Main);
        assert_eq!(outcome, InteractOutcome::Unprotected);
        assert!(!cancelled);
        assert!(harness.translator.messages().is_empty());
    }

    #[test]
    fn test_owner_allowed_and_updated() {
        let harness = Harness::new();
        let chest = alices_chest(&harness);
        let engine = engine(&harness);
        let mut player = alice();

        let (outcome, cancelled) = click_with(&engine, &mut player, CHEST, Hand::Main);
        assert_eq!(outcome, InteractOutcome::Allowed);
        assert!(!cancelled);
        assert_eq!(harness.updater.updates(), vec![(chest.id, false)]);
    }

    #[test]
    fn test_stranger_denied_with_one_message() {
        let harness = Harness::new();
        alices_chest(&harness);
        let engine = engine(&harness);
        let mut player = bob();

        let (outcome, cancelled) = click_with(&engine, &mut player, CHEST, Hand::Main);
        assert_eq!(outcome, InteractOutcome::Denied);
        assert!(cancelled);
        assert_eq!(
            harness.translator.messages(),
            vec![SentMessage {
                player: player.uuid,
                translation: Translation::ProtectionNoAccess,
                args: vec!["Alice".into()],
            }]
        );
    }

    #[test]
    fn test_denied_sign_click_names_owner() {
        let harness = Harness::new();
        alices_chest(&harness);
        let engine = engine(&harness);
        let mut player = bob();

        assert_eq!(click(&engine, &mut player, SIGN), InteractOutcome::Denied);
        let messages = harness.translator.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].translation, Translation::ProtectionIsClaimedBy);
    }

    #[test]
    fn test_off_hand_denial_is_silent() {
        let harness = Harness::new();
        alices_chest(&harness);
        let engine = engine(&harness);
        let mut player = bob();

        let (outcome, cancelled) = click_with(&engine, &mut player, CHEST, Hand::Off);
        assert_eq!(outcome, InteractOutcome::Denied);
        assert!(cancelled);
        assert!(harness.translator.messages().is_empty());
    }

    #[test]
    fn test_listed_player_allowed() {
        let harness = Harness::new();
        harness.protect(
            chest_of(&alice(), 1, CHEST).with_allowed(profile_of(&bob())),
            Material::Chest,
            &[CHEST],
        );
        let engine = engine(&harness);

        assert_eq!(click(&engine, &mut bob(), CHEST), InteractOutcome::Allowed);
        assert!(harness.translator.messages().is_empty());
    }

    #[test]
    fn test_everyone_allowed() {
        let harness = Harness::new();
        harness.protect(
            chest_of(&alice(), 1, CHEST).with_allowed(Profile::Everyone),
            Material::Chest,
            &[CHEST],
        );
        let engine = engine(&harness);
        assert_eq!(click(&engine, &mut bob(), CHEST), InteractOutcome::Allowed);
    }

    #[test]
    fn test_bypass_sends_notice_off_signs_only() {
        let harness = Harness::new();
        alices_chest(&harness);
        let engine = engine(&harness);
        let mut admin = bob().with_permission(Permission::CanBypass.node());

        assert_eq!(click(&engine, &mut admin, CHEST), InteractOutcome::Allowed);
        let messages = harness.translator.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].translation, Translation::ProtectionBypassed);
        assert_eq!(messages[0].args, vec!["Alice".to_string()]);

        harness.translator.clear();
        assert_eq!(
            click(&engine, &mut admin, SIGN),
            InteractOutcome::SignSelected(SIGN)
        );
        let messages = harness.translator.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].translation, Translation::ProtectionSelectedSign);
    }

    #[test]
    fn test_expired_protection_opens_up() {
        let harness = Harness::with_settings(Settings {
            auto_expire_days: 7,
            ..Settings::default()
        });
        harness.protect(
            chest_of(&alice(), 1, CHEST).with_owner_last_seen(0),
            Material::Chest,
            &[CHEST],
        );
        harness.clock.set(8 * DAY_MILLIS);
        let engine = engine(&harness);

        assert_eq!(click(&engine, &mut bob(), CHEST), InteractOutcome::Allowed);
        let messages = harness.translator.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].translation, Translation::ProtectionExpired);
    }

    #[test]
    fn test_owner_selects_sign() {
        let harness = Harness::new();
        alices_chest(&harness);
        let engine = engine(&harness);
        let mut player = alice();

        assert_eq!(
            click(&engine, &mut player, SIGN),
            InteractOutcome::SignSelected(SIGN)
        );
        assert_eq!(harness.selector.selected_sign(&player), Some(SIGN));
    }

    #[test]
    fn test_listed_player_cannot_select_sign() {
        let harness = Harness::new();
        harness.place(SIGN, Material::WallSign);
        harness.protect(
            chest_of(&alice(), 1, CHEST).with_allowed(profile_of(&bob())),
            Material::Chest,
            &[CHEST, SIGN],
        );
        let engine = engine(&harness);
        let mut player = bob();

        assert_eq!(click(&engine, &mut player, SIGN), InteractOutcome::Allowed);
        assert_eq!(harness.selector.selected_sign(&player), None);
        assert!(harness.translator.messages().is_empty());
    }

    #[test]
    fn test_off_hand_sign_click_selects_nothing() {
        let harness = Harness::new();
        alices_chest(&harness);
        let engine = engine(&harness);
        let mut player = alice();

        let (outcome, cancelled) = click_with(&engine, &mut player, SIGN, Hand::Off);
        assert_eq!(outcome, InteractOutcome::Allowed);
        assert!(!cancelled);
        assert_eq!(harness.selector.selected_sign(&player), None);
    }

    #[test]
    fn test_owner_adds_more_users_sign() {
        let harness = Harness::new();
        harness.protect(chest_of(&alice(), 1, CHEST), Material::Chest, &[CHEST]);
        let engine = engine(&harness);
        let mut player = claimer(alice(), 2);

        let mut event = PlayerInteractEvent::right_click(&mut player, CHEST, BlockFace::East);
        let outcome = engine.on_player_interact(&mut event);
        assert!(event.is_cancelled());
        match outcome {
            InteractOutcome::MoreUsersAdded(sign) => {
                assert_eq!(sign.sign_type, SignType::MoreUsers);
                assert_eq!(sign.profiles, vec![Profile::Everyone]);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(harness.translator.messages().is_empty());
    }

    #[test]
    fn test_listed_player_adds_no_sign() {
        let harness = Harness::new();
        harness.protect(
            chest_of(&alice(), 1, CHEST).with_allowed(profile_of(&bob())),
            Material::Chest,
            &[CHEST],
        );
        let engine = engine(&harness);
        let mut player = claimer(bob(), 2);

        assert_eq!(click(&engine, &mut player, CHEST), InteractOutcome::Allowed);
        assert!(harness.signs.saved().is_empty());
    }

    #[test]
    fn test_door_toggles_and_closes() {
        let harness = Harness::new();
        let door = alices_door(&harness, Some(5));
        let engine = engine(&harness);
        let mut player = alice();

        let (outcome, cancelled) = click_with(&engine, &mut player, DOOR, Hand::Main);
        assert!(cancelled);
        assert_eq!(
            outcome,
            InteractOutcome::DoorToggled(DoorToggle {
                open: true,
                close_in_ticks: Some(100),
            })
        );
        assert!(door.is_open());

        harness.scheduler.advance(100);
        assert!(!door.is_open());
        let sounds: Vec<_> = harness
            .world
            .door_changes()
            .iter()
            .map(|c| c.sound)
            .collect();
        assert_eq!(sounds, vec![SoundCondition::Automatic, SoundCondition::Always]);
    }

    #[test]
    fn test_door_without_timer() {
        let harness = Harness::new();
        let door = alices_door(&harness, None);
        let engine = engine(&harness);

        click(&engine, &mut alice(), DOOR);
        assert!(door.is_open());
        assert_eq!(harness.scheduler.pending(), 0);
        click(&engine, &mut alice(), DOOR);
        assert!(!door.is_open());
    }

    #[test]
    fn test_off_hand_door_cancelled_not_toggled() {
        let harness = Harness::new();
        let door = alices_door(&harness, Some(5));
        let engine = engine(&harness);

        let (outcome, cancelled) = click_with(&engine, &mut alice(), DOOR, Hand::Off);
        assert_eq!(outcome, InteractOutcome::Allowed);
        assert!(cancelled);
        assert!(!door.is_open());
        assert!(harness.world.door_changes().is_empty());
    }

    #[test]
    fn test_sneak_placing_leaves_door_alone() {
        let harness = Harness::new();
        let door = alices_door(&harness, None);
        let engine = engine(&harness);
        let mut player = alice()
            .with_sneaking(true)
            .with_main_hand(ItemStack::new(Material::Torch, 1))
            .with_off_hand(ItemStack::new(Material::Stone, 1));

        let (outcome, cancelled) = click_with(&engine, &mut player, DOOR, Hand::Main);
        assert_eq!(outcome, InteractOutcome::Allowed);
        assert!(!cancelled);
        assert!(!door.is_open());
    }

    #[test]
    fn test_denied_door_stays_shut() {
        let harness = Harness::new();
        let door = alices_door(&harness, Some(5));
        let engine = engine(&harness);

        assert_eq!(click(&engine, &mut bob(), DOOR), InteractOutcome::Denied);
        assert!(!door.is_open());
        assert_eq!(harness.scheduler.pending(), 0);
    }

    #[test]
    fn test_redstone_listed_door_still_denies_players() {
        let harness = Harness::new();
        let door = door_of(&alice(), 3, DOOR).with_allowed(Profile::Redstone);
        harness.protect(door, Material::OakDoor, &[DOOR]);
        let engine = engine(&harness);

        assert_eq!(click(&engine, &mut bob(), DOOR), InteractOutcome::Denied);
    }

    #[test]
    fn test_adventure_player_never_claims() {
        let harness = Harness::new();
        harness.place(CHEST, Material::Chest);
        let engine = engine(&harness);
        let mut player = claimer(alice(), 1).with_game_mode(GameMode::Adventure);

        assert_eq!(click(&engine, &mut player, CHEST), InteractOutcome::Unprotected);
        assert_eq!(harness.world.block(SIGN).material, Material::Air);
    }

    #[test]
    fn test_unknown_owner_renders_placeholder() {
        let harness = Harness::new();
        harness.protect(
            Protection::new(ProtectionId(9), ProtectionType::Container, CHEST),
            Material::Chest,
            &[CHEST],
        );
        let engine = engine(&harness);

        click(&engine, &mut bob(), CHEST);
        assert_eq!(harness.translator.messages()[0].args, vec!["?".to_string()]);
    }
}
