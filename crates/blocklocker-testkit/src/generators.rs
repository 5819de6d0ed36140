//! Proptest generators for property-based testing.

use proptest::prelude::*;

use blocklocker_core::{
    BlockFace, BlockPos, GameMode, Hand, ItemStack, Material, Player, PlayerProfile, Profile,
    Protection, ProtectionId, ProtectionType,
};
use uuid::Uuid;

/// Generate a block position near the origin.
pub fn block_pos() -> impl Strategy<Value = BlockPos> {
    (-1_000i32..1_000, 0i32..256, -1_000i32..1_000).prop_map(|(x, y, z)| BlockPos::new(x, y, z))
}

/// Generate any block face.
pub fn block_face() -> impl Strategy<Value = BlockFace> {
    prop::sample::select(BlockFace::ALL.to_vec())
}

/// Generate a face a sign can be placed against.
pub fn placement_face() -> impl Strategy<Value = BlockFace> {
    prop_oneof![
        Just(BlockFace::North),
        Just(BlockFace::East),
        Just(BlockFace::South),
        Just(BlockFace::West),
        Just(BlockFace::Up),
    ]
}

/// Generate a yaw, including values outside `[0, 360)`.
pub fn yaw() -> impl Strategy<Value = f32> {
    -720.0f32..720.0
}

/// Generate a game mode, including unknown ones.
pub fn game_mode() -> impl Strategy<Value = GameMode> {
    prop_oneof![
        Just(GameMode::Survival),
        Just(GameMode::Creative),
        Just(GameMode::Adventure),
        Just(GameMode::Spectator),
        (4u8..=255).prop_map(GameMode::Other),
    ]
}

pub fn hand() -> impl Strategy<Value = Hand> {
    prop_oneof![Just(Hand::Main), Just(Hand::Off)]
}

/// Generate a player name.
pub fn player_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{2,15}".prop_map(String::from)
}

/// Generate a plain player with a unique-looking id.
pub fn player() -> impl Strategy<Value = Player> {
    (any::<u128>(), player_name()).prop_map(|(id, name)| Player::new(Uuid::from_u128(id), name))
}

/// Generate a profile that could be listed on a sign.
pub fn listed_profile() -> impl Strategy<Value = Profile> {
    prop_oneof![
        4 => (any::<u128>(), player_name())
            .prop_map(|(id, name)| Profile::Player(PlayerProfile::new(Uuid::from_u128(id), name))),
        2 => "[a-z]{3,8}".prop_map(Profile::Group),
        1 => Just(Profile::Everyone),
        1 => Just(Profile::Redstone),
    ]
}

/// Generate a protection type.
pub fn protection_type() -> impl Strategy<Value = ProtectionType> {
    prop::sample::select(ProtectionType::ALL.to_vec())
}

/// Generate a held item, possibly a sign.
pub fn held_item() -> impl Strategy<Value = Option<ItemStack>> {
    prop::option::of(
        (
            prop::sample::select(vec![Material::Sign, Material::Torch, Material::Stone]),
            1u32..=16,
        )
            .prop_map(|(material, amount)| ItemStack::new(material, amount)),
    )
}

/// Parameters for generating a protection.
#[derive(Debug, Clone)]
pub struct ProtectionParams {
    pub id: u64,
    pub kind: ProtectionType,
    pub location: BlockPos,
    pub owner: Option<PlayerProfile>,
    pub allowed: Vec<Profile>,
    pub open_seconds: Option<i32>,
    pub owner_last_seen: Option<i64>,
}

impl Arbitrary for ProtectionParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<u64>(),
            protection_type(),
            block_pos(),
            prop::option::of((any::<u128>(), player_name())),
            prop::collection::vec(listed_profile(), 0..5),
            prop::option::of(-5i32..=30),
            prop::option::of(0i64..=1_700_000_000_000i64),
        )
            .prop_map(
                |(id, kind, location, owner, allowed, open_seconds, owner_last_seen)| {
                    ProtectionParams {
                        id,
                        kind,
                        location,
                        owner: owner
                            .map(|(uuid, name)| PlayerProfile::new(Uuid::from_u128(uuid), name)),
                        allowed,
                        open_seconds,
                        owner_last_seen,
                    }
                },
            )
            .boxed()
    }
}

/// Build a protection from parameters.
pub fn protection_from_params(params: &ProtectionParams) -> Protection {
    let mut protection = Protection::new(ProtectionId(params.id), params.kind, params.location);
    if let Some(owner) = &params.owner {
        protection = protection.with_owner(owner.clone());
    }
    for profile in &params.allowed {
        protection = protection.with_allowed(profile.clone());
    }
    if let Some(seconds) = params.open_seconds {
        protection = protection.with_open_seconds(seconds);
    }
    if let Some(at) = params.owner_last_seen {
        protection = protection.with_owner_last_seen(at);
    }
    protection
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_owner_always_allowed(params: ProtectionParams) {
            let protection = protection_from_params(&params);
            if let Some(owner) = &params.owner {
                prop_assert!(protection.is_allowed(&Profile::Player(owner.clone())));
            }
        }

        #[test]
        fn test_listed_players_allowed(params: ProtectionParams) {
            let protection = protection_from_params(&params);
            for listed in &params.allowed {
                if let Profile::Player(player) = listed {
                    prop_assert!(protection.is_allowed(&Profile::Player(player.clone())));
                }
            }
        }

        #[test]
        fn test_generated_protections_start_closed(params: ProtectionParams) {
            let protection = protection_from_params(&params);
            prop_assert!(!protection.is_open());
            prop_assert_eq!(protection.open_seconds, params.open_seconds);
        }

        #[test]
        fn test_only_up_and_sides_are_placement_faces(face in placement_face()) {
            prop_assert_ne!(face, BlockFace::Down);
        }
    }
}
