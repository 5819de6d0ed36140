//! Protection signs and sign placement geometry.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;
use crate::types::{BlockFace, BlockPos, SignOrientation};

/// Number of discrete rotations a standing sign can take.
pub const SIGN_ROTATIONS: u8 = 16;

/// Kind of protection sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignType {
    /// The main sign, carrying the owner.
    Private,
    /// An auxiliary sign listing additional users.
    MoreUsers,
}

impl SignType {
    pub const fn is_main_sign(&self) -> bool {
        match self {
            SignType::Private => true,
            SignType::MoreUsers => false,
        }
    }
}

/// A physical sign tied to a protection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionSign {
    pub location: BlockPos,
    pub orientation: SignOrientation,
    pub sign_type: SignType,
    pub profiles: Vec<Profile>,
}

impl ProtectionSign {
    pub fn new(
        location: BlockPos,
        orientation: SignOrientation,
        sign_type: SignType,
        profiles: Vec<Profile>,
    ) -> Self {
        Self {
            location,
            orientation,
            sign_type,
            profiles,
        }
    }
}

/// Rotation of a standing sign placed by a player looking along `yaw`.
///
/// The yaw is quantized into 16 steps and turned around by half a circle
/// so the text faces the player.
pub fn standing_rotation(yaw: f32) -> u8 {
    let degrees = yaw.rem_euclid(360.0);
    let step = (degrees / 360.0 * f32::from(SIGN_ROTATIONS)).round() as u8;
    (step + SIGN_ROTATIONS / 2) % SIGN_ROTATIONS
}

/// Orientation of a sign placed against `face`, or `None` for faces a sign
/// cannot be attached to.
pub fn orientation_for_face(face: BlockFace, yaw: f32) -> Option<SignOrientation> {
    match face {
        BlockFace::North | BlockFace::East | BlockFace::South | BlockFace::West => {
            Some(SignOrientation::Wall { facing: face })
        }
        BlockFace::Up => Some(SignOrientation::Standing {
            rotation: standing_rotation(yaw),
        }),
        BlockFace::Down => None,
    }
}
