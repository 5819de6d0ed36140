//! # BlockLocker Core
//!
//! Pure types for the BlockLocker engine: blocks, players, profiles,
//! protections, signs and the events that carry them.
//!
//! This crate contains no I/O and no host access. It is the vocabulary the
//! other crates speak.
//!
//! ## Key Types
//!
//! - [`Protection`] - Authorization state attached to a structure
//! - [`Profile`] - A principal listed on a protection sign
//! - [`Player`] - The acting player of an interaction
//! - [`PlayerInteractEvent`] / [`InventoryMoveEvent`] - Handled events
//! - [`Translation`] - Keys of the message catalog

pub mod error;
pub mod event;
pub mod player;
pub mod profile;
pub mod protection;
pub mod sign;
pub mod translation;
pub mod types;

pub use error::{CoreError, Result};
pub use event::{Action, BlockPlaceEvent, InventoryHolder, InventoryMoveEvent, PlayerInteractEvent};
pub use player::Player;
pub use profile::{PlayerProfile, Profile};
pub use protection::{kind_of, Protection, ProtectionId, ProtectionRef, ProtectionType};
pub use sign::{orientation_for_face, standing_rotation, ProtectionSign, SignType, SIGN_ROTATIONS};
pub use translation::Translation;
pub use types::{
    BlockData, BlockFace, BlockPos, BlockState, GameMode, Hand, ItemStack, Material,
    SignOrientation,
};
