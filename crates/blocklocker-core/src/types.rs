//! Strong type definitions for world values.
//!
//! Blocks, faces, materials, game modes and item stacks are closed enums so
//! every decision over them is an exhaustive match.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Position of a block in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The neighbouring position in the given direction.
    pub const fn relative(&self, face: BlockFace) -> Self {
        let (dx, dy, dz) = face.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the six faces of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockFace {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl BlockFace {
    pub const ALL: [BlockFace; 6] = [
        BlockFace::North,
        BlockFace::East,
        BlockFace::South,
        BlockFace::West,
        BlockFace::Up,
        BlockFace::Down,
    ];

    /// Unit offset `(dx, dy, dz)` of this face. North is negative z.
    pub const fn offset(&self) -> (i32, i32, i32) {
        match self {
            BlockFace::North => (0, 0, -1),
            BlockFace::East => (1, 0, 0),
            BlockFace::South => (0, 0, 1),
            BlockFace::West => (-1, 0, 0),
            BlockFace::Up => (0, 1, 0),
            BlockFace::Down => (0, -1, 0),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            BlockFace::North => "north",
            BlockFace::East => "east",
            BlockFace::South => "south",
            BlockFace::West => "west",
            BlockFace::Up => "up",
            BlockFace::Down => "down",
        }
    }
}

impl FromStr for BlockFace {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockFace::ALL
            .into_iter()
            .find(|face| face.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownBlockFace(s.to_string()))
    }
}

macro_rules! materials {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Block and item materials known to the engine.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Material {
            $($variant),+
        }

        impl Material {
            pub const ALL: &'static [Material] = &[$(Material::$variant),+];

            pub const fn name(&self) -> &'static str {
                match self {
                    $(Material::$variant => $name),+
                }
            }
        }
    };
}

materials! {
    Air => "air",
    Stone => "stone",
    Dirt => "dirt",
    OakPlanks => "oak_planks",
    Chest => "chest",
    TrappedChest => "trapped_chest",
    Furnace => "furnace",
    Barrel => "barrel",
    Hopper => "hopper",
    Dispenser => "dispenser",
    Dropper => "dropper",
    BrewingStand => "brewing_stand",
    OakDoor => "oak_door",
    SpruceDoor => "spruce_door",
    IronDoor => "iron_door",
    OakTrapdoor => "oak_trapdoor",
    IronTrapdoor => "iron_trapdoor",
    OakFenceGate => "oak_fence_gate",
    Sign => "sign",
    SignPost => "sign_post",
    WallSign => "wall_sign",
    Torch => "torch",
}

impl Material {
    /// Whether this material is a placed sign block (standing or wall).
    ///
    /// The `Sign` item is not a sign block.
    pub const fn is_sign_block(&self) -> bool {
        matches!(self, Material::SignPost | Material::WallSign)
    }

    pub const fn is_air(&self) -> bool {
        matches!(self, Material::Air)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Material::ALL
            .iter()
            .copied()
            .find(|material| material.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownMaterial(s.to_string()))
    }
}

/// Game mode of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Survival,
    Creative,
    Adventure,
    Spectator,
    /// A mode this engine does not know about, carried by its host id.
    Other(u8),
}

impl GameMode {
    /// Whether players may place blocks in this mode.
    ///
    /// Only survival and creative build. Unknown modes never build.
    pub const fn can_build(&self) -> bool {
        match self {
            GameMode::Survival => true,
            GameMode::Creative => true,
            GameMode::Adventure => false,
            GameMode::Spectator => false,
            GameMode::Other(_) => false,
        }
    }

    /// Whether items are consumed when used.
    pub const fn consumes_items(&self) -> bool {
        !matches!(self, GameMode::Creative)
    }
}

impl FromStr for GameMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "survival" => Ok(GameMode::Survival),
            "creative" => Ok(GameMode::Creative),
            "adventure" => Ok(GameMode::Adventure),
            "spectator" => Ok(GameMode::Spectator),
            _ => Err(CoreError::UnknownGameMode(s.to_string())),
        }
    }
}

/// Which hand performed an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Main,
    Off,
}

/// A stack of items in an inventory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub material: Material,
    pub amount: u32,
}

impl ItemStack {
    pub const fn new(material: Material, amount: u32) -> Self {
        Self { material, amount }
    }

    /// True for air or a zero-sized stack.
    pub const fn is_empty(&self) -> bool {
        self.material.is_air() || self.amount == 0
    }

    pub fn is_of(&self, material: Material) -> bool {
        self.material == material
    }

    /// The stack with one item removed, or `None` if it was the last one.
    pub fn take_one(self) -> Option<ItemStack> {
        if self.amount > 1 {
            Some(Self {
                amount: self.amount - 1,
                ..self
            })
        } else {
            None
        }
    }
}

/// Orientation of a placed sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignOrientation {
    /// Attached to the side of a block, facing away from it.
    Wall { facing: BlockFace },
    /// Standing on top of a block, one of 16 rotations.
    Standing { rotation: u8 },
}

impl SignOrientation {
    /// The block material that carries this orientation.
    pub const fn material(&self) -> Material {
        match self {
            SignOrientation::Wall { .. } => Material::WallSign,
            SignOrientation::Standing { .. } => Material::SignPost,
        }
    }
}

/// Extra per-block data the engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockData {
    #[default]
    None,
    Sign(SignOrientation),
}

/// Snapshot of a block: its material plus data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockState {
    pub material: Material,
    pub data: BlockData,
}

impl BlockState {
    pub const AIR: Self = Self::of(Material::Air);

    pub const fn of(material: Material) -> Self {
        Self {
            material,
            data: BlockData::None,
        }
    }

    pub const fn sign(orientation: SignOrientation) -> Self {
        Self {
            material: orientation.material(),
            data: BlockData::Sign(orientation),
        }
    }
}
