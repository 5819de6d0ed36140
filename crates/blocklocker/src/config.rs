//! Deployment configuration.
//!
//! Settings are read from TOML. Every field has a default, so an empty file
//! is a valid configuration:
//!
//! ```toml
//! default_door_open_seconds = 3
//! auto_expire_days = 30
//!
//! [protectable]
//! container = ["chest", "barrel"]
//! door = ["oak_door", "iron_door"]
//!
//! [engine]
//! ignore_cancelled = true
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use blocklocker_core::{Material, ProtectionType};
use blocklocker_host::{ChestSettings, TICKS_PER_SECOND};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Highest accepted `engine.ticks_per_second`.
pub const MAX_TICKS_PER_SECOND: u64 = 1_000;

/// Engine behaviour that is not deployment policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Host ticks per second, used to turn door delays into ticks.
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: u64,
    /// Skip events another handler already cancelled.
    #[serde(default = "default_true")]
    pub ignore_cancelled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: default_ticks_per_second(),
            ignore_cancelled: true,
        }
    }
}

/// Materials that may be protected, per protection type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectableConfig {
    #[serde(default = "default_containers")]
    pub container: BTreeSet<Material>,
    #[serde(default = "default_doors")]
    pub door: BTreeSet<Material>,
    #[serde(default = "default_trapdoors")]
    pub trapdoor: BTreeSet<Material>,
    #[serde(default = "default_fence_gates")]
    pub fence_gate: BTreeSet<Material>,
}

impl ProtectableConfig {
    pub fn materials(&self, kind: ProtectionType) -> &BTreeSet<Material> {
        match kind {
            ProtectionType::Container => &self.container,
            ProtectionType::Door => &self.door,
            ProtectionType::Trapdoor => &self.trapdoor,
            ProtectionType::FenceGate => &self.fence_gate,
        }
    }
}

impl Default for ProtectableConfig {
    fn default() -> Self {
        Self {
            container: default_containers(),
            door: default_doors(),
            trapdoor: default_trapdoors(),
            fence_gate: default_fence_gates(),
        }
    }
}

/// Deployment settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds a door stays open when its protection does not say.
    /// Zero or negative disables automatic closing.
    #[serde(default)]
    pub default_door_open_seconds: i32,
    /// Days of owner inactivity before protections expire. Zero never.
    #[serde(default)]
    pub auto_expire_days: u32,
    #[serde(default)]
    pub protectable: ProtectableConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Settings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded settings");
        Ok(settings)
    }

    /// Serialize the settings back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_TICKS_PER_SECOND).contains(&self.engine.ticks_per_second) {
            return Err(ConfigError::InvalidValue {
                key: "engine.ticks_per_second".into(),
                reason: format!("must be between 1 and {MAX_TICKS_PER_SECOND}"),
            });
        }
        for kind in ProtectionType::ALL {
            if let Some(material) = self
                .protectable
                .materials(kind)
                .iter()
                .find(|m| m.is_air() || m.is_sign_block())
            {
                return Err(ConfigError::InvalidValue {
                    key: format!("protectable.{}", kind_key(kind)),
                    reason: format!("{material} cannot be protected"),
                });
            }
        }
        Ok(())
    }
}

impl ChestSettings for Settings {
    fn can_protect(&self, kind: ProtectionType, material: Material) -> bool {
        self.protectable.materials(kind).contains(&material)
    }

    fn default_door_open_seconds(&self) -> i32 {
        self.default_door_open_seconds
    }

    fn auto_expire_days(&self) -> u32 {
        self.auto_expire_days
    }
}

fn kind_key(kind: ProtectionType) -> &'static str {
    match kind {
        ProtectionType::Container => "container",
        ProtectionType::Door => "door",
        ProtectionType::Trapdoor => "trapdoor",
        ProtectionType::FenceGate => "fence_gate",
    }
}

fn default_true() -> bool {
    true
}

fn default_ticks_per_second() -> u64 {
    TICKS_PER_SECOND
}

fn default_containers() -> BTreeSet<Material> {
    [
        Material::Chest,
        Material::TrappedChest,
        Material::Furnace,
        Material::Barrel,
        Material::Hopper,
        Material::Dispenser,
        Material::Dropper,
        Material::BrewingStand,
    ]
    .into_iter()
    .collect()
}

fn default_doors() -> BTreeSet<Material> {
    [Material::OakDoor, Material::SpruceDoor, Material::IronDoor]
        .into_iter()
        .collect()
}

fn default_trapdoors() -> BTreeSet<Material> {
    [Material::OakTrapdoor, Material::IronTrapdoor]
        .into_iter()
        .collect()
}

fn default_fence_gates() -> BTreeSet<Material> {
    [Material::OakFenceGate].into_iter().collect()
}
