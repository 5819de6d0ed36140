//! # BlockLocker
//!
//! Protection interaction and access resolution for block-based worlds.
//!
//! ## Overview
//!
//! Players protect containers and doors by placing a sign on them. This
//! crate decides what happens when anyone touches such a block:
//!
//! - **Access**: owner, listed players and groups, expiry and bypass
//! - **Doors**: protected doors are opened by the engine and close
//!   themselves after a configurable delay
//! - **Claiming**: right-clicking a container with a sign places it for the
//!   player, subject to the host's own placement rules
//! - **Automation**: hoppers and droppers cannot reach into protections
//!   that do not list `[Redstone]`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use blocklocker::{BlockLocker, ConfigTranslator, Settings};
//! use blocklocker::host::{
//!     DefaultProfileFactory, MemoryFinder, MemorySignSelector, MemorySignStore,
//!     MemoryWorld, NoopUpdater, Services, SystemClock, TickScheduler,
//! };
//!
//! let settings = Settings::load("blocklocker.toml").unwrap();
//! let config = settings.engine.clone();
//! let services = Services {
//!     world: Rc::new(MemoryWorld::new()),
//!     finder: Rc::new(MemoryFinder::new()),
//!     signs: Rc::new(MemorySignStore::new()),
//!     profiles: Rc::new(DefaultProfileFactory),
//!     updater: Rc::new(NoopUpdater),
//!     settings: Rc::new(settings),
//!     translator: Rc::new(ConfigTranslator::defaults()),
//!     selector: Rc::new(MemorySignSelector::new()),
//!     scheduler: Rc::new(TickScheduler::new()),
//!     clock: Rc::new(SystemClock),
//! };
//!
//! let engine = BlockLocker::new(services, config);
//! // engine.on_player_interact(&mut event);
//! // engine.on_inventory_move(&mut event);
//! ```
//!
//! ## Design Notes
//!
//! - Handlers never fail: refusals are values ([`InteractOutcome`],
//!   [`ClaimRefusal`]) and only configuration loading returns errors
//! - Host state is re-read on every event; nothing is cached
//!
//! ## Re-exports
//!
//! - `blocklocker::core` - Blocks, players, protections and events
//! - `blocklocker::perms` - Permissions and access decisions
//! - `blocklocker::host` - Collaborator traits and in-memory hosts

pub mod claim;
pub mod config;
pub mod dispatch;
pub mod door;
pub mod driver;
pub mod engine;
pub mod error;
pub mod link;
pub mod translator;

#[cfg(test)]
mod testing;

// Re-export component crates
pub use blocklocker_core as core;
pub use blocklocker_host as host;
pub use blocklocker_perms as perms;

pub use claim::{SignClaimer, SignPlacement};
pub use config::{EngineConfig, ProtectableConfig, Settings, MAX_TICKS_PER_SECOND};
pub use dispatch::InteractOutcome;
pub use door::{DoorController, DoorToggle};
pub use driver::run_ticks;
pub use engine::BlockLocker;
pub use error::{ClaimRefusal, ConfigError, Result};
pub use translator::{ChatSink, ConfigTranslator, TranslationValue};
