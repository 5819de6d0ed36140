//! # BlockLocker Host
//!
//! The interface between the engine and the game server hosting it.
//!
//! ## Overview
//!
//! The engine never touches the world directly. It asks collaborators to
//! read blocks, find protections, save signs, send messages and schedule
//! work. This crate defines those collaborators as traits, plus:
//!
//! - [`TickScheduler`] - a tick-keyed queue of fire-once tasks
//! - [`memory`] - in-memory implementations for tests
//!
//! ## Key Types
//!
//! - [`World`] - Block access and placement events
//! - [`ProtectionFinder`] - Locates the protection covering a block
//! - [`Scheduler`] - Deferred tasks measured in ticks
//! - [`Services`] - The full set of collaborators
//!
//! ## Design Notes
//!
//! - **Single-threaded**: collaborators are `Rc<dyn Trait>` with `&self`
//!   methods and interior mutability
//! - **Synchronous**: no call blocks, none returns an error
//! - **No caching**: the engine re-reads host state on every event

pub mod memory;
pub mod scheduler;
pub mod services;
pub mod traits;

pub use memory::{
    DoorChange, ManualClock, MemoryFinder, MemorySignSelector, MemorySignStore, MemoryWorld,
    RecordingTranslator, RecordingUpdater, SentMessage,
};
pub use scheduler::{TickScheduler, TICKS_PER_SECOND};
pub use services::Services;
pub use traits::{
    ChestSettings, Clock, DefaultProfileFactory, NoopUpdater, ProfileFactory, ProtectionFinder,
    ProtectionUpdater, Scheduler, SearchMode, SignParser, SignSelector, SoundCondition,
    SystemClock, Task, Translator, World,
};
