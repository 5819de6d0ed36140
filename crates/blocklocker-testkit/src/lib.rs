//! # BlockLocker Testkit
//!
//! Testing utilities for the BlockLocker engine.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: an engine wired to an in-memory world, with helpers to
//!   build players, chests and doors and to fire events
//! - **Generators**: Proptest strategies for property-based testing
//!
//! End-to-end scenarios live in this crate's `tests/` directory.
//!
//! ## Test Fixtures
//!
//! ```rust
//! use blocklocker_testkit::TestFixture;
//! use blocklocker_core::{BlockFace, BlockPos};
//!
//! let fixture = TestFixture::new();
//! let alice = fixture.player("Alice");
//! let mut bob = fixture.player("Bob");
//! let chest = BlockPos::new(0, 64, 0);
//! fixture.chest(&alice, chest);
//!
//! let result = fixture.right_click(&mut bob, chest, BlockFace::East);
//! assert!(result.cancelled);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use blocklocker_testkit::generators::{protection_from_params, ProtectionParams};
//!
//! proptest! {
//!     #[test]
//!     fn owner_is_allowed(params: ProtectionParams) {
//!         let protection = protection_from_params(&params);
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{players, profile_of, Interaction, TestFixture};
pub use generators::{protection_from_params, ProtectionParams};
