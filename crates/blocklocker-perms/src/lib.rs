//! # BlockLocker Permissions
//!
//! Access decisions for protected structures.
//!
//! ## Overview
//!
//! A protection carries its own access rule (owner plus listed profiles).
//! On top of that rule, the engine applies two overrides:
//!
//! - **Expiry**: a protection whose owner has been inactive too long is open
//!   to everyone
//! - **Bypass**: players with `blocklocker.bypass` may open anything
//!
//! Overrides are checked in that order and the first one that applies wins,
//! so a player sees at most one notice per decision.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use blocklocker_perms::{AccessPolicy, InactivityExpiry};
//!
//! let policy = AccessPolicy::new(InactivityExpiry::days(30));
//! // let decision = policy.check_allowed(&player, &profile, &protection, false, now);
//! // if decision.is_allowed() { ... }
//! ```

pub mod error;
pub mod expiry;
pub mod permission;
pub mod policy;

pub use error::{PermsError, Result};
pub use expiry::{ExpiryPolicy, InactivityExpiry, NeverExpire, DAY_MILLIS};
pub use permission::{Permissible, Permission};
pub use policy::{AccessDecision, AccessPolicy, AccessRoute, Notice};
