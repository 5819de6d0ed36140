//! Protection expiry.
//!
//! A protection whose owner has been away long enough is treated as
//! abandoned: anyone may open it.

use blocklocker_core::Protection;

/// Milliseconds in one day.
pub const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Decides whether a protection has expired.
pub trait ExpiryPolicy {
    fn is_expired(&self, protection: &Protection, now: i64) -> bool;
}

/// Protections never expire.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverExpire;

impl ExpiryPolicy for NeverExpire {
    fn is_expired(&self, _protection: &Protection, _now: i64) -> bool {
        false
    }
}

/// Protections expire once the owner has not been seen for a number of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityExpiry {
    /// Days of inactivity before expiry. Zero disables expiry.
    pub expire_after_days: u32,
}

impl InactivityExpiry {
    pub const fn days(expire_after_days: u32) -> Self {
        Self { expire_after_days }
    }
}

impl ExpiryPolicy for InactivityExpiry {
    fn is_expired(&self, protection: &Protection, now: i64) -> bool {
        if self.expire_after_days == 0 {
            return false;
        }

        // Owners we have never seen are not treated as inactive
        let Some(last_seen) = protection.owner_last_seen else {
            return false;
        };

        now.saturating_sub(last_seen) > i64::from(self.expire_after_days) * DAY_MILLIS
    }
}
