//! Access decisions.
//!
//! A decision runs three checks in order and stops at the first that
//! allows: the protection's own rule, expiry, then the bypass permission.
//! The decision carries at most one notice for the player.

use blocklocker_core::{PlayerProfile, Profile, Protection, Translation};

use crate::expiry::ExpiryPolicy;
use crate::permission::{Permissible, Permission};

/// Why access was granted or refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRoute {
    /// The actor is the owner or listed on a sign.
    Rule,
    /// The protection expired.
    Expired,
    /// The actor bypassed the protection.
    Bypassed,
    /// No check allowed access.
    Denied,
}

/// A message to show the actor as part of a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Expired,
    Bypassed { owner: String },
}

impl Notice {
    pub fn translation(&self) -> Translation {
        match self {
            Notice::Expired => Translation::ProtectionExpired,
            Notice::Bypassed { .. } => Translation::ProtectionBypassed,
        }
    }

    pub fn args(&self) -> Vec<String> {
        match self {
            Notice::Expired => Vec::new(),
            Notice::Bypassed { owner } => vec![owner.clone()],
        }
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    pub route: AccessRoute,
    pub notice: Option<Notice>,
}

impl AccessDecision {
    fn new(route: AccessRoute, notice: Option<Notice>) -> Self {
        Self { route, notice }
    }

    pub fn is_allowed(&self) -> bool {
        !matches!(self.route, AccessRoute::Denied)
    }
}

/// Decides whether a player may use a protection.
#[derive(Debug, Clone)]
pub struct AccessPolicy<E> {
    expiry: E,
}

impl<E: ExpiryPolicy> AccessPolicy<E> {
    pub fn new(expiry: E) -> Self {
        Self { expiry }
    }

    pub fn expiry(&self) -> &E {
        &self.expiry
    }

    /// Check whether `actor` (resolved to `profile`) may use `protection`.
    ///
    /// Bypass notices are left out for sign clicks, so browsing signs does
    /// not repeat them.
    pub fn check_allowed<P: Permissible>(
        &self,
        actor: &P,
        profile: &PlayerProfile,
        protection: &Protection,
        clicked_sign: bool,
        now: i64,
    ) -> AccessDecision {
        if protection.is_allowed(&Profile::Player(profile.clone())) {
            return AccessDecision::new(AccessRoute::Rule, None);
        }

        if self.expiry.is_expired(protection, now) {
            tracing::debug!(protection = %protection.id, "protection expired, granting access");
            return AccessDecision::new(AccessRoute::Expired, Some(Notice::Expired));
        }

        if actor.has_permission(Permission::CanBypass) {
            tracing::debug!(
                protection = %protection.id,
                player = %profile.name,
                "bypassing protection"
            );
            let notice = (!clicked_sign).then(|| Notice::Bypassed {
                owner: protection.owner_display_name().to_string(),
            });
            return AccessDecision::new(AccessRoute::Bypassed, notice);
        }

        AccessDecision::new(AccessRoute::Denied, None)
    }

    /// Whether `profile` owns the protection or may act as if it did.
    pub fn can_manage<P: Permissible>(
        &self,
        actor: &P,
        profile: &PlayerProfile,
        protection: &Protection,
    ) -> bool {
        protection.is_owner(profile) || actor.has_permission(Permission::CanBypass)
    }
}

impl Default for AccessPolicy<crate::expiry::NeverExpire> {
    fn default() -> Self {
        Self::new(crate::expiry::NeverExpire)
    }
}
