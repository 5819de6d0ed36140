//! The engine: every event handler behind one value.
//!
//! `BlockLocker` owns the access policy, the door controller and the sign
//! claimer, and shares the host's collaborators with them. Handlers live in
//! [`crate::dispatch`] (player interaction) and [`crate::link`] (inventory
//! transfers).

use blocklocker_core::{Player, Translation};
use blocklocker_host::Services;
use blocklocker_perms::{AccessPolicy, InactivityExpiry};

use crate::claim::SignClaimer;
use crate::config::EngineConfig;
use crate::door::DoorController;

/// The protection engine.
pub struct BlockLocker {
    /// Host collaborators.
    pub(crate) services: Services,
    /// Engine behaviour.
    pub(crate) config: EngineConfig,
    /// Rule, expiry and bypass checks.
    pub(crate) policy: AccessPolicy<InactivityExpiry>,
    pub(crate) doors: DoorController,
    pub(crate) claims: SignClaimer,
}

impl BlockLocker {
    /// Build an engine over the host's collaborators.
    ///
    /// The expiry window is read from the settings once, here.
    pub fn new(services: Services, config: EngineConfig) -> Self {
        let expiry = InactivityExpiry::days(services.settings.auto_expire_days());
        Self {
            doors: DoorController::new(&services, config.ticks_per_second),
            claims: SignClaimer::new(&services),
            policy: AccessPolicy::new(expiry),
            services,
            config,
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn policy(&self) -> &AccessPolicy<InactivityExpiry> {
        &self.policy
    }

    pub fn doors(&self) -> &DoorController {
        &self.doors
    }

    pub fn claims(&self) -> &SignClaimer {
        &self.claims
    }

    pub(crate) fn send(&self, player: &Player, translation: Translation, args: &[String]) {
        self.services
            .translator
            .send_message(player, translation, args);
    }
}

impl std::fmt::Debug for BlockLocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockLocker")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
