//! Door open/close state and automatic closing.

use std::rc::Rc;

use blocklocker_core::{Protection, ProtectionRef};
use blocklocker_host::{ChestSettings, Scheduler, Services, SoundCondition, World};

/// Result of a player toggling a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorToggle {
    /// State after the toggle.
    pub open: bool,
    /// Delay of the scheduled automatic close, if one was scheduled.
    pub close_in_ticks: Option<u64>,
}

/// Opens, closes and times protected doors.
pub struct DoorController {
    world: Rc<dyn World>,
    scheduler: Rc<dyn Scheduler>,
    settings: Rc<dyn ChestSettings>,
    ticks_per_second: u64,
}

impl DoorController {
    pub fn new(services: &Services, ticks_per_second: u64) -> Self {
        Self {
            world: Rc::clone(&services.world),
            scheduler: Rc::clone(&services.scheduler),
            settings: Rc::clone(&services.settings),
            ticks_per_second,
        }
    }

    /// Move the door to `open`. Returns whether anything changed; the world
    /// only hears about actual transitions.
    pub fn set_open(&self, protection: &Protection, open: bool, sound: SoundCondition) -> bool {
        set_door_open(self.world.as_ref(), protection, open, sound)
    }

    /// Flip the door as a player would, then schedule its automatic close.
    pub fn toggle(&self, protection: &ProtectionRef) -> DoorToggle {
        let open = !protection.is_open();
        self.set_open(protection, open, SoundCondition::Automatic);
        tracing::debug!(protection = %protection.id, open, "door toggled");

        DoorToggle {
            open,
            close_in_ticks: self.schedule_close(protection),
        }
    }

    /// Seconds the door stays open before closing itself.
    pub fn open_seconds(&self, protection: &Protection) -> i32 {
        protection
            .open_seconds
            .unwrap_or_else(|| self.settings.default_door_open_seconds())
    }

    /// Schedule the door to close after its open time. Nothing is scheduled
    /// for closed doors or for an open time of zero or less. Returns the
    /// delay in ticks.
    pub fn schedule_close(&self, protection: &ProtectionRef) -> Option<u64> {
        if !protection.is_open() {
            return None;
        }
        let seconds = self.open_seconds(protection);
        if seconds <= 0 {
            return None;
        }

        let delay = u64::from(seconds.unsigned_abs()).saturating_mul(self.ticks_per_second);
        let world = Rc::clone(&self.world);
        let protection = ProtectionRef::clone(protection);
        self.scheduler.run_later(
            delay,
            Box::new(move || {
                // Closing an already-closed door changes nothing
                if set_door_open(world.as_ref(), &protection, false, SoundCondition::Always) {
                    tracing::debug!(protection = %protection.id, "door closed automatically");
                }
            }),
        );
        Some(delay)
    }
}

impl std::fmt::Debug for DoorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoorController")
            .field("ticks_per_second", &self.ticks_per_second)
            .finish_non_exhaustive()
    }
}

fn set_door_open(
    world: &dyn World,
    protection: &Protection,
    open: bool,
    sound: SoundCondition,
) -> bool {
    if !protection.set_open(open) {
        return false;
    }
    world.door_state_changed(protection, open, sound);
    true
}
