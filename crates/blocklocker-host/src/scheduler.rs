//! Tick-based scheduler.
//!
//! Tasks are queued by the tick they are due on and run, in scheduling
//! order, when the host advances the clock past that tick.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::traits::{Scheduler, Task};

/// Ticks per second of the host's simulation.
pub const TICKS_PER_SECOND: u64 = 20;

/// A single-threaded queue of fire-once tasks keyed by due tick.
#[derive(Default)]
pub struct TickScheduler {
    current: Cell<u64>,
    queue: RefCell<BTreeMap<u64, Vec<Task>>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last tick that ran.
    pub fn current_tick(&self) -> u64 {
        self.current.get()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.borrow().values().map(Vec::len).sum()
    }

    /// The earliest tick a task is due on.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.borrow().keys().next().copied()
    }

    /// Advance one tick and run every task due. Returns how many ran.
    pub fn tick(&self) -> usize {
        let now = self.current.get() + 1;
        self.current.set(now);

        // Release the queue before running: tasks may schedule more tasks.
        let due = {
            let mut queue = self.queue.borrow_mut();
            let later = queue.split_off(&(now + 1));
            std::mem::replace(&mut *queue, later)
        };

        let mut ran = 0;
        for task in due.into_values().flatten() {
            task();
            ran += 1;
        }
        if ran > 0 {
            tracing::trace!(tick = now, ran, "ran scheduled tasks");
        }
        ran
    }

    /// Advance `ticks` ticks. Returns how many tasks ran.
    pub fn advance(&self, ticks: u64) -> usize {
        (0..ticks).map(|_| self.tick()).sum()
    }
}

impl Scheduler for TickScheduler {
    fn run_later(&self, delay_ticks: u64, task: Task) {
        // A zero delay still waits for the next tick
        let due = self.current.get().saturating_add(delay_ticks.max(1));
        self.queue.borrow_mut().entry(due).or_default().push(task);
    }
}

impl std::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickScheduler")
            .field("current", &self.current.get())
            .field("pending", &self.pending())
            .finish()
    }
}
