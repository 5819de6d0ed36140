//! Drives a [`TickScheduler`] from a tokio timer.
//!
//! Hosts with their own game loop call [`TickScheduler::tick`] themselves.
//! Everything else (tools, test servers) can run this loop on a
//! current-thread runtime or a `LocalSet`; the scheduler is not `Send`.

use std::time::Duration;

use blocklocker_host::TickScheduler;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Tick `scheduler` at `ticks_per_second` until `shutdown` turns true or
/// its sender is dropped. Returns the number of ticks run.
///
/// Missed ticks are caught up in a burst, as a lagging server would.
pub async fn run_ticks(
    scheduler: &TickScheduler,
    ticks_per_second: u64,
    mut shutdown: watch::Receiver<bool>,
) -> u64 {
    // Rates above one tick per microsecond run at one tick per microsecond
    let period = Duration::from_micros((1_000_000 / ticks_per_second.max(1)).max(1));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
    // The first tick completes immediately
    interval.tick().await;

    let mut ticks = 0;
    if *shutdown.borrow() {
        return ticks;
    }
    loop {
        tokio::select! {
            _ = interval.tick() => {
                scheduler.tick();
                ticks += 1;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    tracing::debug!(ticks, "tick driver stopping");
                    break;
                }
            }
        }
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use blocklocker_host::Scheduler;

    #[tokio::test(start_paused = true)]
    async fn test_runs_due_tasks_until_shutdown() {
        let scheduler = TickScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let seen = Rc::clone(&fired);
        scheduler.run_later(20, Box::new(move || seen.set(true)));

        let (tx, rx) = watch::channel(false);
        let (ticks, _) = tokio::join!(run_ticks(&scheduler, 20, rx), async {
            tokio::time::sleep(Duration::from_millis(1_525)).await;
            tx.send(true).ok();
        });

        assert!(fired.get());
        assert!((29..=31).contains(&ticks), "ran {ticks} ticks");
        assert_eq!(scheduler.current_tick(), ticks);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rates_beyond_microsecond_resolution_run() {
        for rate in [1_000_000, 2_000_000, u64::MAX] {
            let scheduler = TickScheduler::new();
            let (tx, rx) = watch::channel(false);
            let (ticks, _) = tokio::join!(run_ticks(&scheduler, rate, rx), async {
                tokio::time::sleep(Duration::from_micros(100)).await;
                tx.send(true).ok();
            });

            assert!(ticks > 0, "rate {rate} ran no ticks");
            assert_eq!(scheduler.current_tick(), ticks);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_sender_stops() {
        let scheduler = TickScheduler::new();
        let (tx, rx) = watch::channel(false);
        drop(tx);

        let ticks = run_ticks(&scheduler, 20, rx).await;
        assert!(ticks <= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_shut_down() {
        let scheduler = TickScheduler::new();
        let (_tx, rx) = watch::channel(true);

        assert_eq!(run_ticks(&scheduler, 20, rx).await, 0);
        assert_eq!(scheduler.current_tick(), 0);
    }
}
