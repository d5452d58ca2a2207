use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::attendance::clock::SessionClock;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Recurring one-second tick for a running [`SessionClock`].
///
/// Owning a `Ticker` means owning the schedule: [`Ticker::cancel`] or dropping
/// the handle aborts the task, so no tick lands after the owner is gone.
pub struct Ticker {
    task: JoinHandle<()>,
}

impl Ticker {
    /// Must be called from within a tokio runtime.
    pub fn spawn(clock: Arc<Mutex<SessionClock>>, period: Duration) -> Self {
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                interval.tick().await;

                let still_running = match clock.lock() {
                    Ok(mut clock) => clock.tick().is_ok(),
                    Err(_) => {
                        tracing::error!("Session clock lock poisoned, stopping ticker");
                        false
                    }
                };
                // an idle clock means the owner stopped without cancelling us
                if !still_running {
                    break;
                }
            }
        });

        Self { task }
    }

    pub fn cancel(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::clock::testing::ManualClock;
    use crate::test_utils::date;

    fn running_clock() -> Arc<Mutex<SessionClock>> {
        let wall = ManualClock::at(date("2026-10-19").and_hms_opt(9, 0, 0).unwrap());
        let mut clock = SessionClock::new(wall);
        clock.start().unwrap();
        Arc::new(Mutex::new(clock))
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let clock = running_clock();
        let ticker = Ticker::spawn(clock.clone(), TICK_PERIOD);

        time::sleep(Duration::from_millis(5_500)).await;
        assert_eq!(clock.lock().unwrap().elapsed_seconds(), 5);
        assert!(!ticker.is_finished());
        ticker.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_further_ticks() {
        let clock = running_clock();
        let ticker = Ticker::spawn(clock.clone(), TICK_PERIOD);

        time::sleep(Duration::from_millis(2_500)).await;
        ticker.cancel();
        time::sleep(Duration::from_secs(10)).await;

        assert_eq!(clock.lock().unwrap().elapsed_seconds(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_releases_the_schedule() {
        let clock = running_clock();
        {
            let _ticker = Ticker::spawn(clock.clone(), TICK_PERIOD);
            time::sleep(Duration::from_millis(1_500)).await;
        }
        time::sleep(Duration::from_secs(10)).await;

        assert_eq!(clock.lock().unwrap().elapsed_seconds(), 1);
        // the aborted task released its handle on the clock
        assert_eq!(Arc::strong_count(&clock), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exits_when_clock_goes_idle() {
        let clock = running_clock();
        let ticker = Ticker::spawn(clock.clone(), TICK_PERIOD);

        time::sleep(Duration::from_millis(1_500)).await;
        clock.lock().unwrap().stop(&"2".into()).unwrap();
        time::sleep(Duration::from_secs(2)).await;

        assert!(ticker.is_finished());
    }
}
